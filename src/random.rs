//! Uniform random sources, index selection, and shuffling.
//!
//! Every stochastic operation in the crate draws through
//! [`UniformSource`], so callers can pass a seeded RNG, an entropy-seeded
//! RNG, a closure, or a fixed replay list.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use rand::Rng;

/// A producer of uniform variates in `[0, 1)`.
pub trait UniformSource {
    /// Returns the next uniform variate.
    fn next_uniform(&mut self) -> f64;
}

impl<R: Rng> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Adapts a closure into a [`UniformSource`].
///
/// # Examples
/// ```
/// use u_statlab::random::{FnSource, UniformSource};
/// let mut source = FnSource(|| 0.25);
/// assert_eq!(source.next_uniform(), 0.25);
/// ```
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> f64> UniformSource for FnSource<F> {
    fn next_uniform(&mut self) -> f64 {
        (self.0)()
    }
}

/// Replays a fixed list of variates, wrapping around at the end.
///
/// # Examples
/// ```
/// use u_statlab::random::{ReplaySource, UniformSource};
/// let mut source = ReplaySource::new(vec![0.1, 0.9]);
/// assert_eq!(source.next_uniform(), 0.1);
/// assert_eq!(source.next_uniform(), 0.9);
/// assert_eq!(source.next_uniform(), 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct ReplaySource {
    values: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    /// Creates a replay source. An empty list replays `0.0` forever.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of variates handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ReplaySource {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let u = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        u
    }
}

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
///
/// # Examples
/// ```
/// use u_statlab::random::{create_rng, UniformSource};
/// let mut rng = create_rng(42);
/// let x = rng.next_uniform();
/// assert!((0.0..1.0).contains(&x));
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Creates a `SmallRng` seeded from operating-system entropy.
pub fn entropy_rng() -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::from_os_rng()
}

/// Picks an index in `[0, len)` as `⌊u · len⌋`.
///
/// The result is clamped to `len − 1` so that a source returning exactly
/// `1.0` cannot index past the end.
///
/// # Panics
/// Panics if `len == 0`.
pub fn uniform_index<S: UniformSource + ?Sized>(source: &mut S, len: usize) -> usize {
    assert!(len > 0, "uniform_index requires a non-empty range");
    let idx = (source.next_uniform() * len as f64).floor() as usize;
    idx.min(len - 1)
}

/// Fisher-Yates (Durstenfeld) in-place shuffle.
///
/// Iterates backwards, swapping each element with a uniformly chosen
/// earlier (or same) position.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
///
/// # Examples
/// ```
/// use u_statlab::random::{create_rng, shuffle};
/// let mut v = vec!["a", "b", "c", "d"];
/// shuffle(&mut v, &mut create_rng(7));
/// v.sort();
/// assert_eq!(v, vec!["a", "b", "c", "d"]);
/// ```
pub fn shuffle<T, S: UniformSource + ?Sized>(slice: &mut [T], source: &mut S) {
    for i in (1..slice.len()).rev() {
        let j = uniform_index(source, i + 1);
        slice.swap(i, j);
    }
}

// ============================================================================
// Tests
// ============================================================================
