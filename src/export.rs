//! CSV serialization of sampling distributions and summaries.
//!
//! Values are written with two decimals, one row per line, `\n`
//! terminated.

use std::io::Write;

use crate::error::ExportError;
use crate::stats::SummaryStatistics;

/// Suggested file name for [`write_sampling_distribution_csv`].
pub const SAMPLING_DISTRIBUTION_FILE: &str = "sampling_distribution.csv";
/// Suggested file name for [`write_summary_csv`].
pub const SUMMARY_FILE: &str = "sampling_distribution_summary.csv";

/// `Sample,Mean` header followed by one 1-based row per mean.
///
/// # Examples
/// ```
/// use u_statlab::export::sampling_distribution_csv;
/// assert_eq!(sampling_distribution_csv(&[1.5, 2.25]), "Sample,Mean\n1,1.50\n2,2.25\n");
/// ```
pub fn sampling_distribution_csv(means: &[f64]) -> String {
    let mut out = String::with_capacity(12 + means.len() * 12);
    out.push_str("Sample,Mean\n");
    for (i, mean) in means.iter().enumerate() {
        out.push_str(&format!("{},{:.2}\n", i + 1, mean));
    }
    out
}

/// `Metric,Value` header followed by [`SummaryStatistics::rows`].
pub fn summary_csv(summary: &SummaryStatistics) -> String {
    let mut out = String::from("Metric,Value\n");
    for (label, value) in summary.rows() {
        out.push_str(&format!("{label},{value:.2}\n"));
    }
    out
}

pub fn write_sampling_distribution_csv<W: Write>(
    writer: &mut W,
    means: &[f64],
) -> Result<(), ExportError> {
    writer.write_all(sampling_distribution_csv(means).as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn write_summary_csv<W: Write>(
    writer: &mut W,
    summary: &SummaryStatistics,
) -> Result<(), ExportError> {
    writer.write_all(summary_csv(summary).as_bytes())?;
    writer.flush()?;
    Ok(())
}
