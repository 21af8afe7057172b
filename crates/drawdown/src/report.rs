//! Console summary of a drawdown report.

use crate::{DrawdownError, DrawdownReport, Result};
use std::path::Path;
use url::Url;

/// Render the maximum drawdown, maximum streak and both streak summaries.
pub fn format_summary(report: &DrawdownReport) -> String {
    format!(
        "Maximum Drawdown (w.r.t FD): {}\n\
         Maximum Drawdown Streak (DDS, w.r.t FD): {}\n\
         \n\
         Drawdown Streak Stats:\n\
         {}\n\
         \n\
         Profit Streak Stats:\n\
         {}",
        report.max_drawdown,
        report.max_drawdown_streak,
        report.drawdown_streak_stats,
        report.profit_streak_stats,
    )
}

/// Build a `file://` link to the chart, resolving relative paths against
/// the current directory.
pub fn chart_link(path: impl AsRef<Path>) -> Result<Url> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path)?;
    Url::from_file_path(&absolute)
        .map_err(|()| DrawdownError::InvalidPath(absolute.display().to_string()))
}

/// Line announcing where the chart was written.
pub fn format_chart_notice(link: &Url) -> String {
    format!("Equity curve graph saved. Open the graph from this link: {link}")
}
