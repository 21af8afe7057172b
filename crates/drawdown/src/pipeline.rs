//! End-to-end analysis: load, compute, write table and chart.

use crate::{
    AnalysisConfig, DrawdownCalculator, DrawdownReport, Result,
    chart::write_equity_curve,
    frame::{read_pnl_csv, write_report_csv},
    record::PnlRecord,
    report::chart_link,
};
use std::path::Path;
use url::Url;

/// Output of a completed analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Input rows as loaded
    pub records: Vec<PnlRecord>,
    /// Derived rows and summaries
    pub report: DrawdownReport,
    /// `file://` link to the written chart
    pub chart_link: Url,
}

/// Run the whole analysis described by `config`.
///
/// Nothing is written unless the computation succeeds, so an empty input
/// leaves no table or chart behind.
pub fn analyze(config: &AnalysisConfig) -> Result<Analysis> {
    config.drawdown.validate()?;

    let records = read_pnl_csv(&config.input_path)?;
    let report = DrawdownCalculator::with_config(config.drawdown).compute(&records)?;
    tracing::info!(
        rows = records.len(),
        max_drawdown = report.max_drawdown,
        max_drawdown_streak = report.max_drawdown_streak,
        "drawdown analysis complete"
    );

    ensure_parent_dir(&config.output_table_path)?;
    write_report_csv(&config.output_table_path, &records, &report)?;

    ensure_parent_dir(&config.output_chart_path)?;
    write_equity_curve(&config.output_chart_path, &records, &report)?;
    let chart_link = chart_link(&config.output_chart_path)?;

    Ok(Analysis {
        records,
        report,
        chart_link,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawdownConfig, DrawdownError};
    use std::path::PathBuf;

    fn workspace(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fd-drawdown-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config_in(dir: &Path) -> AnalysisConfig {
        AnalysisConfig {
            drawdown: DrawdownConfig::default(),
            input_path: dir.join("daily_pnl.csv"),
            output_table_path: dir.join("out").join("output_with_stats.csv"),
            output_chart_path: dir.join("out").join("equity_curve.svg"),
        }
    }

    #[test]
    fn test_analyze_writes_artifacts() {
        let dir = workspace("analyze");
        let config = config_in(&dir);
        std::fs::write(
            &config.input_path,
            "date,pnl\n2024-01-01,500\n2024-01-02,-200\n2024-01-03,-400\n2024-01-04,300\n2024-01-05,-100\n",
        )
        .unwrap();

        let analysis = analyze(&config).unwrap();

        assert_eq!(analysis.records.len(), 5);
        assert_eq!(analysis.report.max_drawdown_streak, 4);
        assert!(config.output_table_path.exists());
        assert!(config.output_chart_path.exists());
        assert_eq!(
            analysis.chart_link.to_file_path().unwrap(),
            config.output_chart_path
        );

        let table = std::fs::read_to_string(&config.output_table_path).unwrap();
        assert_eq!(table.lines().count(), 6);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let dir = workspace("empty");
        let config = config_in(&dir);
        std::fs::write(&config.input_path, "date,pnl\n").unwrap();

        let err = analyze(&config).unwrap_err();

        assert!(matches!(err, DrawdownError::EmptyInput));
        assert!(!config.output_table_path.exists());
        assert!(!config.output_chart_path.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = workspace("missing");
        let config = config_in(&dir);

        let err = analyze(&config).unwrap_err();

        assert!(matches!(err, DrawdownError::Io(_)));
        assert!(!config.output_table_path.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
