#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fd-drawdown/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod calculator;
pub mod chart;
pub mod config;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod stats;
pub mod streak;

// Re-export core types
pub use calculator::{DrawdownCalculator, DrawdownReport};
pub use chart::{render_equity_curve, write_equity_curve};
pub use config::{AnalysisConfig, DEFAULT_FD_RATE, DEFAULT_INITIAL_BALANCE, DrawdownConfig};
pub use error::{DrawdownError, Result};
pub use frame::{pnl_records_from_frame, read_pnl_csv, report_to_frame, write_report_csv};
pub use pipeline::{Analysis, analyze};
pub use record::{DerivedRecord, PnlRecord};
pub use report::{chart_link, format_chart_notice, format_summary};
pub use stats::SummaryStats;
pub use streak::{max_streak, streak_lengths};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
