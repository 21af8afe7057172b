//! Configuration for the drawdown calculator and the analysis pipeline.

use crate::{DrawdownError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default starting account balance.
pub const DEFAULT_INITIAL_BALANCE: f64 = 100_000.0;

/// Default fixed-deposit return per period (0.01% daily).
pub const DEFAULT_FD_RATE: f64 = 0.0001;

/// Parameters of the drawdown computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawdownConfig {
    /// Account balance before the first PnL row (default: 100000)
    pub initial_balance: f64,
    /// Fixed-deposit return compounded once per row (default: 0.0001)
    pub fd_rate: f64,
}

impl Default for DrawdownConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            fd_rate: DEFAULT_FD_RATE,
        }
    }
}

impl DrawdownConfig {
    /// Create a config with the given balance and rate.
    pub const fn new(initial_balance: f64, fd_rate: f64) -> Self {
        Self {
            initial_balance,
            fd_rate,
        }
    }

    /// Reject values that would poison every derived column.
    ///
    /// `fd_rate <= -1` makes the FD balance zero or sign-alternating.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_balance.is_finite() {
            return Err(DrawdownError::InvalidConfig(format!(
                "initial_balance must be finite, got {}",
                self.initial_balance
            )));
        }
        if !self.fd_rate.is_finite() || self.fd_rate <= -1.0 {
            return Err(DrawdownError::InvalidConfig(format!(
                "fd_rate must be finite and greater than -1, got {}",
                self.fd_rate
            )));
        }
        Ok(())
    }
}

/// Full configuration of one analysis run: calculator parameters plus file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Calculator parameters
    #[serde(flatten)]
    pub drawdown: DrawdownConfig,
    /// CSV with `date` and `pnl` columns
    pub input_path: PathBuf,
    /// Destination of the table with derived columns
    pub output_table_path: PathBuf,
    /// Destination of the SVG equity curve
    pub output_chart_path: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            drawdown: DrawdownConfig::default(),
            input_path: PathBuf::from("daily_pnl.csv"),
            output_table_path: PathBuf::from("output_with_stats.csv"),
            output_chart_path: PathBuf::from("equity_curve.svg"),
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a JSON file. Missing keys take their default values.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
