//! Input and derived row types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of profit and loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlRecord {
    /// Trading day
    pub date: NaiveDate,
    /// Profit or loss realized on that day
    pub pnl: f64,
}

impl PnlRecord {
    /// Create a record for the given day.
    pub const fn new(date: NaiveDate, pnl: f64) -> Self {
        Self { date, pnl }
    }
}

/// Per-day statistics derived from a [`PnlRecord`] and everything before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    /// `initial_balance` plus cumulative PnL up to and including this row
    pub balance: f64,
    /// Fixed-deposit benchmark compounded by row index
    pub fd_balance: f64,
    /// `balance - fd_balance`
    pub adjusted_balance: f64,
    /// Running maximum of `adjusted_balance`
    pub peak: f64,
    /// `peak - adjusted_balance`, never negative
    pub drawdown: f64,
    /// `drawdown / peak`, `NaN` when `peak == 0`
    pub drawdown_percent: f64,
    /// Whether `drawdown > 0`
    pub in_drawdown: bool,
    /// Consecutive rows in drawdown ending here, 0 outside drawdown
    pub drawdown_streak_length: usize,
    /// Consecutive rows with `pnl > 0` ending here, 0 on a non-positive day
    pub profit_streak_length: usize,
}
