//! Drawdown and streak calculator.
//!
//! The calculator benchmarks a daily PnL series against a fixed deposit
//! compounding at `fd_rate` per row. Drawdown is measured on the adjusted
//! balance `balance - fd_balance`, so a flat account is in drawdown as soon
//! as the deposit overtakes it.

use crate::{
    DrawdownConfig, DrawdownError, Result,
    record::{DerivedRecord, PnlRecord},
    stats::SummaryStats,
    streak::{max_streak, streak_lengths},
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Derived rows and summary statistics for one PnL series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownReport {
    /// One derived row per input row, same order
    pub records: Vec<DerivedRecord>,
    /// Largest absolute drawdown of the adjusted balance
    pub max_drawdown: f64,
    /// Longest run of consecutive rows in drawdown
    pub max_drawdown_streak: usize,
    /// Descriptive statistics of `drawdown_streak_length`
    pub drawdown_streak_stats: SummaryStats,
    /// Descriptive statistics of `profit_streak_length`
    pub profit_streak_stats: SummaryStats,
}

/// Drawdown/streak calculator.
///
/// Computes, for each row `i`:
/// - `balance = initial_balance + Σ pnl[0..=i]`
/// - `fd_balance = initial_balance * (1 + fd_rate)^i`
/// - `adjusted_balance = balance - fd_balance`
/// - `peak = max(adjusted_balance[0..=i])`
/// - `drawdown = peak - adjusted_balance`
/// - `drawdown_percent = drawdown / peak` (`NaN` when `peak == 0`)
///
/// FD compounding uses the row index, not elapsed calendar days, so gaps in
/// the dates (weekends, holidays) do not accrue interest.
#[derive(Debug, Clone, Default)]
pub struct DrawdownCalculator {
    config: DrawdownConfig,
}

impl DrawdownCalculator {
    /// Create a calculator with the given configuration.
    pub const fn with_config(config: DrawdownConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub const fn config(&self) -> &DrawdownConfig {
        &self.config
    }

    /// Compute derived rows and summaries for an ordered PnL series.
    pub fn compute(&self, records: &[PnlRecord]) -> Result<DrawdownReport> {
        self.config.validate()?;
        if records.is_empty() {
            return Err(DrawdownError::EmptyInput);
        }
        if let Some(row) = records.iter().position(|r| !r.pnl.is_finite()) {
            return Err(DrawdownError::NonFinitePnl { row });
        }

        let DrawdownConfig {
            initial_balance,
            fd_rate,
        } = self.config;
        let growth = 1.0 + fd_rate;

        let pnl: Vec<f64> = records.iter().map(|r| r.pnl).collect();
        let fd_balance: Vec<f64> = (0..records.len())
            .map(|i| initial_balance * growth.powf(i as f64))
            .collect();

        let frame = df!(
            "pnl" => pnl,
            "fd_balance" => fd_balance,
        )?
        .lazy()
        .with_column((lit(initial_balance) + col("pnl").cum_sum(false)).alias("balance"))
        .with_column((col("balance") - col("fd_balance")).alias("adjusted_balance"))
        .with_column(col("adjusted_balance").cum_max(false).alias("peak"))
        .with_column((col("peak") - col("adjusted_balance")).alias("drawdown"))
        .collect()?;

        let balance = frame.column("balance")?.f64()?;
        let fd_balance = frame.column("fd_balance")?.f64()?;
        let adjusted_balance = frame.column("adjusted_balance")?.f64()?;
        let peak = frame.column("peak")?.f64()?;
        let drawdown = frame.column("drawdown")?.f64()?;

        let mut derived: Vec<DerivedRecord> = balance
            .into_no_null_iter()
            .zip(fd_balance.into_no_null_iter())
            .zip(adjusted_balance.into_no_null_iter())
            .zip(peak.into_no_null_iter())
            .zip(drawdown.into_no_null_iter())
            .map(
                |((((balance, fd_balance), adjusted_balance), peak), drawdown)| DerivedRecord {
                    balance,
                    fd_balance,
                    adjusted_balance,
                    peak,
                    drawdown,
                    drawdown_percent: if peak == 0.0 {
                        f64::NAN
                    } else {
                        drawdown / peak
                    },
                    in_drawdown: drawdown > 0.0,
                    drawdown_streak_length: 0,
                    profit_streak_length: 0,
                },
            )
            .collect();

        let drawdown_streaks = streak_lengths(derived.iter().map(|d| d.in_drawdown));
        let profit_streaks = streak_lengths(records.iter().map(|r| r.pnl > 0.0));
        for ((row, &dds), &profit) in derived
            .iter_mut()
            .zip(&drawdown_streaks)
            .zip(&profit_streaks)
        {
            row.drawdown_streak_length = dds;
            row.profit_streak_length = profit;
        }

        let max_drawdown = derived.iter().map(|d| d.drawdown).fold(0.0, f64::max);
        let max_drawdown_streak = max_streak(&drawdown_streaks);

        tracing::debug!(
            rows = derived.len(),
            max_drawdown,
            max_drawdown_streak,
            "computed drawdown statistics"
        );

        Ok(DrawdownReport {
            records: derived,
            max_drawdown,
            max_drawdown_streak,
            drawdown_streak_stats: SummaryStats::describe_lengths(&drawdown_streaks),
            profit_streak_stats: SummaryStats::describe_lengths(&profit_streaks),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn series(pnl: &[f64]) -> Vec<PnlRecord> {
        pnl.iter()
            .enumerate()
            .map(|(i, &pnl)| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap();
                PnlRecord::new(date, pnl)
            })
            .collect()
    }

    #[test]
    fn test_reference_scenario() {
        let calculator = DrawdownCalculator::default();
        let report = calculator
            .compute(&series(&[500.0, -200.0, -400.0, 300.0, -100.0]))
            .unwrap();
        let rows = &report.records;

        let balances: Vec<f64> = rows.iter().map(|r| r.balance).collect();
        assert_eq!(
            balances,
            vec![100_500.0, 100_300.0, 99_900.0, 100_200.0, 100_100.0]
        );

        let expected_fd = [100_000.0, 100_010.0, 100_020.001, 100_030.003_000_1, 100_040.006_000_4];
        for (row, fd) in rows.iter().zip(expected_fd) {
            assert_relative_eq!(row.fd_balance, fd, epsilon = 1e-6);
            assert_relative_eq!(row.adjusted_balance, row.balance - row.fd_balance);
            assert_relative_eq!(row.peak, 500.0);
        }

        assert_relative_eq!(rows[1].drawdown, 210.0, epsilon = 1e-6);
        assert_relative_eq!(rows[2].drawdown, 620.001, epsilon = 1e-6);
        assert_relative_eq!(rows[3].drawdown, 330.003_000_1, epsilon = 1e-6);
        assert_relative_eq!(rows[4].drawdown, 440.006_000_4, epsilon = 1e-6);
        assert_relative_eq!(rows[2].drawdown_percent, 620.001 / 500.0, epsilon = 1e-9);

        let in_dd: Vec<bool> = rows.iter().map(|r| r.in_drawdown).collect();
        assert_eq!(in_dd, vec![false, true, true, true, true]);

        let dds: Vec<usize> = rows.iter().map(|r| r.drawdown_streak_length).collect();
        assert_eq!(dds, vec![0, 1, 2, 3, 4]);
        assert_eq!(report.max_drawdown_streak, 4);

        let profit: Vec<usize> = rows.iter().map(|r| r.profit_streak_length).collect();
        assert_eq!(profit, vec![1, 0, 0, 1, 0]);

        assert_relative_eq!(report.max_drawdown, 620.001, epsilon = 1e-6);
        assert_eq!(report.drawdown_streak_stats.count, 5);
        assert_relative_eq!(report.drawdown_streak_stats.mean, 2.0);
        assert_relative_eq!(report.profit_streak_stats.max, 1.0);
    }

    #[test]
    fn test_empty_input() {
        let err = DrawdownCalculator::default().compute(&[]).unwrap_err();
        assert!(matches!(err, DrawdownError::EmptyInput));
    }

    #[test]
    fn test_single_row() {
        let report = DrawdownCalculator::default()
            .compute(&series(&[-250.0]))
            .unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.max_drawdown, 0.0);
        assert_eq!(report.max_drawdown_streak, 0);
        assert_eq!(report.drawdown_streak_stats.count, 1);
        assert!(report.drawdown_streak_stats.std.is_nan());
        assert_eq!(report.records[0].profit_streak_length, 0);
    }

    #[test]
    fn test_zero_peak_gives_nan_percent() {
        let calculator = DrawdownCalculator::with_config(DrawdownConfig::new(1_000.0, 0.0));
        let report = calculator.compute(&series(&[0.0, -10.0, 10.0])).unwrap();
        let rows = &report.records;

        assert_eq!(rows[0].peak, 0.0);
        assert!(rows[0].drawdown_percent.is_nan());
        assert!(rows[1].drawdown_percent.is_nan());
        assert_relative_eq!(rows[1].drawdown, 10.0);
        assert!(rows[1].in_drawdown);
        assert!(!rows[2].in_drawdown);
    }

    #[test]
    fn test_non_finite_pnl_rejected() {
        let err = DrawdownCalculator::default()
            .compute(&series(&[1.0, f64::NAN]))
            .unwrap_err();
        assert!(matches!(err, DrawdownError::NonFinitePnl { row: 1 }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let calculator = DrawdownCalculator::with_config(DrawdownConfig::new(100_000.0, -2.0));
        let err = calculator.compute(&series(&[1.0])).unwrap_err();
        assert!(matches!(err, DrawdownError::InvalidConfig(_)));
    }

    #[rstest]
    #[case(&[120.0, -80.0, 45.0, -300.0, 10.0, 10.0, 500.0, -20.0, -5.0, 0.0])]
    #[case(&[-1.0, -1.0, -1.0, -1.0])]
    #[case(&[3.0, 3.0, 3.0, 3.0])]
    fn test_invariants(#[case] pnl: &[f64]) {
        let records = series(pnl);
        let calculator = DrawdownCalculator::default();
        let report = calculator.compute(&records).unwrap();
        let rows = &report.records;

        for (i, row) in rows.iter().enumerate() {
            assert!(row.peak >= row.adjusted_balance);
            assert!(row.drawdown >= 0.0);
            assert_eq!(row.in_drawdown, row.drawdown > 0.0);
            if i > 0 {
                assert!(row.peak >= rows[i - 1].peak);
            }

            let pnl = records[i].pnl;
            if pnl <= 0.0 {
                assert_eq!(row.profit_streak_length, 0);
            } else if i == 0 || records[i - 1].pnl <= 0.0 {
                assert_eq!(row.profit_streak_length, 1);
            } else {
                assert_eq!(row.profit_streak_length, rows[i - 1].profit_streak_length + 1);
            }

            if !row.in_drawdown {
                assert_eq!(row.drawdown_streak_length, 0);
            } else if i == 0 || !rows[i - 1].in_drawdown {
                assert_eq!(row.drawdown_streak_length, 1);
            } else {
                assert_eq!(row.drawdown_streak_length, rows[i - 1].drawdown_streak_length + 1);
            }
        }

        let max = rows.iter().map(|r| r.drawdown).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(report.max_drawdown, max);

        // Pure function of its inputs
        let again = calculator.compute(&records).unwrap();
        for (a, b) in again.records.iter().zip(rows) {
            assert_eq!(a.balance.to_bits(), b.balance.to_bits());
            assert_eq!(a.drawdown.to_bits(), b.drawdown.to_bits());
            assert_eq!(a.drawdown_percent.to_bits(), b.drawdown_percent.to_bits());
        }
    }
}
