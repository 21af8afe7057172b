//! Tabular I/O over polars DataFrames.
//!
//! Input tables need a `date` and a `pnl` column; any other columns are
//! ignored. Output tables carry the two input columns followed by every
//! derived column, in the order of [`DerivedRecord`](crate::DerivedRecord).

use crate::{
    DrawdownError, DrawdownReport, Result,
    record::{DerivedRecord, PnlRecord},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Name of the trading day column.
pub const DATE_COLUMN: &str = "date";

/// Name of the daily profit-and-loss column.
pub const PNL_COLUMN: &str = "pnl";

/// Output date format.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date layouts accepted in the `date` column.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Timestamp layouts whose date part is accepted in the `date` column.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Read a PnL series from a CSV file with a header row.
pub fn read_pnl_csv(path: impl AsRef<Path>) -> Result<Vec<PnlRecord>> {
    let path = path.as_ref();
    // Surface a missing file as an I/O error rather than a reader error
    std::fs::metadata(path)?;

    // Infer column types from every row so a late fractional pnl is not
    // rejected by an integer schema guessed from the leading rows
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    tracing::info!(path = %path.display(), rows = df.height(), "loaded PnL table");
    pnl_records_from_frame(&df)
}

/// Extract PnL records from a DataFrame with `date` and `pnl` columns.
///
/// `date` may be a `Date` column or text in one of the accepted layouts;
/// `pnl` may be any numeric type. Null or unparseable cells are rejected
/// with the offending row index.
pub fn pnl_records_from_frame(df: &DataFrame) -> Result<Vec<PnlRecord>> {
    let dates = required_column(df, DATE_COLUMN)?.cast(&DataType::String)?;
    let pnl = required_column(df, PNL_COLUMN)?.cast(&DataType::Float64)?;
    let dates = dates.str()?;
    let pnl = pnl.f64()?;

    dates
        .into_iter()
        .zip(pnl)
        .enumerate()
        .map(|(row, (date, pnl))| {
            let date = date.ok_or_else(|| invalid_row(row, "missing date"))?;
            let date = parse_date(date)
                .ok_or_else(|| invalid_row(row, format!("unrecognized date '{date}'")))?;
            let pnl = pnl.ok_or_else(|| invalid_row(row, "missing or non-numeric pnl"))?;
            Ok(PnlRecord::new(date, pnl))
        })
        .collect()
}

/// Build the output table: input columns plus every derived column.
pub fn report_to_frame(records: &[PnlRecord], report: &DrawdownReport) -> Result<DataFrame> {
    let rows = &report.records;
    if records.len() != rows.len() {
        return Err(DrawdownError::LengthMismatch {
            records: records.len(),
            derived: rows.len(),
        });
    }

    let dates: Vec<String> = records
        .iter()
        .map(|r| r.date.format(DATE_FORMAT).to_string())
        .collect();
    let pnl: Vec<f64> = records.iter().map(|r| r.pnl).collect();

    let df = df!(
        DATE_COLUMN => dates,
        PNL_COLUMN => pnl,
        "balance" => floats(rows, |r| r.balance),
        "fd_balance" => floats(rows, |r| r.fd_balance),
        "adjusted_balance" => floats(rows, |r| r.adjusted_balance),
        "peak" => floats(rows, |r| r.peak),
        "drawdown" => floats(rows, |r| r.drawdown),
        "drawdown_percent" => floats(rows, |r| r.drawdown_percent),
        "in_drawdown" => rows.iter().map(|r| r.in_drawdown).collect::<Vec<bool>>(),
        "drawdown_streak_length" => counts(rows, |r| r.drawdown_streak_length),
        "profit_streak_length" => counts(rows, |r| r.profit_streak_length),
    )?;

    Ok(df)
}

/// Write the output table as CSV with a header row.
pub fn write_report_csv(
    path: impl AsRef<Path>,
    records: &[PnlRecord],
    report: &DrawdownReport,
) -> Result<()> {
    let path = path.as_ref();
    let mut df = report_to_frame(records, report)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    tracing::info!(path = %path.display(), rows = df.height(), "wrote drawdown table");
    Ok(())
}

fn required_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| DrawdownError::MissingColumn(name.to_string()))
}

fn invalid_row(row: usize, reason: impl Into<String>) -> DrawdownError {
    DrawdownError::InvalidRow {
        row,
        reason: reason.into(),
    }
}

fn floats(rows: &[DerivedRecord], field: impl Fn(&DerivedRecord) -> f64) -> Vec<f64> {
    rows.iter().map(field).collect()
}

fn counts(rows: &[DerivedRecord], field: impl Fn(&DerivedRecord) -> usize) -> Vec<u64> {
    rows.iter().map(|r| field(r) as u64).collect()
}

/// Parse a calendar date, accepting a timestamp's date part.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
