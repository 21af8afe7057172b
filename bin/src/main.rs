//! CLI for the fd-drawdown analysis library.
//!
//! Reads a daily PnL table, computes drawdown and streak statistics against a
//! fixed-deposit benchmark, writes the derived table and the equity curve, and
//! prints a summary.

use clap::{Args, Parser, Subcommand};
use fd_drawdown::{AnalysisConfig, analyze, format_chart_notice, format_summary};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fd-drawdown")]
#[command(about = "Drawdown and streak statistics for daily PnL against a fixed deposit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analysis and write the table and chart
    Analyze(AnalysisArgs),
    /// Print the effective configuration as JSON
    Config(AnalysisArgs),
}

/// Settings shared by every subcommand. Flags override values from `--config`.
#[derive(Args, Debug, Default)]
struct AnalysisArgs {
    /// JSON config file to start from
    #[arg(long)]
    config: Option<PathBuf>,
    /// CSV with `date` and `pnl` columns
    #[arg(long)]
    input: Option<PathBuf>,
    /// Destination of the derived table
    #[arg(long)]
    output_table: Option<PathBuf>,
    /// Destination of the SVG equity curve
    #[arg(long)]
    output_chart: Option<PathBuf>,
    /// Starting account balance
    #[arg(long)]
    initial_balance: Option<f64>,
    /// Fixed-deposit return per row
    #[arg(long, allow_hyphen_values = true)]
    fd_rate: Option<f64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "fd_drawdown=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Analyze(args) => run_analysis(&args),
        Commands::Config(args) => show_config(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Build the configuration from an optional file plus flag overrides.
fn resolve_config(args: &AnalysisArgs) -> fd_drawdown::Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load_from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(input) = &args.input {
        config.input_path = input.clone();
    }
    if let Some(table) = &args.output_table {
        config.output_table_path = table.clone();
    }
    if let Some(chart) = &args.output_chart {
        config.output_chart_path = chart.clone();
    }
    if let Some(balance) = args.initial_balance {
        config.drawdown.initial_balance = balance;
    }
    if let Some(rate) = args.fd_rate {
        config.drawdown.fd_rate = rate;
    }

    config.drawdown.validate()?;
    Ok(config)
}

/// Run the analysis and print the summary.
fn run_analysis(args: &AnalysisArgs) -> fd_drawdown::Result<()> {
    let config = resolve_config(args)?;
    tracing::info!(input = %config.input_path.display(), "starting drawdown analysis");

    let analysis = analyze(&config)?;

    println!("{}", format_summary(&analysis.report));
    println!();
    println!("{}", format_chart_notice(&analysis.chart_link));
    println!(
        "Derived table saved to {}",
        config.output_table_path.display()
    );
    Ok(())
}

/// Print the effective configuration.
fn show_config(args: &AnalysisArgs) -> fd_drawdown::Result<()> {
    let config = resolve_config(args)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
