use anyhow::{Context, Result};
use clap::Parser;
use configuration::{load_config, logging, CliArgs};
use std::io;
use std::process::ExitCode;

/// The main entry point for the streak report.
///
/// Exits with 0 on success and 1 on any failure, printing the error chain to stderr.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    let cli = CliArgs::parse();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply_overrides(&cli);

    let _log_guard = logging::init(&config.logging)?;

    let run_config = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        streak_report::resolve_run_config(&config, &mut input, &mut io::stdout())?
    };

    let summary = streak_report::run(&run_config)?;

    println!("{}", summary.table);
    println!(
        "Wrote {}, {} and {} ({} winning / {} losing streaks found)",
        run_config.outputs.combined_trades.display(),
        run_config.outputs.statistics.display(),
        run_config.outputs.streaks.display(),
        summary.winning_streaks,
        summary.losing_streaks,
    );

    Ok(())
}
