use analytics::{AnalyticsEngine, StreakDetector, TradeStatistics};
use anyhow::{Context, Result};
use comfy_table::Table;
use configuration::RunConfig;
use ingest::{write_combined, TradeLoader};
use reporter::{summary_table, ReportWriter};
use tracing::info;

/// What a finished run reports back to the caller.
#[derive(Debug)]
pub struct RunSummary {
    pub statistics: TradeStatistics,
    pub winning_streaks: usize,
    pub losing_streaks: usize,
    /// Headline statistics and ranked streaks, ready to print.
    pub table: Table,
}

/// Runs the whole batch: load, combine, analyse, rank, and write every artifact.
///
/// Any load, analysis or write failure aborts the run; an empty input is not a
/// failure. Nothing is written until every stage has succeeded, so a failed run
/// leaves the previous artifacts untouched.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    info!(input = %config.input_dir.display(), top_n = config.top_n, "starting streak report");

    // 1. Load
    let trades = TradeLoader::new(&config.file_marker)
        .excluding(&config.outputs.combined_trades)
        .load(&config.input_dir)
        .context("failed to load closed-position files")?;

    // 2. Statistics
    let statistics = AnalyticsEngine::new()
        .calculate(&trades)
        .context("failed to calculate trade statistics")?;

    // 3. Streaks, over a chronological copy so the combined table keeps load order
    let mut chronological = trades.clone();
    let streaks = StreakDetector::new()
        .detect(&mut chronological)
        .context("failed to detect winning and losing streaks")?;
    let ranked = streaks.rank(config.top_count());

    // 4. Artifacts
    write_combined(&trades, &config.outputs.combined_trades)
        .context("failed to write the combined trade table")?;
    let writer = ReportWriter::new(&config.outputs.statistics, &config.outputs.streaks);
    writer.write_statistics(&statistics)?;
    writer.write_streaks(&ranked, config.top_n)?;

    info!(
        trades = statistics.total_trades,
        streaks = streaks.len(),
        "streak report complete"
    );

    Ok(RunSummary {
        winning_streaks: streaks.winning().count(),
        losing_streaks: streaks.losing().count(),
        table: summary_table(&statistics, &ranked),
        statistics,
    })
}
