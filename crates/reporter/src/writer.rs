use crate::error::ReportError;
use crate::render::{render_statistics, render_streaks};
use analytics::{RankedStreaks, TradeStatistics};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the statistics and streak reports to their configured paths.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    statistics_path: PathBuf,
    streaks_path: PathBuf,
}

impl ReportWriter {
    pub fn new(statistics_path: impl Into<PathBuf>, streaks_path: impl Into<PathBuf>) -> Self {
        Self {
            statistics_path: statistics_path.into(),
            streaks_path: streaks_path.into(),
        }
    }

    pub fn write_statistics(&self, stats: &TradeStatistics) -> Result<(), ReportError> {
        write_text(&self.statistics_path, &render_statistics(stats))?;
        info!(path = %self.statistics_path.display(), "wrote statistics report");
        Ok(())
    }

    pub fn write_streaks(&self, ranked: &RankedStreaks<'_>, requested: i64) -> Result<(), ReportError> {
        write_text(&self.streaks_path, &render_streaks(ranked, requested))?;
        info!(
            path = %self.streaks_path.display(),
            winning = ranked.winning.len(),
            losing = ranked.losing.len(),
            "wrote streak report"
        );
        Ok(())
    }
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}
