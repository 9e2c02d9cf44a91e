use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The root configuration structure for the entire application.
///
/// Every section is optional in the TOML file; omitted sections fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputSettings,
    pub report: ReportSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

/// Where the closed-position exports live and how to recognise them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Directory holding the exports. Prompted for when absent.
    pub folder: Option<PathBuf>,
    /// Substring a file name must contain to be loaded.
    pub file_marker: String,
}

/// Parameters for the streak report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// How many streaks of each kind to report. Prompted for when absent.
    pub top_n: Option<i64>,
}

/// Names of the generated artifacts, relative to `directory`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub combined_trades: String,
    pub statistics: String,
    pub streaks: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Optional file that receives a copy of every log line.
    pub file: Option<PathBuf>,
}

// --- Default Implementations ---

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            folder: None,
            file_marker: "closePosition".to_string(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            combined_trades: "combined_closePosition.csv".to_string(),
            statistics: "combined_stats.txt".to_string(),
            streaks: "combined_winning_losing.txt".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Rejects settings that would make the run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.file_marker.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "input.file_marker must not be empty".to_string(),
            ));
        }

        let names = [
            ("output.combined_trades", &self.output.combined_trades),
            ("output.statistics", &self.output.statistics),
            ("output.streaks", &self.output.streaks),
        ];
        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{field} must not be empty")));
            }
        }

        Ok(())
    }

    /// Applies command-line overrides on top of file and environment settings.
    pub fn apply_overrides(&mut self, args: &CliArgs) {
        if let Some(folder) = &args.folder {
            self.input.folder = Some(folder.clone());
        }
        if let Some(top) = args.top {
            self.report.top_n = Some(top);
        }
        if let Some(dir) = &args.output_dir {
            self.output.directory = dir.clone();
        }
        if let Some(file) = &args.log_file {
            self.logging.file = Some(file.clone());
        }
    }
}

/// Command-line overrides. Every flag is optional; missing values come from
/// the config file, the environment, or an interactive prompt.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
#[cfg_attr(
    feature = "clap",
    command(author, version, about = "Combine closed-position exports and rank winning/losing streaks", long_about = None)
)]
pub struct CliArgs {
    /// Directory containing the closePosition exports.
    #[cfg_attr(feature = "clap", arg(long, short))]
    pub folder: Option<PathBuf>,

    /// Number of winning and losing streaks to report.
    #[cfg_attr(feature = "clap", arg(long, short = 'n', allow_negative_numbers = true))]
    pub top: Option<i64>,

    /// Directory the report files are written to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub output_dir: Option<PathBuf>,

    /// Configuration file to use instead of `streak-report.toml`.
    #[cfg_attr(feature = "clap", arg(long, short))]
    pub config: Option<PathBuf>,

    /// Also write logs to this file.
    #[cfg_attr(feature = "clap", arg(long))]
    pub log_file: Option<PathBuf>,
}

/// Resolved paths of the three generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub combined_trades: PathBuf,
    pub statistics: PathBuf,
    pub streaks: PathBuf,
}

impl OutputPaths {
    pub fn from_settings(settings: &OutputSettings) -> Self {
        Self {
            combined_trades: settings.directory.join(&settings.combined_trades),
            statistics: settings.directory.join(&settings.statistics),
            streaks: settings.directory.join(&settings.streaks),
        }
    }
}

/// Fully-resolved settings for a single report run.
///
/// This only exists once the input folder and streak count are known, so every
/// stage downstream of the CLI can rely on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub file_marker: String,
    /// Requested streak count as given by the operator. Non-positive means none.
    pub top_n: i64,
    pub outputs: OutputPaths,
}

impl RunConfig {
    pub fn new(config: &Config, input_dir: impl AsRef<Path>, top_n: i64) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            file_marker: config.input.file_marker.clone(),
            top_n,
            outputs: OutputPaths::from_settings(&config.output),
        }
    }

    /// The streak count as a length, clamping negatives to zero.
    pub fn top_count(&self) -> usize {
        usize::try_from(self.top_n).unwrap_or(0)
    }
}
