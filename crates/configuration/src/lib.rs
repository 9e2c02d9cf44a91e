use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    CliArgs, Config, InputSettings, LoggingSettings, OutputPaths, OutputSettings, ReportSettings,
    RunConfig,
};

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "streak-report.toml";

/// Prefix for environment overrides, e.g. `STREAKS__INPUT__FOLDER`.
pub const ENV_PREFIX: &str = "STREAKS";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the config file, then
/// `STREAKS__<SECTION>__<KEY>` environment variables. An explicit `path` must
/// exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => config::File::from(p.to_path_buf()).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
