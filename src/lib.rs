//! # streak-report
//!
//! Combines closed-position exports, computes headline statistics, and ranks
//! the most profitable and most costly winning/losing streaks.
//!
//! The binary is a thin shell over [`pipeline::run`]; the interactive prompts
//! live in [`prompt`].

pub mod pipeline;
pub mod prompt;

pub use pipeline::{run, RunSummary};
pub use prompt::resolve_run_config;
