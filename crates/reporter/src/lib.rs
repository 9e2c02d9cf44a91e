//! Text artifacts for a trade-log run: the statistics report, the streak
//! report, and a terminal summary table.
//!
//! Rendering is pure and returns strings; `ReportWriter` adds the file I/O.

pub mod error;
pub mod render;
pub mod table;
pub mod writer;

pub use error::ReportError;
pub use render::{render_statistics, render_streaks};
pub use table::summary_table;
pub use writer::ReportWriter;
