//! # Closed-Position Loader
//!
//! Discovers closed-position exports in a directory, validates every row into a
//! `TradeRecord`, and persists the combined table.
//!
//! Files are processed in file-name order. Any missing column or unparseable
//! field aborts the whole load; nothing is silently skipped.

pub mod error;
pub mod loader;
pub mod writer;

pub use error::LoadError;
pub use loader::{discover_files, load_file, TabularFormat, TradeLoader};
pub use writer::{write_combined, COMBINED_COLUMNS};
