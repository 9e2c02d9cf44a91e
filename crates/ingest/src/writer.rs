use crate::error::LoadError;
use core_types::{TradeRecord, REQUIRED_COLUMNS};
use csv::WriterBuilder;
use std::fs;
use std::path::Path;
use tracing::info;

/// Header of the combined table: the export's columns plus the derived date.
pub const COMBINED_COLUMNS: [&str; 7] = [
    REQUIRED_COLUMNS[0],
    REQUIRED_COLUMNS[1],
    REQUIRED_COLUMNS[2],
    REQUIRED_COLUMNS[3],
    REQUIRED_COLUMNS[4],
    REQUIRED_COLUMNS[5],
    "Date",
];

/// Persists the combined collection as CSV.
///
/// The header is always written, so an empty collection still produces a
/// well-formed file. Missing parent directories are created.
pub fn write_combined(trades: &[TradeRecord], path: &Path) -> Result<(), LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(COMBINED_COLUMNS).map_err(csv_err)?;
    for trade in trades {
        writer.serialize(trade).map_err(csv_err)?;
    }
    writer.flush().map_err(io_err)?;

    info!(path = %path.display(), rows = trades.len(), "wrote combined trade table");
    Ok(())
}
