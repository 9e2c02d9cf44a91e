use crate::error::LoadError;
use core_types::{RawTradeRow, TradeRecord, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Tabular layouts the loader understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Csv,
    Tsv,
}

impl TabularFormat {
    /// Recognises `.csv` and `.tsv`, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(TabularFormat::Csv),
            "tsv" => Some(TabularFormat::Tsv),
            _ => None,
        }
    }

    pub fn delimiter(&self) -> u8 {
        match self {
            TabularFormat::Csv => b',',
            TabularFormat::Tsv => b'\t',
        }
    }
}

/// Loads every closed-position export in a directory into one collection.
#[derive(Debug, Clone)]
pub struct TradeLoader {
    file_marker: String,
    exclude: Option<PathBuf>,
}

impl TradeLoader {
    pub fn new(file_marker: impl Into<String>) -> Self {
        Self {
            file_marker: file_marker.into(),
            exclude: None,
        }
    }

    /// Never load `path`, even if its name matches. Used to keep the combined
    /// output from being ingested on the next run.
    pub fn excluding(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude = Some(path.into());
        self
    }

    /// Reads all matching files in `dir`, in file-name order.
    ///
    /// A directory with no matching files yields an empty collection.
    pub fn load(&self, dir: &Path) -> Result<Vec<TradeRecord>, LoadError> {
        let files = discover_files(dir, &self.file_marker, self.exclude.as_deref())?;
        if files.is_empty() {
            warn!(dir = %dir.display(), marker = %self.file_marker, "no matching trade files found");
        }

        let mut trades = Vec::new();
        for path in &files {
            let loaded = load_file(path)?;
            debug!(file = %path.display(), rows = loaded.len(), "loaded trade file");
            trades.extend(loaded);
        }

        info!(files = files.len(), trades = trades.len(), "combined closed positions");
        Ok(trades)
    }
}

/// Lists the regular files in `dir` whose name contains `marker` and whose
/// extension is a recognised tabular format, sorted by file name.
pub fn discover_files(
    dir: &Path,
    marker: &str,
    exclude: Option<&Path>,
) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
    }

    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let excluded = exclude.and_then(|p| fs::canonicalize(p).ok());

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();

        let name_matches = entry.file_name().to_str().is_some_and(|n| n.contains(marker));
        if !name_matches || !path.is_file() || TabularFormat::from_path(&path).is_none() {
            continue;
        }

        if excluded.is_some() && fs::canonicalize(&path).ok() == excluded {
            warn!(file = %path.display(), "skipping previous combined output");
            continue;
        }

        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Parses one export into validated trade records.
///
/// Fails on the first missing column or unparseable field, reporting the file
/// and the line number of the offending row.
pub fn load_file(path: &Path) -> Result<Vec<TradeRecord>, LoadError> {
    let format =
        TabularFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter())
        .trim(Trim::All)
        .from_reader(file);

    let headers = reader.headers().map_err(csv_err)?.clone();
    check_columns(path, &headers)?;

    let mut trades = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let row: RawTradeRow = record.deserialize(Some(&headers)).map_err(csv_err)?;
        let trade = TradeRecord::try_from(row).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            line,
            source,
        })?;
        trades.push(trade);
    }

    Ok(trades)
}

fn check_columns(path: &Path, headers: &StringRecord) -> Result<(), LoadError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "Key,ExitTime,Symbol,EntryPrice,Quantity,Pnl";

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn discovers_only_matching_tabular_files_in_name_order() {
        let dir = tempdir().unwrap();
        write(dir.path(), "b_closePosition.csv", HEADER);
        write(dir.path(), "a_closePosition.CSV", HEADER);
        write(dir.path(), "c_closePosition.tsv", HEADER);
        write(dir.path(), "closePosition.txt", HEADER);
        write(dir.path(), "openPosition.csv", HEADER);
        fs::create_dir(dir.path().join("dir_closePosition.csv")).unwrap();

        let files = discover_files(dir.path(), "closePosition", None).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            names,
            ["a_closePosition.CSV", "b_closePosition.csv", "c_closePosition.tsv"]
        );
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = discover_files(&missing, "closePosition", None).unwrap_err();
        assert!(matches!(err, LoadError::DirectoryNotFound(p) if p == missing));
    }

    #[test]
    fn excluded_output_is_skipped() {
        let dir = tempdir().unwrap();
        write(dir.path(), "day1_closePosition.csv", HEADER);
        let combined = write(dir.path(), "combined_closePosition.csv", HEADER);

        let files = discover_files(dir.path(), "closePosition", Some(&combined)).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("day1_closePosition.csv"));
    }

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "x_closePosition.csv",
            "Key, ExitTime ,Symbol,EntryPrice,Quantity,Pnl,Side\n\
             1,2024-01-02 09:30:00,ETHUSDT,2300.5,2,15.25,Long\n\
             2,2024-01-03 16:00:00,BTCUSDT,42000,0.1,-8,Short\n",
        );

        let trades = load_file(&path).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].symbol, "ETHUSDT");
        assert_eq!(trades[0].pnl, dec!(15.25));
        assert_eq!(trades[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(trades[1].quantity, dec!(0.1));
    }

    #[test]
    fn reads_tab_separated_files() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "x_closePosition.tsv",
            "Key\tExitTime\tSymbol\tEntryPrice\tQuantity\tPnl\n7\t2024-02-01 10:00:00\tSOLUSDT\t100\t3\t-1.5\n",
        );

        let trades = load_file(&path).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].pnl, dec!(-1.5));
    }

    #[test]
    fn missing_column_fails_the_load() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "x_closePosition.csv",
            "Key,ExitTime,Symbol,EntryPrice,Quantity\n1,2024-01-02 09:30:00,ETHUSDT,1,1\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "Pnl", .. }));
    }

    #[test]
    fn bad_timestamp_reports_file_and_line() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "x_closePosition.csv",
            "Key,ExitTime,Symbol,EntryPrice,Quantity,Pnl\n\
             1,2024-01-02 09:30:00,ETHUSDT,1,1,1\n\
             2,garbage,ETHUSDT,1,1,1\n",
        );

        let err = load_file(&path).unwrap_err();
        match err {
            LoadError::Parse { line, source, .. } => {
                assert_eq!(line, 3);
                assert_eq!(source.column, "ExitTime");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn loader_combines_files_and_tolerates_empty_directory() {
        let dir = tempdir().unwrap();
        let loader = TradeLoader::new("closePosition");
        assert!(loader.load(dir.path()).unwrap().is_empty());

        write(
            dir.path(),
            "2_closePosition.csv",
            &format!("{HEADER}\nb,2024-01-01 12:00:00,X,1,1,2\n"),
        );
        write(
            dir.path(),
            "1_closePosition.csv",
            &format!("{HEADER}\na,2024-01-02 12:00:00,X,1,1,-3\n"),
        );

        let trades = loader.load(dir.path()).unwrap();
        let keys: Vec<_> = trades.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
