//! CSV bar history, one file per symbol

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use gnat_core::Bar;
use gnat_ports::{Storage, StorageError};
use log::debug;

pub const DEFAULT_STORAGE_DIR: &str = "gnat_storage";
pub const CSV_HEADER: &str = "timestamp,open,high,low,close,volume";

#[derive(Debug, Clone)]
pub struct CsvStorage {
    dir: PathBuf,
}

impl CsvStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the history of `symbol`
    ///
    /// Path separators in the symbol become `_`, so the file always lands
    /// directly inside the storage directory.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        let name: String = symbol
            .chars()
            .map(|c| if std::path::is_separator(c) || c == ':' { '_' } else { c })
            .collect();
        self.dir.join(format!("{}.csv", name))
    }
}

impl Default for CsvStorage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_DIR)
    }
}

impl Storage for CsvStorage {
    fn append(&mut self, bar: &Bar) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&bar.symbol);
        let is_new = !path.exists();

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        if is_new {
            debug!("Creating history file {}", path.display());
            writeln!(file, "{}", CSV_HEADER)?;
        }
        writeln!(
            file,
            "{},{},{},{},{},{}",
            bar.timestamp.to_rfc3339(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn bar(symbol: &str, minute: u32) -> Bar {
        Bar {
            symbol: symbol.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 15, minute, 0).unwrap(),
            open: dec!(10.5),
            high: dec!(11),
            low: dec!(10),
            close: dec!(10.75),
            volume: dec!(1200),
        }
    }

    #[test]
    fn test_writes_header_once_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = CsvStorage::new(dir.path().join("history"));

        storage.append(&bar("AAPL", 0)).unwrap();
        storage.append(&bar("AAPL", 1)).unwrap();

        let contents = fs::read_to_string(storage.path_for("AAPL")).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "2024-01-02T15:00:00+00:00,10.5,11,10,10.75,1200");
    }

    #[test]
    fn test_one_file_per_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = CsvStorage::new(dir.path());

        storage.append(&bar("AAPL", 0)).unwrap();
        storage.append(&bar("@DOGE", 0)).unwrap();

        assert!(dir.path().join("AAPL.csv").exists());
        assert!(dir.path().join("@DOGE.csv").exists());
    }

    #[test]
    fn test_symbol_separators_stay_inside_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = CsvStorage::new(dir.path().join("history"));

        storage.append(&bar("BRK/B", 0)).unwrap();
        assert_eq!(storage.path_for("BRK/B"), dir.path().join("history").join("BRK_B.csv"));
        assert!(storage.path_for("BRK/B").exists());

        let escaped = storage.path_for("../../etc/x");
        assert_eq!(escaped.parent(), Some(storage.dir()));
        storage.append(&bar("../x", 0)).unwrap();
        assert!(!dir.path().join("x.csv").exists());
        assert!(dir.path().join("history").join(".._x.csv").exists());
    }
}
