//! Entry and goal persistence
//!
//! The core never performs I/O itself; callers load a snapshot through an
//! [`EntryStore`], run computations on it, and save the result back.
//!
//! [`JsonStore`] keeps two pretty-printed JSON files in a data directory:
//! `entries.json` and `goals.json`. A missing file reads as an empty list.
//! Writes go to a temp file in the same directory and are renamed into
//! place, so a crash never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Entry, Goal};

const ENTRIES_FILE: &str = "entries.json";
const GOALS_FILE: &str = "goals.json";

/// Repository for entry and goal collections
pub trait EntryStore {
    fn load(&self) -> Result<Vec<Entry>>;

    fn load_goals(&self) -> Result<Vec<Goal>>;

    /// Replace the stored entries
    fn save(&self, entries: &[Entry]) -> Result<()>;

    /// Replace the stored goals
    fn save_goals(&self, goals: &[Goal]) -> Result<()>;
}

/// JSON files in a local directory
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Open a store, creating the directory if it doesn't exist
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| {
                Error::InvalidData(format!(
                    "Failed to create data directory {}: {}",
                    data_dir.display(),
                    e
                ))
            })?;
            info!("Created data directory: {}", data_dir.display());
        }

        Ok(Self { data_dir })
    }

    /// Platform default location (~/.local/share/carbon on Linux)
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|d| d.join("carbon"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_list<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(name);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::InvalidData(format!("Corrupt store file {}: {}", path.display(), e))
        })
    }

    fn write_list<T: Serialize>(&self, name: &str, items: &[T]) -> Result<()> {
        let path = self.data_dir.join(name);
        let tmp = NamedTempFile::new_in(&self.data_dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, items)?;
            writer.flush()?;
        }
        tmp.persist(&path).map_err(|e| e.error)?;

        info!(count = items.len(), "Saved {}", path.display());
        Ok(())
    }
}

impl EntryStore for JsonStore {
    fn load(&self) -> Result<Vec<Entry>> {
        self.read_list(ENTRIES_FILE)
    }

    fn load_goals(&self) -> Result<Vec<Goal>> {
        self.read_list(GOALS_FILE)
    }

    fn save(&self, entries: &[Entry]) -> Result<()> {
        self.write_list(ENTRIES_FILE, entries)
    }

    fn save_goals(&self, goals: &[Goal]) -> Result<()> {
        self.write_list(GOALS_FILE, goals)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entry::build_entry;
    use crate::factors::FactorTable;
    use crate::models::Category;

    #[test]
    fn test_missing_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert!(store.load_goals().unwrap().is_empty());
    }

    #[test]
    fn test_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = JsonStore::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.data_dir(), nested.as_path());
    }

    #[test]
    fn test_save_and_load_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();
        let factors = FactorTable::default();
        let entries = vec![
            build_entry(
                &factors,
                NaiveDate::from_ymd_opt(2024, 1, 1),
                [("electricity", 10.0), ("plastic", 2.0)],
            )
            .unwrap(),
            build_entry(&factors, NaiveDate::from_ymd_opt(2024, 1, 2), [("food", 1.5)]).unwrap(),
        ];

        store.save(&entries).unwrap();
        assert_eq!(store.load().unwrap(), entries);
        assert!(dir.path().join(ENTRIES_FILE).exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();
        let factors = FactorTable::default();
        let entry = build_entry(&factors, None, [("water", 1.0)]).unwrap();

        store.save(&[entry.clone(), entry.clone()]).unwrap();
        store.save(&[entry]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_load_goals() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();
        let goal = Goal {
            category: Category::Heating,
            target_value: 2.0,
            target_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start_value: 5.0,
        };

        store.save_goals(&[goal.clone()]).unwrap();
        assert_eq!(store.load_goals().unwrap(), vec![goal]);
    }

    #[test]
    fn test_corrupt_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ENTRIES_FILE), "{not json").unwrap();
        let store = JsonStore::new(dir.path()).unwrap();
        assert!(matches!(store.load(), Err(Error::InvalidData(_))));
    }
}
