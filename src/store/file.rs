//! File-per-key persistence backend

use super::{KeyValueBackend, StoreError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stores each key as one JSON file under a data directory.
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `data_dir`, creating the directory if
    /// it does not exist.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&data_dir)?;

        Ok(Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl KeyValueBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.key_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let data = std::fs::read(path)?;
        Ok(Some(data))
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.key_path(key))?;

        file.write_all(data)?;
        file.sync_all()?;

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);

        if path.exists() {
            std::fs::remove_file(path)?;
        }

        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();

        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();

            if path.extension().map(|ext| ext == "json").unwrap_or(false) {
                if let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) {
                    keys.push(name.to_string());
                }
            }
        }

        Ok(keys)
    }
}
