//! Directory-backed key-value store
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling and
//! are renamed into place, so a reader sees either the old or the new value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.data_dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(AppError::StorageUnavailable(format!("invalid key {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::StorageRead(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| AppError::StorageWrite(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
