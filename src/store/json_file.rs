use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use super::RecordStore;
use crate::error::AppError;

/// Stores a collection as one pretty-printed JSON array on disk.
///
/// A missing or empty file reads as an empty collection. Writes go to a sibling
/// `.tmp` file that is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn storage_error(&self, error: impl std::fmt::Display) -> AppError {
        AppError::StorageError(format!("{}: {}", self.path.display(), error))
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load_all(&self) -> Result<Vec<T>, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.storage_error(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| self.storage_error(e))
    }

    async fn save_all(&self, records: &[T]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error(e))?;
        }

        let body = serde_json::to_vec_pretty(records).map_err(|e| self.storage_error(e))?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, body)
            .await
            .map_err(|e| self.storage_error(e))?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                log::warn!("Could not remove {}: {}", temp.display(), cleanup);
            }
            return Err(self.storage_error(e));
        }
        Ok(())
    }
}
