use async_trait::async_trait;
use tokio::sync::Mutex;

use super::RecordStore;
use crate::error::AppError;

/// Keeps a collection in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn load_all(&self) -> Result<Vec<T>, AppError> {
        Ok(self.records.lock().await.clone())
    }

    async fn save_all(&self, records: &[T]) -> Result<(), AppError> {
        *self.records.lock().await = records.to_vec();
        Ok(())
    }
}
