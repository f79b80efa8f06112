//! Whole-collection persistence.
//!
//! Every store reads or writes its entire record set at once. [`RecordStore`] is the
//! backend contract (`load_all` / `save_all`); [`Collection`] layers a per-collection
//! write lock on top so a read-modify-write cycle never interleaves with another one.

pub mod json_file;
pub mod memory;
pub mod tasks;
pub mod users;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AppError;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use tasks::TaskStore;
pub use users::UserStore;

/// A backend that can load and replace a whole collection of records.
#[async_trait]
pub trait RecordStore<T>: Send + Sync {
    async fn load_all(&self) -> Result<Vec<T>, AppError>;

    async fn save_all(&self, records: &[T]) -> Result<(), AppError>;
}

pub struct Collection<T> {
    backend: Box<dyn RecordStore<T>>,
    write_lock: Mutex<()>,
}

impl<T> Collection<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(backend: impl RecordStore<T> + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn read_all(&self) -> Result<Vec<T>, AppError> {
        self.backend.load_all().await
    }

    /// Loads the collection, hands it to `mutate`, and writes it back if `mutate`
    /// succeeded. An error from `mutate` leaves the stored collection untouched.
    pub async fn modify<R, F>(&self, mutate: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, AppError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut records = self.backend.load_all().await?;
        let outcome = mutate(&mut records)?;
        self.backend.save_all(&records).await?;

        Ok(outcome)
    }
}
