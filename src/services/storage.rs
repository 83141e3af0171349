use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::debug;

use crate::{
    error::AppError,
    models::{expense::Expense, trip::Trip},
};

const TRIPS_FILE: &str = "trips.json";
const EXPENSES_FILE: &str = "expenses.json";

/// Whole-collection persistence for trips and expenses.
///
/// Loads never fail on missing storage, they return an empty collection.
/// Saves replace the stored collection as a whole.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load_trips(&self) -> Result<Vec<Trip>, AppError>;
    async fn save_trips(&self, trips: &[Trip]) -> Result<(), AppError>;
    async fn load_expenses(&self) -> Result<Vec<Expense>, AppError>;
    async fn save_expenses(&self, expenses: &[Expense]) -> Result<(), AppError>;
}

/// Stores each collection as a pretty-printed JSON array inside `root`.
#[derive(Clone)]
pub struct JsonFileStore {
    root: Arc<PathBuf>,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn trips_path(&self) -> PathBuf {
        self.root().join(TRIPS_FILE)
    }

    pub fn expenses_path(&self) -> PathBuf {
        self.root().join(EXPENSES_FILE)
    }

    /// Creates the data directory and writes empty collections for missing files.
    pub async fn ensure_structure(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.root()).await?;
        if !fs::try_exists(self.trips_path()).await? {
            self.save_trips(&[]).await?;
        }
        if !fs::try_exists(self.expenses_path()).await? {
            self.save_expenses(&[]).await?;
        }
        Ok(())
    }

    async fn read_collection<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>, AppError> {
        if !fs::try_exists(path).await? {
            return Ok(Vec::new());
        }
        let raw = fs::read(path).await?;
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<T> =
            serde_json::from_slice(&raw).map_err(|err| AppError::Other(err.into()))?;
        Ok(items)
    }

    async fn write_collection<T: Serialize>(&self, path: &Path, items: &[T]) -> Result<(), AppError> {
        let data = serde_json::to_vec_pretty(items).map_err(|err| AppError::Other(err.into()))?;
        // Write beside the target and rename so readers never see a torn file.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, data).await?;
        fs::rename(&staging, path).await?;
        debug!(path = %path.display(), count = items.len(), "collection saved");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load_trips(&self) -> Result<Vec<Trip>, AppError> {
        self.read_collection(&self.trips_path()).await
    }

    async fn save_trips(&self, trips: &[Trip]) -> Result<(), AppError> {
        self.write_collection(&self.trips_path(), trips).await
    }

    async fn load_expenses(&self) -> Result<Vec<Expense>, AppError> {
        self.read_collection(&self.expenses_path()).await
    }

    async fn save_expenses(&self, expenses: &[Expense]) -> Result<(), AppError> {
        self.write_collection(&self.expenses_path(), expenses).await
    }
}

/// Keeps both collections in memory. Used by tests and throwaway instances.
#[derive(Clone, Default)]
pub struct MemoryStore {
    trips: Arc<Mutex<Vec<Trip>>>,
    expenses: Arc<Mutex<Vec<Expense>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> AppError {
    AppError::Other(anyhow::anyhow!("memory store lock poisoned"))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load_trips(&self) -> Result<Vec<Trip>, AppError> {
        Ok(self.trips.lock().map_err(poisoned)?.clone())
    }

    async fn save_trips(&self, trips: &[Trip]) -> Result<(), AppError> {
        *self.trips.lock().map_err(poisoned)? = trips.to_vec();
        Ok(())
    }

    async fn load_expenses(&self) -> Result<Vec<Expense>, AppError> {
        Ok(self.expenses.lock().map_err(poisoned)?.clone())
    }

    async fn save_expenses(&self, expenses: &[Expense]) -> Result<(), AppError> {
        *self.expenses.lock().map_err(poisoned)? = expenses.to_vec();
        Ok(())
    }
}
