//! Dataset persistence: one CSV blob on local disk or an HTTP object store
//!
//! The backend is a tagged variant chosen once from configuration; nothing
//! downstream inspects which one it got. Loading a dataset that was never
//! written is `Ok(None)` — the fresh-start path — while a present but
//! malformed blob is an error, because the crawl cannot safely derive its
//! resume point from it.

mod codec;
mod local;
mod object;

pub use codec::{read_csv, write_csv};
pub use local::LocalStore;
pub use object::ObjectStore;

use crate::config::{Backend, StorageConfig};
use crate::dataset::Dataset;
use thiserror::Error;

/// Errors from loading or saving the dataset blob
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP {status} from object store for {url}")]
    Http { status: u16, url: String },

    #[error("Object store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("storage backend {0:?} requires a bucket name")]
    MissingBucket(Backend),

    #[error("token environment variable {0} is not set")]
    MissingToken(String),
}

/// The persistence backend, selected once at startup
#[derive(Debug)]
pub enum Store {
    Local(LocalStore),
    Object(ObjectStore),
}

impl Store {
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        match config.backend {
            Backend::Local => Ok(Store::Local(LocalStore::new(config))),
            Backend::Gcs | Backend::S3 => Ok(Store::Object(ObjectStore::from_config(config)?)),
        }
    }

    /// Loads the persisted dataset; `None` when none has been written yet
    pub async fn load(&self) -> Result<Option<Dataset>, StoreError> {
        match self {
            Store::Local(store) => store.load().await,
            Store::Object(store) => store.load().await,
        }
    }

    /// Persists the full dataset, replacing the previous blob only once
    /// the new one is completely written
    pub async fn save(&self, dataset: &Dataset) -> Result<(), StoreError> {
        match self {
            Store::Local(store) => store.save(dataset).await,
            Store::Object(store) => store.save(dataset).await,
        }
    }

    /// Human-readable dataset location for log lines
    pub fn describe(&self) -> String {
        match self {
            Store::Local(store) => store.describe(),
            Store::Object(store) => store.describe(),
        }
    }
}
