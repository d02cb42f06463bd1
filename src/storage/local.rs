//! Local-disk dataset store

use crate::config::StorageConfig;
use crate::dataset::Dataset;
use crate::storage::{codec, StoreError};
use std::path::PathBuf;
use tracing::info;

/// Stores the dataset at `<data-dir>/<filename>`
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(config: &StorageConfig) -> Self {
        let path = PathBuf::from(&config.data_dir).join(&config.filename);
        Self { path }
    }

    pub async fn load(&self) -> Result<Option<Dataset>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = tokio::fs::read(&self.path).await?;
        codec::read_csv(&bytes).map(Some)
    }

    /// Writes a sibling temp file then renames it over the target, so a
    /// failed save leaves the previous dataset intact
    pub async fn save(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let bytes = codec::write_csv(dataset)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let staging = self.path.with_extension("csv.tmp");
        tokio::fs::write(&staging, &bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        info!("Saved {} records to {}", dataset.len(), self.path.display());
        Ok(())
    }

    pub fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{merge, RawLaunchRecord};
    use chrono::NaiveDate;

    fn store_in(dir: &std::path::Path) -> LocalStore {
        let config = StorageConfig {
            data_dir: dir.join("data").to_string_lossy().into_owned(),
            filename: "launches.csv".to_string(),
            ..StorageConfig::default()
        };
        LocalStore::new(&config)
    }

    fn one_record_dataset() -> Dataset {
        let raw = RawLaunchRecord {
            organisation: "RVSN USSR".to_string(),
            detail: "Sputnik 8K74PS | Sputnik-1".to_string(),
            location: "Site 1/5, Baikonur Cosmodrome, Kazakhstan".to_string(),
            date: Some(
                NaiveDate::from_ymd_opt(1957, 10, 4)
                    .unwrap()
                    .and_hms_opt(19, 28, 0)
                    .unwrap(),
            ),
            image_link: None,
            mission_status: Some("Success".to_string()),
            rocket_status: Some("Retired".to_string()),
            price: None,
        };
        merge(&Dataset::default(), vec![raw])
    }

    #[tokio::test]
    async fn test_load_before_first_save_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let dataset = one_record_dataset();
        store.save(&dataset).await.unwrap();

        let reloaded = store.load().await.unwrap().unwrap();
        assert_eq!(reloaded, dataset);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let first = one_record_dataset();
        store.save(&first).await.unwrap();

        let second = merge(&first, vec![]);
        store.save(&second).await.unwrap();

        let reloaded = store.load().await.unwrap().unwrap();
        assert_eq!(reloaded.len(), 1);
    }
}
