//! HTTP object-store dataset backend
//!
//! One implementation serves both remote variants: the dataset blob lives
//! at `<endpoint>/<bucket>/<filename>`, fetched with GET and replaced with
//! PUT. The backend tag only picks the default endpoint; an explicit
//! `endpoint` override points at a test server or an S3-compatible
//! gateway. Authentication, when needed, is a bearer token read once from
//! the environment variable named in configuration.

use crate::config::{Backend, StorageConfig};
use crate::dataset::Dataset;
use crate::storage::{codec, StoreError};
use reqwest::{Client, StatusCode};
use tracing::info;

const GCS_ENDPOINT: &str = "https://storage.googleapis.com";
const S3_ENDPOINT: &str = "https://s3.amazonaws.com";

/// GET/PUT of the dataset blob at a fixed object URL
#[derive(Debug)]
pub struct ObjectStore {
    client: Client,
    url: String,
    token: Option<String>,
}

impl ObjectStore {
    /// Resolves endpoint, bucket and token once; the backend tag is not
    /// consulted again after this
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        let bucket = config
            .bucket
            .as_deref()
            .filter(|bucket| !bucket.is_empty())
            .ok_or(StoreError::MissingBucket(config.backend))?;

        let endpoint = config.endpoint.clone().unwrap_or_else(|| {
            match config.backend {
                Backend::Gcs => GCS_ENDPOINT,
                _ => S3_ENDPOINT,
            }
            .to_string()
        });

        let token = match &config.token_env {
            Some(var) => {
                Some(std::env::var(var).map_err(|_| StoreError::MissingToken(var.clone()))?)
            }
            None => None,
        };

        let url = format!(
            "{}/{}/{}",
            endpoint.trim_end_matches('/'),
            bucket,
            config.filename
        );

        Ok(Self {
            client: Client::new(),
            url,
            token,
        })
    }

    pub async fn load(&self) -> Result<Option<Dataset>, StoreError> {
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Http {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }

        let bytes = response.bytes().await?;
        codec::read_csv(&bytes).map(Some)
    }

    pub async fn save(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let bytes = codec::write_csv(dataset)?;

        let mut request = self
            .client
            .put(&self.url)
            .header("content-type", "text/csv")
            .body(bytes);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Http {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }

        info!("Uploaded {} records to {}", dataset.len(), self.url);
        Ok(())
    }

    pub fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_config(backend: Backend) -> StorageConfig {
        StorageConfig {
            backend,
            bucket: Some("launch-data".to_string()),
            ..StorageConfig::default()
        }
    }

    #[test]
    fn test_default_endpoints_per_backend() {
        let gcs = ObjectStore::from_config(&remote_config(Backend::Gcs)).unwrap();
        assert_eq!(
            gcs.describe(),
            "https://storage.googleapis.com/launch-data/nsf_past_launches.csv"
        );

        let s3 = ObjectStore::from_config(&remote_config(Backend::S3)).unwrap();
        assert_eq!(
            s3.describe(),
            "https://s3.amazonaws.com/launch-data/nsf_past_launches.csv"
        );
    }

    #[test]
    fn test_missing_bucket_is_an_error() {
        let mut config = remote_config(Backend::S3);
        config.bucket = None;
        assert!(matches!(
            ObjectStore::from_config(&config),
            Err(StoreError::MissingBucket(Backend::S3))
        ));
    }

    #[test]
    fn test_unset_token_variable_is_an_error() {
        let mut config = remote_config(Backend::Gcs);
        config.token_env = Some("LAUNCHLEDGER_TEST_TOKEN_THAT_IS_NOT_SET".to_string());
        assert!(matches!(
            ObjectStore::from_config(&config),
            Err(StoreError::MissingToken(_))
        ));
    }
}
