use crate::config::types::{Backend, Config, ScraperConfig, StorageConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates crawl behavior configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    validate_url_template(&config.listing_url, "{page}", "listing-url")?;
    validate_url_template(&config.detail_url, "{id}", "detail-url")?;

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.max_retries < 1 || config.max_retries > 16 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be between 1 and 16, got {}",
            config.max_retries
        )));
    }

    if config.date_formats.is_empty() {
        return Err(ConfigError::Validation(
            "date-formats cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a URL template: it must carry its placeholder and become a
/// well-formed URL once the placeholder is substituted
fn validate_url_template(
    template: &str,
    placeholder: &str,
    key: &str,
) -> Result<(), ConfigError> {
    if !template.contains(placeholder) {
        return Err(ConfigError::Validation(format!(
            "{} must contain the {} placeholder, got '{}'",
            key, placeholder, template
        )));
    }

    let substituted = template.replace(placeholder, "1");
    Url::parse(&substituted)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, template, e)))?;

    Ok(())
}

/// Validates storage backend configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.filename.is_empty() {
        return Err(ConfigError::Validation(
            "filename cannot be empty".to_string(),
        ));
    }

    match config.backend {
        Backend::Local => {
            if config.data_dir.is_empty() {
                return Err(ConfigError::Validation(
                    "data-dir cannot be empty for the local backend".to_string(),
                ));
            }
        }
        Backend::Gcs | Backend::S3 => {
            if config.bucket.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::Validation(format!(
                    "storage backend {:?} requires a bucket name",
                    config.backend
                )));
            }
        }
    }

    Ok(())
}
