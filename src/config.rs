/// Popup configuration stored in chrome.storage.local

use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Storage key holding the serialized `Config`
pub const CONFIG_STORAGE_KEY: &str = "job_tracker_config";

pub const DEFAULT_ENDPOINT: &str = "http://0.0.0.0:8080";

const SCRAPE_PATH: &str = "scrape-job";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the job tracker service
    pub endpoint: String,
}

impl Config {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Config {
            endpoint: endpoint.into(),
        }
    }

    /// Full URL of the scrape endpoint.
    ///
    /// The base is treated as a directory, so both `http://host:8080` and
    /// `http://host:8080/api/` resolve below it.
    pub fn scrape_url(&self) -> Result<Url, ScrapeError> {
        let mut base = self.endpoint.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let base = Url::parse(&base).map_err(|e| ScrapeError::Config {
            reason: format!("{}: {}", self.endpoint, e),
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(ScrapeError::Config {
                reason: format!("unsupported scheme '{}'", base.scheme()),
            });
        }

        base.join(SCRAPE_PATH).map_err(|e| ScrapeError::Config {
            reason: e.to_string(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_ENDPOINT)
    }
}
