//! Game catalog documents served to the front end

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Returned when neither the local cache nor the remote document is available
pub const FALLBACK_CATALOG: &str = r#"[{"title": "Home", "img": "home"}]"#;

const SWITCH2_CATALOG: &str = r#"[
		{"title": "Home", "img": "home"},
		{"title": "Mario Kart World", "img": "mkw"},
		{"title": "Cyberpunk 2077: Complete Edition", "img": "cp2077"}
	]"#;

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub title: String,
    pub img: String,
}

pub struct CatalogProvider {
    local_path: PathBuf,
    remote_url: String,
    client: reqwest::Client,
}

impl CatalogProvider {
    pub fn new(local_path: impl Into<PathBuf>, remote_url: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            remote_url: remote_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Switch 1 catalog: the local cache file verbatim, else the remote
    /// document, else [`FALLBACK_CATALOG`].
    pub async fn primary_catalog(&self, cancel: &CancellationToken) -> String {
        if let Ok(bytes) = fs::read(&self.local_path) {
            tracing::debug!("Serving catalog from {}", self.local_path.display());
            return String::from_utf8_lossy(&bytes).into_owned();
        }

        tracing::debug!("Fetching catalog from {}", self.remote_url);
        let fetched = tokio::select! {
            _ = cancel.cancelled() => None,
            body = self.fetch_remote() => body,
        };

        fetched.unwrap_or_else(|| FALLBACK_CATALOG.to_string())
    }

    async fn fetch_remote(&self) -> Option<String> {
        let response = match self.client.get(&self.remote_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch catalog: {}", e);
                return None;
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Catalog server returned an error: {}", e);
                return None;
            }
        };

        response.text().await.ok()
    }

    /// Switch 2 catalog, which is fixed.
    pub fn secondary_catalog(&self) -> String {
        SWITCH2_CATALOG.to_string()
    }
}
