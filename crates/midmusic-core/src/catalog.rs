//! Catalog client seam and its two implementations.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::feed::Feed;

/// The remote music catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Personalized home feed (carries "Quick picks").
    async fn home_feed(&self) -> Result<Feed, CatalogError>;

    /// Explore feed (carries "Trending").
    async fn explore(&self) -> Result<Feed, CatalogError>;
}

// ── HTTP ──────────────────────────────────────────────────────────────────────

/// Reads both feeds as JSON from `{base_url}/home` and `{base_url}/explore`.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("midmusic/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_feed(&self, path: &str) -> Result<Feed, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("catalog: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        let value: serde_json::Value = response.json().await?;
        Feed::from_value(&value)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn home_feed(&self) -> Result<Feed, CatalogError> {
        self.get_feed("home").await
    }

    async fn explore(&self) -> Result<Feed, CatalogError> {
        self.get_feed("explore").await
    }
}

// ── Fixture files ─────────────────────────────────────────────────────────────

/// Serves feeds from JSON files on disk.
pub struct FixtureCatalogClient {
    home_path: PathBuf,
    explore_path: PathBuf,
}

impl FixtureCatalogClient {
    pub fn new(home_path: impl Into<PathBuf>, explore_path: impl Into<PathBuf>) -> Self {
        Self {
            home_path: home_path.into(),
            explore_path: explore_path.into(),
        }
    }

    async fn read_feed(path: &PathBuf) -> Result<Feed, CatalogError> {
        debug!("catalog: reading fixture {}", path.display());
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Fixture {
                path: path.clone(),
                source,
            })?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        Feed::from_value(&value)
    }
}

#[async_trait]
impl CatalogClient for FixtureCatalogClient {
    async fn home_feed(&self) -> Result<Feed, CatalogError> {
        Self::read_feed(&self.home_path).await
    }

    async fn explore(&self) -> Result<Feed, CatalogError> {
        Self::read_feed(&self.explore_path).await
    }
}

/// Build the client selected in the config.
pub fn from_config(config: &CatalogConfig) -> Result<Box<dyn CatalogClient>, CatalogError> {
    match config.source {
        crate::config::CatalogSource::Http => Ok(Box::new(HttpCatalogClient::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?)),
        crate::config::CatalogSource::Fixture => Ok(Box::new(FixtureCatalogClient::new(
            config.home_fixture.clone(),
            config.explore_fixture.clone(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_client_reads_both_feeds() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home.json");
        let explore = dir.path().join("explore.json");
        std::fs::write(
            &home,
            r#"{"sections":[{"header":{"title":{"text":"Quick picks"}},"contents":[]}]}"#,
        )
        .unwrap();
        std::fs::write(&explore, r#"{}"#).unwrap();

        let client = FixtureCatalogClient::new(&home, &explore);
        assert_eq!(client.home_feed().await.unwrap().sections.len(), 1);
        assert!(client.explore().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fixture_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();

        let client = FixtureCatalogClient::new(dir.path().join("missing.json"), &bad);
        assert!(matches!(
            client.home_feed().await,
            Err(CatalogError::Fixture { .. })
        ));
        assert!(matches!(client.explore().await, Err(CatalogError::Json(_))));
    }
}
