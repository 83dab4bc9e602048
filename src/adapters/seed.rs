use crate::domain::ports::SeedSource;
use crate::utils::error::{CatalogueError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Fetches the seed document over HTTP.
pub struct HttpSeedSource {
    url: String,
    client: Client,
}

impl HttpSeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<serde_json::Value> {
        tracing::debug!("Requesting seed data from: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Seed response status: {}", status);
        if !status.is_success() {
            return Err(CatalogueError::Seed {
                message: format!("Failed to load seed data ({})", status.as_u16()),
            });
        }

        Ok(response.json().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the seed document from a JSON file on disk.
pub struct FileSeedSource {
    path: PathBuf,
}

impl FileSeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeedSource for FileSeedSource {
    async fn fetch(&self) -> Result<serde_json::Value> {
        let content = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&content)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Picks the HTTP or file source depending on what `location` looks like.
pub fn seed_source_for(location: &str, timeout: Duration) -> Result<Box<dyn SeedSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSeedSource::with_timeout(location, timeout)?))
    } else {
        Ok(Box::new(FileSeedSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_http_seed_source_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/brands.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"id": "b1"}]));
        });

        let source = HttpSeedSource::new(server.url("/brands.json"));
        let value = source.fetch().await.unwrap();

        mock.assert();
        assert_eq!(value, serde_json::json!([{"id": "b1"}]));
    }

    #[tokio::test]
    async fn test_http_seed_source_non_success_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.json");
            then.status(404);
        });

        let source = HttpSeedSource::new(server.url("/missing.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogueError::Seed { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_file_seed_source() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(br#"[{"id": "b1"}]"#).unwrap();

        let source = FileSeedSource::new(temp_file.path());
        assert_eq!(source.fetch().await.unwrap(), serde_json::json!([{"id": "b1"}]));

        let missing = FileSeedSource::new("/definitely/not/here.json");
        assert!(matches!(missing.fetch().await, Err(CatalogueError::Io(_))));
    }

    #[test]
    fn test_seed_source_for_picks_by_scheme() {
        let timeout = Duration::from_secs(5);
        let http = seed_source_for("https://example.com/brands.json", timeout).unwrap();
        assert_eq!(http.describe(), "https://example.com/brands.json");

        let file = seed_source_for("data/brands.json", timeout).unwrap();
        assert_eq!(file.describe(), "data/brands.json");
    }
}
