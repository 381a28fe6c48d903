use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::{has_credential, Config};
use crate::models::{MovieDetail, MovieSummary, ResultsPage};

/// Read-only access to a remote movie catalog. Every method may fail; the
/// fallback policy lives in [`crate::catalog::Catalog`].
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// False when no usable credential is configured. Callers must not
    /// attempt any request in that case.
    fn is_configured(&self) -> bool;
    async fn popular(&self, page: u32) -> Result<Vec<MovieSummary>>;
    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieSummary>>;
    async fn movie(&self, id: &str) -> Result<MovieDetail>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &Config) -> Result<Self> {
        let user_agent = format!("cinelist/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        debug!("GET {}", redact(url, &self.api_key));
        let res = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!(
                "{} -> {}: {}",
                redact(url, &self.api_key),
                status,
                text
            ));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    fn is_configured(&self) -> bool {
        has_credential(&self.api_key)
    }

    async fn popular(&self, page: u32) -> Result<Vec<MovieSummary>> {
        let url = format!(
            "{}/movie/popular?api_key={}&language={}&page={page}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language),
        );
        let data: ResultsPage = self.get_json(&url).await?;
        Ok(data.results)
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieSummary>> {
        let url = format!(
            "{}/search/movie?api_key={}&language={}&query={}&page={page}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language),
            urlencoding::encode(query),
        );
        let data: ResultsPage = self.get_json(&url).await?;
        Ok(data.results)
    }

    async fn movie(&self, id: &str) -> Result<MovieDetail> {
        let url = format!(
            "{}/movie/{}?api_key={}&language={}",
            self.base_url,
            urlencoding::encode(id.trim()),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language),
        );
        self.get_json(&url).await
    }
}

fn redact(url: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return url.to_string();
    }
    url.replace(urlencoding::encode(api_key).as_ref(), "***")
}
