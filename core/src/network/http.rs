use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GETs `url` and returns the body. Non-2xx statuses are errors.
    async fn get_text(&self, url: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(request_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("netdiag/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get_text(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()?;
        let body: String = response.text().await.context("reading response body")?;
        Ok(body)
    }
}
