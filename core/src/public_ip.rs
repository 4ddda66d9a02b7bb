//! Public address discovery through an ordered list of echo services.

use std::sync::Arc;
use std::time::Duration;

use netdiag_common::{config::DEFAULT_HTTP_TIMEOUT, debug, models::PublicIpOutcome};

use crate::network::{HttpFetcher, ReqwestFetcher};

pub struct PublicIpResolver {
    fetcher: Arc<dyn HttpFetcher>,
}

impl PublicIpResolver {
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { fetcher }
    }

    /// Resolver backed by a real HTTP client with `request_timeout` per endpoint.
    pub fn with_timeout(request_timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self::new(Arc::new(ReqwestFetcher::new(request_timeout)?)))
    }

    /// Queries `endpoints` in order and returns the first non-empty answer.
    ///
    /// Endpoints after the first success are never contacted. Failures are
    /// skipped silently; if none succeeds the outcome is `Unresolved`.
    pub async fn resolve_public_ip<S: AsRef<str>>(&self, endpoints: &[S]) -> PublicIpOutcome {
        for endpoint in endpoints {
            let url: &str = endpoint.as_ref();
            match self.fetcher.get_text(url).await {
                Ok(body) => {
                    let addr: &str = body.trim();
                    if addr.is_empty() {
                        debug!("{url} answered with an empty body");
                        continue;
                    }
                    return PublicIpOutcome::Resolved(addr.to_owned());
                }
                Err(e) => debug!("{url} failed: {e:#}"),
            }
        }
        PublicIpOutcome::Unresolved
    }

    /// True iff `url` answers a GET with a 2xx status.
    pub async fn check_connectivity(&self, url: &str) -> bool {
        match self.fetcher.get_text(url).await {
            Ok(_) => true,
            Err(e) => {
                debug!("connectivity check against {url} failed: {e:#}");
                false
            }
        }
    }
}

impl Default for PublicIpResolver {
    fn default() -> Self {
        let fetcher: Arc<dyn HttpFetcher> = match ReqwestFetcher::new(DEFAULT_HTTP_TIMEOUT) {
            Ok(fetcher) => Arc::new(fetcher),
            Err(e) => {
                debug!("http client unavailable: {e:#}");
                Arc::new(Offline)
            }
        };
        Self::new(fetcher)
    }
}

/// Stand-in used when no HTTP client could be built; every request fails.
struct Offline;

#[async_trait::async_trait]
impl HttpFetcher for Offline {
    async fn get_text(&self, url: &str) -> anyhow::Result<String> {
        anyhow::bail!("no http client available for {url}")
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
