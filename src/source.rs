//! The source adapter seam and the HTTP client every adapter shares.

use crate::error::SourceError;
use crate::listing::{Listing, Platform};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;

/// Chrome user agent sent alongside the TLS emulation.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Accept-Language both Korean marketplaces expect.
pub const ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// One upstream marketplace - enables mocking for tests.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Searches the upstream and returns normalized listings.
    async fn fetch(&self, keyword: &str) -> Result<Vec<Listing>, SourceError>;

    /// Marketplace this source produces listings for.
    fn platform(&self) -> Platform;
}

/// Builds a browser-like HTTP client with a per-call timeout.
pub fn build_client(timeout_secs: u64, proxy: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder()
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)));

    if let Some(proxy_url) = proxy {
        debug!(proxy = proxy_url, "configuring proxy");
        let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
        builder = builder.proxy(proxy);
    }

    builder.build().context("Failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        assert!(build_client(30, None).is_ok());
    }

    #[test]
    fn test_build_client_with_proxy() {
        assert!(build_client(10, Some("socks5://127.0.0.1:1080")).is_ok());
    }
}
