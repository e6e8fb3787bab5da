//! Bunjang search API client.

use super::parser;
use crate::config::Config;
use crate::error::SourceError;
use crate::listing::{Listing, Platform};
use crate::source::{build_client, ListingSource, ACCEPT_LANGUAGE, USER_AGENT};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

const BUNJANG_API_BASE: &str = "https://api.bunjang.co.kr";
const BUNJANG_WEB_ORIGIN: &str = "https://m.bunjang.co.kr";

/// Raw response kept for the debugging surfaces.
#[derive(Debug, Clone)]
pub struct RawPayload {
    pub status: u16,
    pub body: String,
}

/// Bunjang source adapter.
///
/// Transport failures propagate as [`SourceError::Unavailable`]; payloads
/// of an unexpected shape degrade to an empty result.
pub struct BunjangSource {
    client: Client,
    page_size: u32,
    recency_window_secs: u64,
    base_url: String,
}

impl BunjangSource {
    /// Creates a new Bunjang source with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a new Bunjang source with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let client = build_client(config.bunjang_timeout_secs, config.proxy.as_deref())?;

        Ok(Self {
            client,
            page_size: config.bunjang_page_size,
            recency_window_secs: config.recency_window_secs,
            base_url: base_url.unwrap_or_else(|| BUNJANG_API_BASE.to_string()),
        })
    }

    fn search_url(&self, keyword: &str, request_id: i64) -> String {
        format!(
            "{}/api/1/find_v2.json?q={}&order=score&page=0&request_id={}&stat_device=w&n={}&stat_category_required=1&req_ref=search&version=5",
            self.base_url,
            urlencoding::encode(keyword),
            request_id,
            self.page_size
        )
    }

    /// Performs the search request and returns the untouched payload.
    pub async fn fetch_raw(&self, keyword: &str) -> Result<RawPayload, SourceError> {
        let url = self.search_url(keyword, Utc::now().timestamp_millis());
        let referer =
            format!("{}/search/products?q={}", BUNJANG_WEB_ORIGIN, urlencoding::encode(keyword));

        debug!(url = %url, "GET bunjang");

        let response = self
            .client
            .get(url.as_str())
            .emulation(Emulation::Chrome131)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("Origin", BUNJANG_WEB_ORIGIN)
            .header("Referer", referer)
            .header("Sec-Fetch-Dest", "empty")
            .header("Sec-Fetch-Mode", "cors")
            .header("Sec-Fetch-Site", "same-site")
            .send()
            .await
            .map_err(|e| {
                SourceError::unavailable(Platform::Bunjang, format!("request failed: {e}"))
            })?;

        let status = response.status();
        debug!(status = %status, "bunjang responded");

        if !status.is_success() {
            return Err(SourceError::unavailable(
                Platform::Bunjang,
                format!("request failed with status: {status}"),
            ));
        }

        let body = response.text().await.map_err(|e| {
            SourceError::unavailable(Platform::Bunjang, format!("failed to read body: {e}"))
        })?;

        Ok(RawPayload { status: status.as_u16(), body })
    }
}

#[async_trait]
impl ListingSource for BunjangSource {
    async fn fetch(&self, keyword: &str) -> Result<Vec<Listing>, SourceError> {
        info!(keyword, "searching bunjang");

        let payload = self.fetch_raw(keyword).await?;
        let now = Utc::now().timestamp();
        Ok(parser::parse_search(&payload.body, now, self.recency_window_secs))
    }

    fn platform(&self) -> Platform {
        Platform::Bunjang
    }
}
