//! Joongna source adapter with two swappable fetch strategies.

use super::models::SearchPayload;
use super::parser;
use crate::config::Config;
use crate::error::SourceError;
use crate::listing::{Listing, Platform};
use crate::source::{build_client, ListingSource, ACCEPT_LANGUAGE, USER_AGENT};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

const JOONGNA_API_BASE: &str = "https://search-api.joongna.com";
const JOONGNA_WEB_BASE: &str = "https://web.joongna.com";
const JOONGNA_ORIGIN: &str = "https://m.joongna.com";

/// How Joongna results are obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoongnaStrategy {
    /// POST the JSON search API.
    #[default]
    Api,
    /// GET the search page and read its embedded page data.
    Page,
}

impl std::str::FromStr for JoongnaStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "api" => Ok(JoongnaStrategy::Api),
            "page" | "html" => Ok(JoongnaStrategy::Page),
            _ => Err(format!("Unknown Joongna strategy: {}. Use: api, page", s)),
        }
    }
}

impl std::fmt::Display for JoongnaStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoongnaStrategy::Api => write!(f, "api"),
            JoongnaStrategy::Page => write!(f, "page"),
        }
    }
}

/// Joongna source adapter.
///
/// Best effort: every failure is logged and becomes an empty result so
/// Bunjang listings are never held back by it.
pub struct JoongnaSource {
    client: Client,
    strategy: JoongnaStrategy,
    page_size: u32,
    api_base: String,
    web_base: String,
}

impl JoongnaSource {
    /// Creates a new Joongna source with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a new Joongna source with an optional base URL used for both
    /// the API and the web page (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let client = build_client(config.joongna_timeout_secs, config.proxy.as_deref())?;

        Ok(Self {
            client,
            strategy: config.joongna_strategy,
            page_size: config.joongna_page_size,
            api_base: base_url.clone().unwrap_or_else(|| JOONGNA_API_BASE.to_string()),
            web_base: base_url.unwrap_or_else(|| JOONGNA_WEB_BASE.to_string()),
        })
    }

    /// Returns the active strategy.
    pub fn strategy(&self) -> JoongnaStrategy {
        self.strategy
    }

    async fn raw_items(&self, keyword: &str) -> Result<Vec<Value>, SourceError> {
        match self.strategy {
            JoongnaStrategy::Api => parser::api_items(&self.search_api(keyword).await?),
            JoongnaStrategy::Page => parser::page_items(&self.search_page(keyword).await?),
        }
    }

    async fn search_api(&self, keyword: &str) -> Result<String, SourceError> {
        let url = format!("{}/v3/search/app", self.api_base);
        let payload = serde_json::to_string(&SearchPayload::first_page(keyword, self.page_size))
            .map_err(|e| SourceError::malformed(Platform::Joongna, e.to_string()))?;

        debug!(url = %url, "POST joongna");

        let response = self
            .client
            .post(url.as_str())
            .emulation(Emulation::Chrome131)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("Content-Type", "application/json")
            .header("Origin", JOONGNA_ORIGIN)
            .header("Referer", format!("{}/", JOONGNA_ORIGIN))
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                SourceError::unavailable(Platform::Joongna, format!("request failed: {e}"))
            })?;

        Self::read_body(response).await
    }

    async fn search_page(&self, keyword: &str) -> Result<String, SourceError> {
        let url = format!(
            "{}/search/{}?saleYn=SALE_N&sort=RECOMMEND_SORT",
            self.web_base,
            urlencoding::encode(keyword)
        );

        debug!(url = %url, "GET joongna page");

        let response = self
            .client
            .get(url.as_str())
            .emulation(Emulation::Chrome131)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("Referer", format!("{}/", JOONGNA_ORIGIN))
            .send()
            .await
            .map_err(|e| {
                SourceError::unavailable(Platform::Joongna, format!("request failed: {e}"))
            })?;

        Self::read_body(response).await
    }

    async fn read_body(response: wreq::Response) -> Result<String, SourceError> {
        let status = response.status();
        debug!(status = %status, "joongna responded");

        if !status.is_success() {
            return Err(SourceError::unavailable(
                Platform::Joongna,
                format!("request failed with status: {status}"),
            ));
        }

        response.text().await.map_err(|e| {
            SourceError::unavailable(Platform::Joongna, format!("failed to read body: {e}"))
        })
    }
}

#[async_trait]
impl ListingSource for JoongnaSource {
    async fn fetch(&self, keyword: &str) -> Result<Vec<Listing>, SourceError> {
        info!(keyword, strategy = %self.strategy, "searching joongna");

        match self.raw_items(keyword).await {
            Ok(items) => Ok(parser::parse_items(&items)),
            Err(e) => {
                warn!(keyword, error = %e, "joongna search failed, continuing without it");
                Ok(Vec::new())
            }
        }
    }

    fn platform(&self) -> Platform {
        Platform::Joongna
    }
}
