//! Normalized listing model shared by every marketplace source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace a listing was scraped from.
///
/// Serialized as the marketplace's display name, which is what the
/// browser frontend renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "번개장터")]
    Bunjang,
    #[serde(rename = "중고나라")]
    Joongna,
}

impl Platform {
    /// Returns all supported platforms.
    pub fn all() -> &'static [Platform] {
        &[Platform::Bunjang, Platform::Joongna]
    }

    /// Short ASCII identifier used in logs and config.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Bunjang => "bunjang",
            Platform::Joongna => "joongna",
        }
    }

    /// Display name as shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Bunjang => "번개장터",
            Platform::Joongna => "중고나라",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sale status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "판매중")]
    OnSale,
    #[serde(rename = "예약중")]
    Reserved,
    #[serde(rename = "판매완료")]
    SoldOut,
    #[serde(rename = "삭제됨")]
    Removed,
    #[serde(rename = "알 수 없음")]
    Unknown,
}

impl Status {
    /// Display label as shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Status::OnSale => "판매중",
            Status::Reserved => "예약중",
            Status::SoldOut => "판매완료",
            Status::Removed => "삭제됨",
            Status::Unknown => "알 수 없음",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One normalized secondhand search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Source marketplace
    pub platform: Platform,
    /// Item name
    pub title: String,
    /// Display price, e.g. "1,000,000원"
    pub price: String,
    /// Absolute permalink to the item
    pub link: String,
    /// Display date (yy-mm-dd, KST)
    pub update_time: String,
    /// Unix epoch seconds, the sort key
    pub timestamp: i64,
    /// Sale status
    pub status: Status,
    /// Image URL or the shared placeholder
    pub image: String,
    /// Seller region (Joongna only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Inbound search request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keyword: String,
}

/// Merged search result returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Keyword that was searched
    pub keyword: String,
    /// Request time, ISO-8601 UTC
    pub timestamp: String,
    /// Listings ordered newest first
    pub results: Vec<Listing>,
}

impl SearchResponse {
    /// Returns the number of listings.
    pub fn count(&self) -> usize {
        self.results.len()
    }

    /// Returns true if neither source produced a listing.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of listings that came from `platform`.
    pub fn count_for(&self, platform: Platform) -> usize {
        self.results.iter().filter(|l| l.platform == platform).count()
    }
}
