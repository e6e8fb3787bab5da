//! Joongna search payloads.

use crate::lenient;
use serde::{Deserialize, Serialize};

/// Highest price accepted by the search filter.
pub const MAX_PRICE_FILTER: u64 = 100_000_000;

/// One Joongna search item. Only the fields we normalize are decoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoongnaItem {
    /// Product sequence id
    #[serde(default, deserialize_with = "lenient::id")]
    pub seq: Option<String>,
    /// Product title
    #[serde(default)]
    pub title: Option<String>,
    /// Price in won
    #[serde(default, deserialize_with = "lenient::int")]
    pub price: Option<i64>,
    /// Thumbnail URL
    #[serde(default)]
    pub url: Option<String>,
    /// Status code (0 on sale, 1 reserved, 2 sold)
    #[serde(default, deserialize_with = "lenient::int")]
    pub state: Option<i64>,
    /// Sort date string, the listing's recency
    #[serde(default)]
    pub sort_date: Option<String>,
    /// Seller's main region
    #[serde(default)]
    pub main_location_name: Option<String>,
}

/// Category filter entry; depth/seq 0 means "all categories".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    pub category_depth: u32,
    pub category_seq: u32,
}

/// Price range filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilter {
    pub max_price: u64,
    pub min_price: u64,
}

/// Body of `POST /v3/search/app`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    pub adjust_search_keyword: bool,
    pub category_filter: Vec<CategoryFilter>,
    pub filter_type_checkout_by_user: bool,
    pub first_quantity: u32,
    pub jn_pay_yn: String,
    pub keyword_source: String,
    pub os_type: u32,
    pub page: u32,
    pub parcel_fee_yn: String,
    pub price_filter: PriceFilter,
    pub quantity: u32,
    pub regist_period: String,
    pub sale_yn: String,
    pub search_word: String,
    pub sort: String,
}

impl SearchPayload {
    /// First page of on-sale items in recommended order, any price, any category.
    pub fn first_page(keyword: &str, quantity: u32) -> Self {
        Self {
            adjust_search_keyword: true,
            category_filter: vec![CategoryFilter { category_depth: 0, category_seq: 0 }],
            filter_type_checkout_by_user: false,
            first_quantity: quantity,
            jn_pay_yn: "ALL".to_string(),
            keyword_source: "INPUT_KEYWORD".to_string(),
            os_type: 2,
            page: 0,
            parcel_fee_yn: "ALL".to_string(),
            price_filter: PriceFilter { max_price: MAX_PRICE_FILTER, min_price: 0 },
            quantity,
            regist_period: "ALL".to_string(),
            sale_yn: "SALE_N".to_string(),
            search_word: keyword.to_string(),
            sort: "RECOMMEND_SORT".to_string(),
        }
    }
}
