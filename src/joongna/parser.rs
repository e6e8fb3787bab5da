//! Extracts Joongna items from the search API body or the search page.
//!
//! The search page is a Next.js document: its `__NEXT_DATA__` script holds a
//! dehydrated react-query cache whose `queries` list contains the search
//! result somewhere, at no fixed index. Upstream shape drift is expected and
//! always degrades to an empty result.

use super::models::JoongnaItem;
use crate::error::SourceError;
use crate::listing::normalize::{
    format_date, format_price, image_or_fallback, location_or_sentinel, parse_date, permalink,
    translate_status, PRICE_ON_REQUEST,
};
use crate::listing::{Listing, Platform};
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, trace, warn};

mod selectors {
    use super::*;

    pub static NEXT_DATA: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(r#"script[id="__NEXT_DATA__"]"#).unwrap());
}

/// Where the query list lives inside `__NEXT_DATA__`.
const QUERIES_POINTER: &str = "/props/pageProps/dehydratedState/queries";

/// Item array locations inside one query block, tried in order.
const ITEM_POINTERS: &[&str] =
    &["/state/data/data/items", "/state/data/items", "/state/data/pages/0/data/items"];

/// Item array location in the search API body.
const API_ITEMS_POINTER: &str = "/data/items";

/// Returns the raw items of a search API body.
///
/// A JSON body without `data.items` is an empty result; a non-JSON body is
/// malformed.
pub fn api_items(body: &str) -> Result<Vec<Value>, SourceError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let payload: Value = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(Platform::Joongna, format!("body is not JSON: {e}")))?;

    match payload.pointer(API_ITEMS_POINTER).and_then(Value::as_array) {
        Some(items) => Ok(items.clone()),
        None => {
            debug!("joongna payload has no data.items");
            Ok(Vec::new())
        }
    }
}

/// Returns the raw items embedded in a search page.
pub fn page_items(html: &str) -> Result<Vec<Value>, SourceError> {
    let data = extract_next_data(html)?;

    let Some(queries) = data.pointer(QUERIES_POINTER).and_then(Value::as_array) else {
        debug!("joongna page has no dehydrated queries");
        return Ok(Vec::new());
    };

    Ok(find_item_block(queries).cloned().unwrap_or_default())
}

/// Parses the `__NEXT_DATA__` script of a page.
pub fn extract_next_data(html: &str) -> Result<Value, SourceError> {
    let document = Html::parse_document(html);

    let script = document
        .select(&selectors::NEXT_DATA)
        .next()
        .ok_or_else(|| SourceError::malformed(Platform::Joongna, "__NEXT_DATA__ not found"))?;

    let json_text = script.text().collect::<String>();
    serde_json::from_str(&json_text).map_err(|e| {
        SourceError::malformed(Platform::Joongna, format!("__NEXT_DATA__ is not JSON: {e}"))
    })
}

/// Finds the first query block carrying a non-empty item array.
pub fn find_item_block(queries: &[Value]) -> Option<&Vec<Value>> {
    queries.iter().enumerate().find_map(|(index, query)| {
        let items = ITEM_POINTERS
            .iter()
            .filter_map(|pointer| query.pointer(pointer).and_then(Value::as_array))
            .find(|items| !items.is_empty())?;

        debug!(index, count = items.len(), "found joongna item block");
        Some(items)
    })
}

/// Normalizes raw items, skipping the ones that cannot become listings.
pub fn parse_items(items: &[Value]) -> Vec<Listing> {
    let listings: Vec<Listing> = items
        .iter()
        .filter_map(|raw| match serde_json::from_value::<JoongnaItem>(raw.clone()) {
            Ok(item) => to_listing(item),
            Err(e) => {
                warn!(error = %e, "skipping undecodable joongna item");
                None
            }
        })
        .collect();

    debug!(total = items.len(), kept = listings.len(), "joongna results normalized");
    listings
}

/// Maps one item. Needs a seq, a non-blank title and a parseable sort date.
pub fn to_listing(item: JoongnaItem) -> Option<Listing> {
    let Some(seq) = item.seq else {
        trace!("joongna item without seq");
        return None;
    };
    let title = item.title.filter(|t| !t.trim().is_empty())?;

    let Some(timestamp) = item.sort_date.as_deref().and_then(parse_date) else {
        debug!(seq = %seq, sort_date = ?item.sort_date, "joongna item without usable sortDate");
        return None;
    };
    let update_time = format_date(timestamp)?;

    Some(Listing {
        platform: Platform::Joongna,
        title,
        price: item.price.map(format_price).unwrap_or_else(|| PRICE_ON_REQUEST.to_string()),
        link: permalink(Platform::Joongna, &seq),
        update_time,
        timestamp,
        status: translate_status(Platform::Joongna, item.state),
        image: image_or_fallback(item.url.as_deref()),
        location: Some(location_or_sentinel(item.main_location_name.as_deref())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::normalize::{FALLBACK_IMAGE, LOCATION_NOT_SHOWN};
    use crate::listing::Status;
    use serde_json::json;

    fn item(seq: i64, state: i64) -> Value {
        json!({
            "seq": seq,
            "title": "갤럭시 S24 울트라",
            "price": 1_000_000,
            "url": format!("https://img2.joongna.com/{seq}.jpg"),
            "state": state,
            "sortDate": "2024-12-16 00:30:00",
            "mainLocationName": "경기 성남시",
        })
    }

    fn page(next_data: &Value) -> String {
        format!(
            r#"<html><head></head><body><div id="__next"></div>
            <script id="__NEXT_DATA__" type="application/json">{}</script></body></html>"#,
            next_data
        )
    }

    fn next_data(queries: Vec<Value>) -> Value {
        json!({ "props": { "pageProps": { "dehydratedState": { "queries": queries } } } })
    }

    #[test]
    fn test_api_items() {
        let body = json!({ "meta": { "code": 0 }, "data": { "items": [item(1, 0), item(2, 1)] } });
        assert_eq!(api_items(&body.to_string()).unwrap().len(), 2);
    }

    #[test]
    fn test_api_items_missing_data_is_empty() {
        assert!(api_items("").unwrap().is_empty());
        assert!(api_items(r#"{"meta": {"code": 500}}"#).unwrap().is_empty());
        assert!(api_items(r#"{"data": {"items": null}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_api_items_not_json_is_malformed() {
        let err = api_items("<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[test]
    fn test_page_items_probes_past_empty_blocks() {
        let data = next_data(vec![
            json!({ "queryKey": ["banner"], "state": { "data": { "banners": [] } } }),
            json!({ "queryKey": ["count"], "state": { "data": { "data": { "items": [] } } } }),
            json!({
                "queryKey": ["search"],
                "state": { "data": { "data": { "items": [item(10, 0), item(11, 0)] } } }
            }),
            json!({
                "queryKey": ["later"],
                "state": { "data": { "data": { "items": [item(99, 0)] } } }
            }),
        ]);

        let items = page_items(&page(&data)).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["seq"], 10);
    }

    #[test]
    fn test_find_item_block_alternate_layouts() {
        let flat = vec![json!({ "state": { "data": { "items": [item(1, 0)] } } })];
        assert_eq!(find_item_block(&flat).unwrap().len(), 1);

        let paged = vec![json!({
            "state": { "data": { "pages": [{ "data": { "items": [item(2, 0)] } }] } }
        })];
        assert_eq!(find_item_block(&paged).unwrap()[0]["seq"], 2);
    }

    #[test]
    fn test_find_item_block_none() {
        assert!(find_item_block(&[]).is_none());
        assert!(find_item_block(&[json!({ "state": { "data": null } }), json!(42)]).is_none());
    }

    // Upstream structure drift is an accepted failure mode: it must degrade
    // to an empty result, never an error or a panic.
    #[test]
    fn test_page_items_shape_drift_is_empty() {
        let drifted = json!({ "props": { "pageProps": { "initialState": { "search": [] } } } });
        assert!(page_items(&page(&drifted)).unwrap().is_empty());

        let queries_not_array =
            json!({ "props": { "pageProps": { "dehydratedState": { "queries": {} } } } });
        assert!(page_items(&page(&queries_not_array)).unwrap().is_empty());
    }

    #[test]
    fn test_page_items_without_next_data() {
        let err = page_items("<html><body>no data</body></html>").unwrap_err();
        assert!(err.to_string().contains("__NEXT_DATA__ not found"));
    }

    #[test]
    fn test_page_items_invalid_next_data() {
        let html = r#"<script id="__NEXT_DATA__" type="application/json">{ broken</script>"#;
        let err = page_items(html).unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[test]
    fn test_to_listing_maps_fields() {
        let listing = parse_items(&[item(195733221, 1)]).pop().unwrap();

        assert_eq!(listing.platform, Platform::Joongna);
        assert_eq!(listing.title, "갤럭시 S24 울트라");
        assert_eq!(listing.price, "1,000,000원");
        assert_eq!(listing.link, "https://m.joongna.com/product/195733221");
        assert_eq!(listing.timestamp, 1_734_276_600);
        assert_eq!(listing.update_time, "24-12-16");
        assert_eq!(listing.status, Status::Reserved);
        assert_eq!(listing.image, "https://img2.joongna.com/195733221.jpg");
        assert_eq!(listing.location.as_deref(), Some("경기 성남시"));
    }

    #[test]
    fn test_to_listing_fallbacks() {
        let listing = to_listing(JoongnaItem {
            seq: Some("1".into()),
            title: Some("소니 a7c".into()),
            sort_date: Some("2024-12-16T00:30:00+09:00".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(listing.price, PRICE_ON_REQUEST);
        assert_eq!(listing.image, FALLBACK_IMAGE);
        assert_eq!(listing.location.as_deref(), Some(LOCATION_NOT_SHOWN));
        assert_eq!(listing.status, Status::Unknown);
    }

    #[test]
    fn test_to_listing_status_has_no_removed() {
        let listing = parse_items(&[item(1, 3)]).pop().unwrap();
        assert_eq!(listing.status, Status::Unknown);

        let listing = parse_items(&[item(1, 2)]).pop().unwrap();
        assert_eq!(listing.status, Status::SoldOut);
    }

    #[test]
    fn test_parse_items_skips_unusable() {
        let mut no_date = item(2, 0);
        no_date.as_object_mut().unwrap().remove("sortDate");
        let mut bad_date = item(3, 0);
        bad_date["sortDate"] = json!("어제");
        let mut no_seq = item(4, 0);
        no_seq.as_object_mut().unwrap().remove("seq");

        let listings = parse_items(&[item(1, 0), no_date, bad_date, no_seq, json!("junk")]);
        assert_eq!(listings.len(), 1);
        assert!(listings[0].link.ends_with("/1"));
    }
}
