//! Turns a raw Bunjang search payload into normalized listings.

use super::models::BunjangItem;
use crate::filters::{FilterChain, FilterChainBuilder};
use crate::listing::normalize::{
    format_date, format_price, image_or_fallback, permalink, translate_status,
};
use crate::listing::{Listing, Platform};
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Parses a `find_v2.json` body.
///
/// Items must be real products, on sale, and updated within
/// `recency_window_secs` of `now`. An empty or unexpected body yields an
/// empty result instead of an error.
pub fn parse_search(body: &str, now: i64, recency_window_secs: u64) -> Vec<Listing> {
    let items = match raw_items(body) {
        Some(items) => items,
        None => return Vec::new(),
    };

    let filters = FilterChainBuilder::new()
        .products_only()
        .on_sale()
        .updated_within(now, recency_window_secs)
        .build();

    let total = items.len();
    let listings: Vec<Listing> =
        items.into_iter().filter_map(|item| accept(&filters, item)).collect();

    debug!(total, kept = listings.len(), "bunjang results filtered");
    listings
}

/// Extracts the `list` array, or `None` when the body has no usable list.
fn raw_items(body: &str) -> Option<Vec<BunjangItem>> {
    if body.trim().is_empty() {
        debug!("bunjang returned an empty body");
        return None;
    }

    let payload: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "bunjang body is not JSON");
            return None;
        }
    };

    let Some(list) = payload.get("list").and_then(Value::as_array) else {
        debug!("bunjang payload has no list");
        return None;
    };

    let items = list
        .iter()
        .filter_map(|raw| match serde_json::from_value::<BunjangItem>(raw.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "skipping undecodable bunjang item");
                None
            }
        })
        .collect();

    Some(items)
}

fn accept(filters: &FilterChain, item: BunjangItem) -> Option<Listing> {
    if !filters.matches(&item) {
        debug!(
            pid = item.pid.as_deref().unwrap_or("-"),
            name = item.name.as_deref().unwrap_or("-"),
            reasons = ?filters.rejections(&item),
            "dropping bunjang item"
        );
        return None;
    }

    let listing = to_listing(item);
    if listing.is_none() {
        trace!("bunjang item missing pid or name");
    }
    listing
}

/// Maps one raw item. Needs a pid, a non-blank name and a valid update time.
pub fn to_listing(item: BunjangItem) -> Option<Listing> {
    let pid = item.pid?;
    let title = item.name.filter(|n| !n.trim().is_empty())?;
    let timestamp = item.update_time?;
    let update_time = format_date(timestamp)?;

    Some(Listing {
        platform: Platform::Bunjang,
        title,
        price: format_price(item.price.unwrap_or(0)),
        link: permalink(Platform::Bunjang, &pid),
        update_time,
        timestamp,
        status: translate_status(Platform::Bunjang, item.status),
        image: image_or_fallback(item.product_image.as_deref()),
        location: None,
    })
}
