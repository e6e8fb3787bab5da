//! Shared normalization helpers: price, date, status, permalink and fallbacks.
//!
//! Every source adapter builds its [`Listing`](super::Listing) fields through
//! these functions so both platforms render identically.

use super::models::{Platform, Status};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

/// Placeholder shown when an upstream item has no image.
pub const FALLBACK_IMAGE: &str = "https://via.placeholder.com/300x300?text=No+Image";

/// Location shown when a Joongna item has no region.
pub const LOCATION_NOT_SHOWN: &str = "지역 미표시";

/// Price shown when a Joongna item has no price.
pub const PRICE_ON_REQUEST: &str = "가격문의";

/// Currency suffix appended to every formatted price.
pub const CURRENCY_SUFFIX: &str = "원";

const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Naive `sortDate` layouts, interpreted as KST.
const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("KST offset is in range")
}

/// Formats an integer amount with thousands separators and the won suffix.
///
/// ```
/// use secondhand_search::listing::normalize::format_price;
/// assert_eq!(format_price(1_000_000), "1,000,000원");
/// ```
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}{CURRENCY_SUFFIX}")
}

/// Formats epoch seconds as a compact `yy-mm-dd` date in KST.
///
/// Returns `None` if the timestamp is outside chrono's range.
pub fn format_date(epoch_secs: i64) -> Option<String> {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|utc| utc.with_timezone(&kst()).format("%y-%m-%d").to_string())
}

/// Parses an upstream date string into epoch seconds.
///
/// Accepts RFC 3339 (offset respected) or a naive date-time, which is
/// taken to be KST.
pub fn parse_date(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }

    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| kst().from_local_datetime(&naive).single())
        .map(|dt| dt.timestamp())
}

/// Translates a platform-specific status code.
///
/// Bunjang knows codes 0-3; Joongna has no "removed" state and knows 0-2.
/// Anything else is [`Status::Unknown`].
pub fn translate_status(platform: Platform, code: Option<i64>) -> Status {
    match (platform, code) {
        (_, Some(0)) => Status::OnSale,
        (_, Some(1)) => Status::Reserved,
        (_, Some(2)) => Status::SoldOut,
        (Platform::Bunjang, Some(3)) => Status::Removed,
        _ => Status::Unknown,
    }
}

/// Builds the item permalink from the platform's URL template.
pub fn permalink(platform: Platform, id: &str) -> String {
    match platform {
        Platform::Bunjang => format!("https://bunjang.co.kr/products/{id}"),
        Platform::Joongna => format!("https://m.joongna.com/product/{id}"),
    }
}

/// Returns the image URL, or the placeholder when missing or blank.
pub fn image_or_fallback(image: Option<&str>) -> String {
    non_blank(image).unwrap_or(FALLBACK_IMAGE).to_string()
}

/// Returns the location, or the "not shown" sentinel when missing or blank.
pub fn location_or_sentinel(location: Option<&str>) -> String {
    non_blank(location).unwrap_or(LOCATION_NOT_SHOWN).to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
