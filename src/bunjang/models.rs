//! Raw Bunjang `find_v2.json` payload items.

use crate::lenient;
use serde::{Deserialize, Serialize};

/// `type` value of real products; everything else is an ad slot.
pub const PRODUCT_TYPE: &str = "PRODUCT";

/// Status code meaning "currently for sale".
pub const ON_SALE_CODE: i64 = 0;

/// One entry of the `list` array.
///
/// Numeric fields arrive as strings or numbers depending on the endpoint
/// version, so they are decoded leniently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BunjangItem {
    /// Product id
    #[serde(default, deserialize_with = "lenient::id")]
    pub pid: Option<String>,
    /// Product name
    #[serde(default)]
    pub name: Option<String>,
    /// Price in won
    #[serde(default, deserialize_with = "lenient::int")]
    pub price: Option<i64>,
    /// Status code (0 on sale, 1 reserved, 2 sold, 3 removed)
    #[serde(default, deserialize_with = "lenient::int")]
    pub status: Option<i64>,
    /// "PRODUCT" for listings, other values for ads
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    /// Last update, epoch seconds
    #[serde(default, deserialize_with = "lenient::int")]
    pub update_time: Option<i64>,
    /// Thumbnail URL
    #[serde(default)]
    pub product_image: Option<String>,
}

impl BunjangItem {
    /// Returns true for real products (not ads).
    pub fn is_product(&self) -> bool {
        self.item_type.as_deref() == Some(PRODUCT_TYPE)
    }

    /// Returns true if the item is currently for sale.
    pub fn is_on_sale(&self) -> bool {
        self.status == Some(ON_SALE_CODE)
    }
}
