//! Ad-slot filter.

use super::Filter;
use crate::bunjang::BunjangItem;

/// Keeps real products and drops advertisement slots mixed into results.
pub struct ProductKindFilter;

impl ProductKindFilter {
    /// Creates a new product kind filter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProductKindFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for ProductKindFilter {
    fn matches(&self, item: &BunjangItem) -> bool {
        item.is_product()
    }

    fn description(&self) -> String {
        "products only (no ads)".to_string()
    }
}
