//! Sale-status filter.

use super::Filter;
use crate::bunjang::BunjangItem;

/// Keeps only items that are currently for sale.
pub struct OnSaleFilter;

impl OnSaleFilter {
    /// Creates a new on-sale filter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for OnSaleFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for OnSaleFilter {
    fn matches(&self, item: &BunjangItem) -> bool {
        item.is_on_sale()
    }

    fn description(&self) -> String {
        "on sale only".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(status: Option<i64>) -> BunjangItem {
        BunjangItem { status, ..Default::default() }
    }

    #[test]
    fn test_on_sale_filter() {
        let filter = OnSaleFilter::new();

        assert!(filter.matches(&make_item(Some(0))));
        assert!(!filter.matches(&make_item(Some(1))));
        assert!(!filter.matches(&make_item(Some(2))));
        assert!(!filter.matches(&make_item(Some(3))));
        assert!(!filter.matches(&make_item(None)));
    }
}
