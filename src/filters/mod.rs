//! Composable predicates that decide which raw Bunjang items become listings.

pub mod kind;
pub mod recency;
pub mod status;

use crate::bunjang::BunjangItem;

pub use kind::ProductKindFilter;
pub use recency::RecencyFilter;
pub use status::OnSaleFilter;

/// Trait for filtering raw items.
pub trait Filter: Send + Sync {
    /// Returns true if the item passes the filter.
    fn matches(&self, item: &BunjangItem) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if an item passes all filters.
    pub fn matches(&self, item: &BunjangItem) -> bool {
        self.filters.iter().all(|f| f.matches(item))
    }

    /// Descriptions of the filters the item fails.
    pub fn rejections(&self, item: &BunjangItem) -> Vec<String> {
        self.filters.iter().filter(|f| !f.matches(item)).map(|f| f.description()).collect()
    }

    /// Filters a collection of items.
    pub fn apply(&self, items: Vec<BunjangItem>) -> Vec<BunjangItem> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Drops ad slots.
    pub fn products_only(mut self) -> Self {
        self.chain.add(ProductKindFilter::new());
        self
    }

    /// Drops reserved, sold and removed items.
    pub fn on_sale(mut self) -> Self {
        self.chain.add(OnSaleFilter::new());
        self
    }

    /// Drops items not updated within `window_secs` before `now`.
    pub fn updated_within(mut self, now: i64, window_secs: u64) -> Self {
        self.chain.add(RecencyFilter::within(now, window_secs));
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
