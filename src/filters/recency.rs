//! Recency filter on the item's update time.

use super::Filter;
use crate::bunjang::BunjangItem;

/// Keeps items updated strictly after a cutoff (epoch seconds).
pub struct RecencyFilter {
    cutoff: i64,
    window_secs: u64,
}

impl RecencyFilter {
    /// Keeps items updated within `window_secs` before `now`.
    ///
    /// Windows reaching past the epoch range clamp the cutoff to `i64::MIN`.
    pub fn within(now: i64, window_secs: u64) -> Self {
        let window = i64::try_from(window_secs).unwrap_or(i64::MAX);
        Self { cutoff: now.saturating_sub(window), window_secs }
    }

    /// Oldest accepted update time (exclusive).
    pub fn cutoff(&self) -> i64 {
        self.cutoff
    }
}

impl Filter for RecencyFilter {
    fn matches(&self, item: &BunjangItem) -> bool {
        item.update_time.is_some_and(|t| t > self.cutoff)
    }

    fn description(&self) -> String {
        format!("updated within {}s", self.window_secs)
    }
}
