//! secondhand-search - Unified search over Korean secondhand marketplaces
//!
//! Fans a keyword out to Bunjang and Joongna concurrently, normalizes both
//! into one listing shape and merges them newest first.

pub mod aggregator;
pub mod bunjang;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod joongna;
pub mod lenient;
pub mod listing;
pub mod source;

pub use aggregator::Aggregator;
pub use config::Config;
pub use error::{SearchError, SourceError};
pub use listing::{Listing, Platform, SearchRequest, SearchResponse, Status};
pub use source::ListingSource;
