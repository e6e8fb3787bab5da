//! Normalized listing model and the helpers that build it.

pub mod models;
pub mod normalize;

pub use models::{Listing, Platform, SearchRequest, SearchResponse, Status};
