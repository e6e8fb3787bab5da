//! Bunjang (번개장터) source: HTTP client, payload models, and parser.

pub mod client;
pub mod models;
pub mod parser;

pub use client::{BunjangSource, RawPayload};
pub use models::BunjangItem;
