//! Joongna (중고나라) source: search API and search-page strategies.

pub mod client;
pub mod models;
pub mod parser;

pub use client::{JoongnaSource, JoongnaStrategy};
pub use models::JoongnaItem;
