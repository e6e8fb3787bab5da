//! Fans a keyword out to every source and merges the results newest first.

use crate::bunjang::BunjangSource;
use crate::config::Config;
use crate::error::{SearchError, SourceError};
use crate::joongna::JoongnaSource;
use crate::listing::{Listing, Platform, SearchResponse};
use crate::source::ListingSource;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{error, info, warn};

/// Stateless search service holding one adapter per marketplace.
pub struct Aggregator {
    bunjang: Arc<dyn ListingSource>,
    joongna: Arc<dyn ListingSource>,
}

impl Aggregator {
    /// Builds an aggregator from explicit sources.
    pub fn new(bunjang: Arc<dyn ListingSource>, joongna: Arc<dyn ListingSource>) -> Self {
        Self { bunjang, joongna }
    }

    /// Builds an aggregator with the real marketplace adapters.
    pub fn from_config(config: &Config) -> Result<Self> {
        let bunjang = BunjangSource::new(config).context("Failed to create Bunjang client")?;
        let joongna = JoongnaSource::new(config).context("Failed to create Joongna client")?;

        Ok(Self::new(Arc::new(bunjang), Arc::new(joongna)))
    }

    /// Searches both marketplaces concurrently.
    ///
    /// A failing or crashed source contributes nothing; only a blank keyword
    /// fails the whole search. The response echoes the keyword as given while
    /// upstreams receive it trimmed.
    pub async fn search(&self, keyword: &str) -> Result<SearchResponse, SearchError> {
        let query = keyword.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidRequest);
        }

        info!(keyword = query, "search started");

        let bunjang = spawn_fetch(Arc::clone(&self.bunjang), query);
        let joongna = spawn_fetch(Arc::clone(&self.joongna), query);
        let (bunjang, joongna) = tokio::join!(bunjang, joongna);

        let bunjang = contribution(Platform::Bunjang, bunjang);
        let joongna = contribution(Platform::Joongna, joongna);

        let bunjang_count = bunjang.len();
        let joongna_count = joongna.len();
        let results = merge(vec![bunjang, joongna]);

        info!(
            keyword = query,
            bunjang = bunjang_count,
            joongna = joongna_count,
            total = results.len(),
            "search completed"
        );

        Ok(SearchResponse {
            keyword: keyword.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            results,
        })
    }
}

fn spawn_fetch(
    source: Arc<dyn ListingSource>,
    keyword: &str,
) -> tokio::task::JoinHandle<Result<Vec<Listing>, SourceError>> {
    let keyword = keyword.to_string();
    tokio::spawn(async move { source.fetch(&keyword).await })
}

/// Turns one source's outcome into its share of the result.
fn contribution(
    platform: Platform,
    outcome: Result<Result<Vec<Listing>, SourceError>, JoinError>,
) -> Vec<Listing> {
    match outcome {
        Ok(Ok(listings)) => listings,
        Ok(Err(e)) => {
            warn!(platform = platform.id(), error = %e, "source failed, using empty result");
            Vec::new()
        }
        Err(e) => {
            error!(platform = platform.id(), error = %e, "source task died, using empty result");
            Vec::new()
        }
    }
}

/// Concatenates listing groups and orders them newest first.
///
/// The sort is stable, so equal timestamps keep their concatenation order.
pub fn merge(groups: Vec<Vec<Listing>>) -> Vec<Listing> {
    let mut merged: Vec<Listing> = groups.into_iter().flatten().collect();
    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged
}
