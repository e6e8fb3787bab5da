//! Search command implementation.

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::Result;
use tracing::info;

/// Executes one aggregated search.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, keyword: &str) -> Result<String> {
        let aggregator = Aggregator::from_config(&self.config)?;
        self.execute_with(&aggregator, keyword).await
    }

    /// Executes the search with a provided aggregator (for testing).
    pub async fn execute_with(&self, aggregator: &Aggregator, keyword: &str) -> Result<String> {
        let response = aggregator.search(keyword).await?;

        info!(keyword = %response.keyword, count = response.count(), "search finished");

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_response(&response))
    }
}
