//! Batch smoke test: search a list of keywords and report per-platform counts.

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::listing::{Platform, SearchResponse};
use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

/// Keywords searched when none are given.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "맥북", "아이폰", "lg 그램", "갤럭시", "에어팟", "아이패드", "닌텐도", "플스5", "캐논", "소니",
];

const TOP_N: usize = 5;

/// Outcome of one keyword.
#[derive(Debug)]
pub struct KeywordReport {
    pub keyword: String,
    pub outcome: Result<SearchResponse, String>,
}

impl KeywordReport {
    fn count(&self, platform: Platform) -> usize {
        self.outcome.as_ref().map(|r| r.count_for(platform)).unwrap_or(0)
    }
}

/// Results of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub keywords: Vec<KeywordReport>,
}

impl BatchReport {
    /// Returns true if every keyword searched successfully.
    pub fn all_succeeded(&self) -> bool {
        self.keywords.iter().all(|k| k.outcome.is_ok())
    }

    /// Number of keywords that searched successfully.
    pub fn success_count(&self) -> usize {
        self.keywords.iter().filter(|k| k.outcome.is_ok()).count()
    }

    /// Total listings from `platform` across all keywords.
    pub fn total_for(&self, platform: Platform) -> usize {
        self.keywords.iter().map(|k| k.count(platform)).sum()
    }

    /// Renders the human-readable report.
    pub fn render(&self) -> String {
        let rule = "=".repeat(60);
        let bunjang_label = Platform::Bunjang.label();
        let joongna_label = Platform::Joongna.label();
        let mut lines = Vec::new();

        for report in &self.keywords {
            lines.push(String::new());
            lines.push(rule.clone());
            lines.push(format!("Keyword: {}", report.keyword));
            lines.push(rule.clone());

            match &report.outcome {
                Ok(response) => {
                    for platform in Platform::all() {
                        let count = response.count_for(*platform);
                        lines.push(format!("{}: {}", platform.label(), count));
                    }
                    lines.push(format!("Total: {}", response.count()));
                    lines.push(String::new());
                    lines.push(format!("Top {TOP_N} (newest first):"));

                    for (idx, item) in response.results.iter().take(TOP_N).enumerate() {
                        let title: String = item.title.chars().take(50).collect();
                        lines.push(format!("  {}. [{}] {}", idx + 1, item.platform.label(), title));
                        lines.push(format!(
                            "     {} | {} | {}",
                            item.price,
                            item.update_time,
                            item.status.label()
                        ));
                    }
                }
                Err(e) => lines.push(format!("FAILED: {e}")),
            }
        }

        lines.push(String::new());
        lines.push(rule.clone());
        lines.push("Summary".to_string());
        lines.push(rule);
        lines.push(format!("Succeeded: {}/{}", self.success_count(), self.keywords.len()));

        for report in &self.keywords {
            match &report.outcome {
                Ok(response) => lines.push(format!(
                    "  ok   {}: {} {} + {} {} = {}",
                    report.keyword,
                    bunjang_label,
                    report.count(Platform::Bunjang),
                    joongna_label,
                    report.count(Platform::Joongna),
                    response.count()
                )),
                Err(e) => lines.push(format!("  FAIL {}: {e}", report.keyword)),
            }
        }

        let bunjang = self.total_for(Platform::Bunjang);
        let joongna = self.total_for(Platform::Joongna);
        lines.push(String::new());
        lines.push(format!(
            "Totals: {bunjang_label} {bunjang}, {joongna_label} {joongna}, all {}",
            bunjang + joongna
        ));

        lines.push(String::new());
        if self.all_succeeded() && bunjang > 0 && joongna > 0 {
            lines.push("All searches passed with results from both platforms.".to_string());
        } else {
            lines.push("Some searches failed or a platform returned nothing.".to_string());
        }

        lines.join("\n")
    }
}

/// Runs a sequence of searches.
pub struct BatchCommand {
    config: Config,
}

impl BatchCommand {
    /// Creates a new batch command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the batch against the real marketplaces.
    pub async fn execute(&self, keywords: &[String]) -> Result<BatchReport> {
        let aggregator = Aggregator::from_config(&self.config)?;
        Ok(self.execute_with(&aggregator, keywords).await)
    }

    /// Runs the batch with a provided aggregator (for testing).
    pub async fn execute_with(&self, aggregator: &Aggregator, keywords: &[String]) -> BatchReport {
        let keywords: Vec<String> = if keywords.is_empty() {
            DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
        } else {
            keywords.to_vec()
        };

        let mut report = BatchReport::default();

        for (idx, keyword) in keywords.iter().enumerate() {
            if idx > 0 && self.config.batch_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.batch_delay_ms)).await;
            }

            let outcome = aggregator.search(keyword).await.map_err(|e| e.to_string());
            match &outcome {
                Ok(response) => {
                    info!(keyword = %keyword, total = response.count(), "batch search done")
                }
                Err(e) => warn!(keyword = %keyword, error = %e, "batch search failed"),
            }

            report.keywords.push(KeywordReport { keyword: keyword.clone(), outcome });
        }

        report
    }
}
