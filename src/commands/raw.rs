//! Raw payload dump for debugging upstream shape changes.

use crate::bunjang::BunjangSource;
use crate::config::Config;
use anyhow::{Context, Result};
use serde_json::Value;

/// Keyword used when none is given.
pub const DEFAULT_RAW_KEYWORD: &str = "에파";

/// Fetches and prints the unprocessed Bunjang search payload.
pub struct RawCommand {
    config: Config,
}

impl RawCommand {
    /// Creates a new raw command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the payload and returns it pretty-printed.
    pub async fn execute(&self, keyword: Option<&str>) -> Result<String> {
        let source = BunjangSource::new(&self.config)?;
        self.execute_with(&source, keyword).await
    }

    /// Fetches with a provided source (for testing).
    pub async fn execute_with(
        &self,
        source: &BunjangSource,
        keyword: Option<&str>,
    ) -> Result<String> {
        let keyword =
            keyword.map(str::trim).filter(|k| !k.is_empty()).unwrap_or(DEFAULT_RAW_KEYWORD);

        let payload = source.fetch_raw(keyword).await.context("Failed to fetch raw payload")?;

        match serde_json::from_str::<Value>(&payload.body) {
            Ok(value) => Ok(serde_json::to_string_pretty(&value)?),
            Err(_) => Ok(payload.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_raw_pretty_prints_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/1/find_v2.json"))
            .and(query_param("q", DEFAULT_RAW_KEYWORD))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"list":[{"pid":"1"}]}"#))
            .mount(&server)
            .await;

        let config = Config::default();
        let source = BunjangSource::with_base_url(&config, Some(server.uri())).unwrap();
        let output = RawCommand::new(config).execute_with(&source, None).await.unwrap();

        assert!(output.contains("\"list\": ["));
        assert!(output.contains("\"pid\": \"1\""));
    }

    #[tokio::test]
    async fn test_raw_passes_through_non_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server)
            .await;

        let config = Config::default();
        let source = BunjangSource::with_base_url(&config, Some(server.uri())).unwrap();
        let output = RawCommand::new(config).execute_with(&source, Some("맥북")).await.unwrap();

        assert_eq!(output, "<html>blocked</html>");
    }

    #[tokio::test]
    async fn test_raw_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET")).respond_with(ResponseTemplate::new(502)).mount(&server).await;

        let config = Config::default();
        let source = BunjangSource::with_base_url(&config, Some(server.uri())).unwrap();
        let err = RawCommand::new(config).execute_with(&source, Some("맥북")).await.unwrap_err();

        assert!(err.to_string().contains("Failed to fetch raw payload"));
    }
}
