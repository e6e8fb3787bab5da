//! End-to-end search over mocked marketplace endpoints.

use secondhand_search::bunjang::BunjangSource;
use secondhand_search::config::Config;
use secondhand_search::joongna::{JoongnaSource, JoongnaStrategy};
use secondhand_search::{Aggregator, Platform, SearchError};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUNJANG_FIXTURE: &str = include_str!("fixtures/bunjang_search.json");
const JOONGNA_FIXTURE: &str = include_str!("fixtures/joongna_search.html");

/// Config whose recency window reaches back to the fixture dates.
fn make_test_config(strategy: JoongnaStrategy) -> Config {
    Config {
        recency_window_secs: 100 * 365 * 24 * 60 * 60,
        joongna_strategy: strategy,
        bunjang_timeout_secs: 5,
        joongna_timeout_secs: 5,
        ..Config::default()
    }
}

fn aggregator_for(server: &MockServer, strategy: JoongnaStrategy) -> Aggregator {
    let config = make_test_config(strategy);
    let bunjang = BunjangSource::with_base_url(&config, Some(server.uri())).unwrap();
    let joongna = JoongnaSource::with_base_url(&config, Some(server.uri())).unwrap();
    Aggregator::new(Arc::new(bunjang), Arc::new(joongna))
}

async fn mount_bunjang(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/1/find_v2.json"))
        .and(query_param("q", "맥북"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_joongna_page(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/search/{}", urlencoding::encode("맥북"))))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_merges_both_platforms() {
    let server = MockServer::start().await;
    mount_bunjang(&server, ResponseTemplate::new(200).set_body_string(BUNJANG_FIXTURE)).await;
    mount_joongna_page(&server, ResponseTemplate::new(200).set_body_string(JOONGNA_FIXTURE)).await;

    // Upstream mocks only match the trimmed keyword
    let response = aggregator_for(&server, JoongnaStrategy::Page).search(" 맥북 ").await.unwrap();

    assert_eq!(response.keyword, " 맥북 ");
    assert_eq!(response.count_for(Platform::Bunjang), 3);
    assert_eq!(response.count_for(Platform::Joongna), 2);
    assert!(response.results.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert_eq!(response.results[0].link, "https://m.joongna.com/product/195733221");
}

#[tokio::test]
async fn test_search_survives_bunjang_outage() {
    let server = MockServer::start().await;
    mount_bunjang(&server, ResponseTemplate::new(503)).await;
    mount_joongna_page(&server, ResponseTemplate::new(200).set_body_string(JOONGNA_FIXTURE)).await;

    let response = aggregator_for(&server, JoongnaStrategy::Page).search("맥북").await.unwrap();

    assert_eq!(response.count(), 2);
    assert!(response.results.iter().all(|l| l.platform == Platform::Joongna));
}

#[tokio::test]
async fn test_search_slow_bunjang_times_out() {
    let server = MockServer::start().await;
    mount_bunjang(
        &server,
        ResponseTemplate::new(200)
            .set_body_string(BUNJANG_FIXTURE)
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    mount_joongna_page(&server, ResponseTemplate::new(200).set_body_string(JOONGNA_FIXTURE)).await;

    let config = Config { bunjang_timeout_secs: 1, ..make_test_config(JoongnaStrategy::Page) };
    let bunjang = BunjangSource::with_base_url(&config, Some(server.uri())).unwrap();
    let joongna = JoongnaSource::with_base_url(&config, Some(server.uri())).unwrap();
    let aggregator = Aggregator::new(Arc::new(bunjang), Arc::new(joongna));

    let started = Instant::now();
    let response = aggregator.search("맥북").await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(response.count_for(Platform::Bunjang), 0);
    assert_eq!(response.count_for(Platform::Joongna), 2);
}

#[tokio::test]
async fn test_search_survives_joongna_outage() {
    let server = MockServer::start().await;
    mount_bunjang(&server, ResponseTemplate::new(200).set_body_string(BUNJANG_FIXTURE)).await;

    Mock::given(method("POST"))
        .and(path("/v3/search/app"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let response = aggregator_for(&server, JoongnaStrategy::Api).search("맥북").await.unwrap();

    assert_eq!(response.count(), 3);
    assert!(response.results.iter().all(|l| l.platform == Platform::Bunjang));
}

#[tokio::test]
async fn test_search_with_joongna_api() {
    let server = MockServer::start().await;
    mount_bunjang(&server, ResponseTemplate::new(200).set_body_json(json!({ "list": [] }))).await;

    Mock::given(method("POST"))
        .and(path("/v3/search/app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "items": [{
                "seq": 1,
                "title": "맥북 에어",
                "price": 500000,
                "state": 2,
                "sortDate": "2024-12-16 09:00:00"
            }] }
        })))
        .mount(&server)
        .await;

    let response = aggregator_for(&server, JoongnaStrategy::Api).search("맥북").await.unwrap();

    assert_eq!(response.count(), 1);
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["results"][0]["platform"], "중고나라");
    assert_eq!(value["results"][0]["status"], "판매완료");
    assert_eq!(value["results"][0]["updateTime"], "24-12-16");
}

#[tokio::test]
async fn test_search_blank_keyword_sends_no_requests() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = aggregator_for(&server, JoongnaStrategy::Api).search("   ").await.unwrap_err();
    assert!(matches!(err, SearchError::InvalidRequest));
}
