//! HTTP server exposing the search API.

use crate::aggregator::Aggregator;
use crate::bunjang::BunjangSource;
use crate::commands::raw::DEFAULT_RAW_KEYWORD;
use crate::config::Config;
use crate::error::SearchError;
use crate::listing::SearchRequest;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Filter, Rejection, Reply};

const MSG_EMPTY_KEYWORD: &str = "검색어를 입력해주세요.";
const MSG_SEARCH_FAILED: &str = "검색 중 오류가 발생했습니다.";

/// Largest accepted request body.
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub raw_source: Arc<BunjangSource>,
}

#[derive(Debug, Deserialize)]
struct RawQuery {
    keyword: Option<String>,
}

/// Builds the API routes without the static file fallback.
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let search = warp::path!("api" / "search")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(search_handler);

    let test_raw = warp::path!("api" / "test-raw")
        .and(warp::get())
        .and(warp::query::<RawQuery>())
        .and(with_state(state))
        .and_then(test_raw_handler);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "status": "ok" })));

    search.or(test_raw).or(health)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_reply<T: Serialize>(
    body: &T,
    status: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(body), status)
}

async fn search_handler(body: Bytes, state: AppState) -> Result<impl Reply, Infallible> {
    // An unreadable body is treated like a missing keyword.
    let request: SearchRequest = serde_json::from_slice(&body).unwrap_or_default();

    match state.aggregator.search(&request.keyword).await {
        Ok(response) => Ok(json_reply(&response, StatusCode::OK)),
        Err(SearchError::InvalidRequest) => {
            warn!("search rejected: empty keyword");
            Ok(json_reply(&json!({ "error": MSG_EMPTY_KEYWORD }), StatusCode::BAD_REQUEST))
        }
        Err(e) => {
            error!(error = %e, "search failed");
            Ok(json_reply(
                &json!({ "error": MSG_SEARCH_FAILED }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn test_raw_handler(query: RawQuery, state: AppState) -> Result<impl Reply, Infallible> {
    let keyword = query
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .unwrap_or(DEFAULT_RAW_KEYWORD);

    match state.raw_source.fetch_raw(keyword).await {
        Ok(payload) => {
            let data = serde_json::from_str::<Value>(&payload.body)
                .unwrap_or(Value::String(payload.body));
            Ok(json_reply(
                &json!({ "success": true, "status": payload.status, "data": data }),
                StatusCode::OK,
            ))
        }
        Err(e) => {
            error!(keyword, error = %e, "raw fetch failed");
            Ok(json_reply(
                &json!({ "success": false, "error": e.to_string() }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

/// Runs the HTTP server.
pub struct ServeCommand {
    config: Config,
}

impl ServeCommand {
    /// Creates a new serve command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Builds the handler state with the real marketplace adapters.
    pub fn state(&self) -> Result<AppState> {
        Ok(AppState {
            aggregator: Arc::new(Aggregator::from_config(&self.config)?),
            raw_source: Arc::new(BunjangSource::new(&self.config)?),
        })
    }

    /// Binds `0.0.0.0:port` and serves until the process exits.
    pub async fn execute(&self) -> Result<()> {
        let api = routes(self.state()?);
        let addr = ([0, 0, 0, 0], self.config.port);

        info!(port = self.config.port, "server listening");

        match &self.config.static_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "serving static files");
                let site = api.or(warp::fs::dir(dir.clone())).with(warp::trace::request());
                warp::serve(site).run(addr).await;
            }
            None => {
                warp::serve(api.with(warp::trace::request())).run(addr).await;
            }
        }

        Ok(())
    }
}
