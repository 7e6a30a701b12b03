//! A stand-in for the judicial-records API, serving fixed fixtures.
//!
//! Implements the read endpoints the client consumes: verdict lookup,
//! hearing schedules, story metadata, full-text content documents, and the
//! paginated story search. Every request target is recorded so tests can
//! assert on exactly what a client asked for.

pub mod fixtures;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use fixtures::{CaseFixture, Fixtures, StoryQuery};

pub const DEFAULT_PAGE_SIZE: usize = 2;

/// Shared server state: fixtures, pagination size, and the request log.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    fixtures: Fixtures,
    page_size: usize,
    requests: Mutex<Vec<String>>,
}

impl AppState {
    pub fn new(fixtures: Fixtures, page_size: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                fixtures,
                page_size: page_size.max(1),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.inner.fixtures
    }

    /// Every request target (path and query, still percent-encoded) in
    /// arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.inner
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, target: String) {
        self.inner
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target);
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/search/stories", get(search_stories))
        .route("/contents/{id}", get(get_content))
        .route("/{court}/{story}", get(get_story))
        .route("/{court}/{story}/verdict", get(get_verdict))
        .route("/{court}/{story}/schedules", get(get_schedules))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the sample fixtures, advertising the listener's own address in
/// content URLs.
pub async fn run(listener: TcpListener, page_size: usize) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    let state = AppState::new(Fixtures::sample(&format!("http://{addr}")), page_size);
    serve(listener, state).await
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    info!(
        addr = %listener.local_addr()?,
        cases = state.fixtures().cases.len(),
        page_size = state.inner.page_size,
        "mock judicial-records API ready"
    );
    axum::serve(listener, app(state)).await
}

async fn record_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    state.record(target);
    next.run(request).await
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})))
}

async fn get_verdict(
    State(state): State<AppState>,
    Path((court, story)): Path<(String, String)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let fixtures = state.fixtures();
    fixtures
        .find(&court, &story)
        .map(|case| Json(case.verdict(&fixtures.public_url)))
        .ok_or_else(not_found)
}

async fn get_schedules(
    State(state): State<AppState>,
    Path((court, story)): Path<(String, String)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .fixtures()
        .find(&court, &story)
        .map(|case| Json(json!({"schedules": case.schedules})))
        .ok_or_else(not_found)
}

async fn get_story(
    State(state): State<AppState>,
    Path((court, story)): Path<(String, String)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .fixtures()
        .find(&court, &story)
        .map(|case| Json(json!({"story": case.story()})))
        .ok_or_else(not_found)
}

async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .fixtures()
        .find_by_id(id)
        .and_then(CaseFixture::content_document)
        .map(Json)
        .ok_or_else(not_found)
}

async fn search_stories(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let param = |key: &str| params.get(key).map(String::as_str).unwrap_or("");
    let query = StoryQuery {
        adjudged_on_gteq: param("q[adjudged_on_gteq]"),
        adjudged_on_lteq: param("q[adjudged_on_lteq]"),
        judges_names_cont: param("q[judges_names_cont]"),
        lawyer_names_cont: param("q[lawyer_names_cont]"),
        number: param("q[number]"),
        story_type: param("q[story_type]"),
        word: param("q[word]"),
        year: param("q[year]"),
    };
    let page = param("page").parse::<usize>().unwrap_or(1).max(1);
    let page_size = state.inner.page_size;

    let matching: Vec<&CaseFixture> = state
        .fixtures()
        .cases
        .iter()
        .filter(|case| query.matches(case))
        .collect();
    let stories: Vec<Value> = matching
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .map(|case| case.summary())
        .collect();

    Json(json!({
        "pagination": {
            "pages": matching.len().div_ceil(page_size),
            "page": page,
            "count": matching.len(),
        },
        "stories": stories,
    }))
}
