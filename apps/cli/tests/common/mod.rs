//! Shared test infrastructure for the client integration tests.
//!
//! `FakeBackend` serves the subset of `/api/v1` the client talks to from an
//! in-process axum router bound to an ephemeral port. Tests script its
//! responses and inspect the requests it recorded.

#![allow(dead_code)]

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use srs_client::api::ApiClient;

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";

/// One scripted recommendation response.
#[derive(Debug, Clone)]
pub struct ScriptedRecommendations {
    pub body: Value,
    pub rec_source: Option<&'static str>,
    pub rec_source_header: &'static str,
}

/// Mutable backend state, shared between the router and the test.
#[derive(Debug, Default)]
pub struct BackendState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_generation: u32,
    pub refresh_calls: u32,
    pub refresh_rejected: bool,
    pub queue_cards: Vec<Value>,
    pub queue_paging: Option<Value>,
    pub queue_requests: Vec<HashMap<String, String>>,
    pub submitted_reviews: Vec<Value>,
    pub recommendation_pages: Vec<ScriptedRecommendations>,
    pub recommendation_requests: Vec<HashMap<String, String>>,
    pub feedback: Vec<(i64, Value)>,
    pub failing_leaderboards: HashSet<String>,
}

type Shared = Arc<Mutex<BackendState>>;

/// A fake backend listening on `127.0.0.1`.
pub struct FakeBackend {
    pub base_url: String,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Fake backend has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}/api/v1", addr),
            state,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }

    /// A client that has already logged in.
    pub async fn logged_in_client(&self) -> ApiClient {
        let client = self.client();
        client
            .login(USERNAME, PASSWORD)
            .await
            .expect("Login against fake backend failed");
        client
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("Fake backend state poisoned")
    }

    /// Invalidate the current access token; the refresh token stays valid.
    pub fn expire_access_token(&self) {
        self.state().access_token = Some("expired-elsewhere".to_string());
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/review/queue", get(review_queue))
        .route("/api/v1/review/submit", post(submit_review))
        .route("/api/v1/ai/recommendations", get(recommendations))
        .route(
            "/api/v1/ai/recommendations/:problem_id/feedback",
            post(recommendation_feedback),
        )
        .route("/api/v1/leaderboard/:kind", get(leaderboard))
        .with_state(state)
}

fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}

fn authorized(state: &BackendState, headers: &HeaderMap) -> bool {
    state.access_token.is_some() && cookie(headers, "ACCESS_TOKEN") == state.access_token
}

fn issue_tokens(state: &mut BackendState) -> Response {
    state.token_generation += 1;
    let access = format!("access-{}", state.token_generation);
    let refresh = format!("refresh-{}", state.token_generation);
    state.access_token = Some(access.clone());
    state.refresh_token = Some(refresh.clone());

    (
        AppendHeaders([
            (
                header::SET_COOKIE,
                format!("ACCESS_TOKEN={}; Path=/; HttpOnly", access),
            ),
            (
                header::SET_COOKIE,
                format!("REFRESH_TOKEN={}; Path=/; HttpOnly", refresh),
            ),
        ]),
        Json(json!({
            "success": true,
            "user": { "id": 1, "username": USERNAME, "email": "alice@example.com" }
        })),
    )
        .into_response()
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("state poisoned");
    if body["username"] != USERNAME || body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "bad credentials" })),
        )
            .into_response();
    }
    issue_tokens(&mut state)
}

async fn refresh(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().expect("state poisoned");
    state.refresh_calls += 1;
    let presented = cookie(&headers, "REFRESH_TOKEN");
    if state.refresh_rejected || presented.is_none() || presented != state.refresh_token {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    issue_tokens(&mut state)
}

async fn logout(State(state): State<Shared>) -> Response {
    let mut state = state.lock().expect("state poisoned");
    state.access_token = None;
    state.refresh_token = None;
    (
        AppendHeaders([
            (header::SET_COOKIE, "ACCESS_TOKEN=; Max-Age=0; Path=/"),
            (header::SET_COOKIE, "REFRESH_TOKEN=; Max-Age=0; Path=/"),
        ]),
        Json(json!({ "success": true })),
    )
        .into_response()
}

async fn review_queue(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().expect("state poisoned");
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.queue_requests.push(params);

    let mut body = json!({
        "cards": state.queue_cards,
        "totalCount": state.queue_cards.len(),
        "currentPage": 1,
        "pageSize": state.queue_cards.len(),
        "totalPages": 1,
        "stats": { "dueCount": 0, "overdueCount": 0 }
    });
    if let Some(Value::Object(paging)) = &state.queue_paging {
        for (k, v) in paging {
            body[k] = v.clone();
        }
    }
    Json(body).into_response()
}

async fn submit_review(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("state poisoned");
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.submitted_reviews.push(body);
    Json(json!({
        "success": true,
        "nextReviewDate": "2026-06-04T08:00:00Z",
        "newState": "REVIEW",
        "intervals": { "again": 1, "hard": 2, "good": 3, "easy": 6 }
    }))
    .into_response()
}

async fn recommendations(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().expect("state poisoned");
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.recommendation_requests.push(params);
    if state.recommendation_pages.is_empty() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    let page = state.recommendation_pages.remove(0);
    let mut response_headers = HeaderMap::new();
    if let Some(source) = page.rec_source {
        response_headers.insert(
            page.rec_source_header,
            source.parse().expect("invalid header value"),
        );
    }
    (response_headers, Json(page.body)).into_response()
}

async fn recommendation_feedback(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(problem_id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("state poisoned");
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.feedback.push((problem_id, body));
    Json(json!({ "success": true })).into_response()
}

async fn leaderboard(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(kind): Path<String>,
) -> Response {
    let state = state.lock().expect("state poisoned");
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.failing_leaderboards.contains(&kind) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    Json(json!([
        { "rank": 1, "userId": 7, "username": "bob", "value": 42.0 },
        { "rank": 2, "userId": 1, "username": USERNAME, "value": 40.5 }
    ]))
    .into_response()
}
