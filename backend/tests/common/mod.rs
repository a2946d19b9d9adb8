//! Test helpers: a stub NWS upstream served on an ephemeral port and a
//! router wired to it.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get as route_get,
    Json, Router,
};
use serde_json::{json, Value};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::net::TcpListener;
use tower::ServiceExt;

use weather_api::{config::NwsConfig, create_app, AppState, Config, NwsClient};

pub const FORECAST_PATH: &str = "/gridpoints/TOP/32,81/forecast";

/// How the stub answers `/points/{lat},{lng}`
#[derive(Clone)]
pub enum GridReply {
    /// Point at the stub's own forecast route
    Forecast,
    /// Point at an arbitrary forecast URL
    ForecastUrl(String),
    /// Grid properties without a forecast URL
    NoForecastUrl,
    Raw(u16, String),
}

/// How the stub answers the forecast route
#[derive(Clone)]
pub enum ForecastReply {
    Periods(Value),
    Raw(u16, String),
    Slow(Duration, Value),
}

#[derive(Clone, Default)]
pub struct UpstreamCalls {
    grid: Arc<AtomicUsize>,
    forecast: Arc<AtomicUsize>,
    grid_paths: Arc<Mutex<Vec<String>>>,
    user_agents: Arc<Mutex<Vec<String>>>,
}

impl UpstreamCalls {
    pub fn grid(&self) -> usize {
        self.grid.load(Ordering::SeqCst)
    }

    pub fn forecast(&self) -> usize {
        self.forecast.load(Ordering::SeqCst)
    }

    pub fn grid_paths(&self) -> Vec<String> {
        self.grid_paths.lock().unwrap().clone()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }

    fn record_agent(&self, headers: &HeaderMap) {
        let agent = headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.user_agents.lock().unwrap().push(agent);
    }
}

#[derive(Clone)]
struct StubState {
    base_url: String,
    grid: GridReply,
    forecast: ForecastReply,
    calls: UpstreamCalls,
}

pub struct StubUpstream {
    pub base_url: String,
    pub calls: UpstreamCalls,
}

/// Two periods: `Tonight` at 50F and `Tomorrow` at 72F
pub fn two_periods() -> Value {
    json!([
        { "number": 1, "name": "Tonight", "temperature": 50, "temperatureUnit": "F", "shortForecast": "Clear" },
        { "number": 2, "name": "Tomorrow", "temperature": 72, "temperatureUnit": "F", "shortForecast": "Sunny" }
    ])
}

pub async fn spawn_upstream(grid: GridReply, forecast: ForecastReply) -> StubUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let calls = UpstreamCalls::default();

    let state = StubState {
        base_url: base_url.clone(),
        grid,
        forecast,
        calls: calls.clone(),
    };

    let app = Router::new()
        .route("/points/:coords", route_get(points))
        .route(FORECAST_PATH, route_get(forecast_document))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubUpstream { base_url, calls }
}

async fn points(
    State(state): State<StubState>,
    Path(coords): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.calls.grid.fetch_add(1, Ordering::SeqCst);
    state.calls.grid_paths.lock().unwrap().push(coords);
    state.calls.record_agent(&headers);

    match state.grid {
        GridReply::Forecast => Json(json!({
            "id": "stub",
            "properties": {
                "gridId": "TOP",
                "gridX": 32,
                "gridY": 81,
                "forecast": format!("{}{}", state.base_url, FORECAST_PATH)
            }
        }))
        .into_response(),
        GridReply::ForecastUrl(url) => Json(json!({
            "properties": { "gridId": "TOP", "gridX": 32, "gridY": 81, "forecast": url }
        }))
        .into_response(),
        GridReply::NoForecastUrl => Json(json!({
            "properties": { "gridId": "TOP", "gridX": 32, "gridY": 81 }
        }))
        .into_response(),
        GridReply::Raw(status, body) => raw(status, body),
    }
}

async fn forecast_document(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.calls.forecast.fetch_add(1, Ordering::SeqCst);
    state.calls.record_agent(&headers);

    match state.forecast {
        ForecastReply::Periods(periods) => forecast_body(periods),
        ForecastReply::Raw(status, body) => raw(status, body),
        ForecastReply::Slow(delay, periods) => {
            tokio::time::sleep(delay).await;
            forecast_body(periods)
        }
    }
}

fn forecast_body(periods: Value) -> Response {
    Json(json!({
        "type": "Feature",
        "properties": {
            "units": "us",
            "generatedAt": "2024-08-01T00:00:00+00:00",
            "periods": periods
        }
    }))
    .into_response()
}

fn raw(status: u16, body: String) -> Response {
    (StatusCode::from_u16(status).unwrap(), body).into_response()
}

/// A URL nothing is listening on
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn nws_config(base_url: &str) -> NwsConfig {
    NwsConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2_000,
        ..NwsConfig::default()
    }
}

/// Router backed by a real NWS client pointed at `base_url`
pub fn nws_app(base_url: &str) -> Router {
    let config = Config {
        nws: nws_config(base_url),
        ..Config::default()
    };
    let provider = NwsClient::new(&config.nws).unwrap();
    create_app(AppState::new(config, Arc::new(provider)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}
