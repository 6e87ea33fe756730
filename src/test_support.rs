//! Local HTTP server standing in for the Raysurfer API in tests.

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[derive(Clone)]
struct MockState {
    routes: Arc<HashMap<String, (StatusCode, String)>>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Default)]
pub struct MockServerBuilder {
    routes: HashMap<String, (StatusCode, String)>,
    delay: Option<Duration>,
}

impl MockServerBuilder {
    /// Answer `path` with 200 and a JSON body.
    pub fn json(self, path: &str, body: Value) -> Self {
        self.respond(path, StatusCode::OK, body.to_string())
    }

    pub fn respond(mut self, path: &str, status: StatusCode, body: impl Into<String>) -> Self {
        self.routes.insert(path.to_string(), (status, body.into()));
        self
    }

    /// Hold every response for `delay` before answering.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn start(self) -> MockServer {
        let state = MockState {
            routes: Arc::new(self.routes),
            delay: self.delay,
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        MockServer {
            base_url: format!("http://127.0.0.1:{}", port),
            requests: state.requests,
            handle,
        }
    }
}

pub struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect(),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    };
    state.requests.lock().unwrap().push(recorded);

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    let content_type = [(header::CONTENT_TYPE, "application/json")];
    match state.routes.get(uri.path()) {
        Some((status, body)) => (*status, content_type, body.clone()),
        None => (
            StatusCode::NOT_FOUND,
            content_type,
            format!("no route for {}", uri.path()),
        ),
    }
}
