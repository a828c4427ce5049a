//! Fake agent endpoint for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `POST /ask`, answering each request with the next queued
//! reply and recording what was sent so tests can assert on headers and body.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeAgentApi::start().await.unwrap();
//! api.reply_text("[{\"sku\":\"00123\"}]").await;
//!
//! // Point the agent client at api.url()
//! let config = agent_config(&api.url());
//! ```

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A request as the fake endpoint received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// A canned response: status code plus raw body.
#[derive(Debug, Clone)]
struct CannedReply {
    status: StatusCode,
    body: String,
}

#[derive(Default)]
struct ApiState {
    replies: VecDeque<CannedReply>,
    requests: Vec<RecordedRequest>,
}

/// Handle to the running fake agent server.
pub struct FakeAgentApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeAgentApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/ask", post(ask))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full endpoint URL (e.g. `http://127.0.0.1:PORT/ask`).
    pub fn url(&self) -> String {
        format!("http://{}/ask", self.addr)
    }

    /// Queue a `200 OK` reply whose envelope `text` is `text`.
    pub async fn reply_text(&self, text: impl Into<Value>) {
        let body = serde_json::json!({ "text": text.into() }).to_string();
        self.reply_raw(StatusCode::OK, body).await;
    }

    /// Queue an arbitrary status and body.
    pub async fn reply_raw(&self, status: StatusCode, body: impl Into<String>) {
        self.state.lock().await.replies.push_back(CannedReply {
            status,
            body: body.into(),
        });
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn ask(
    State(state): State<Arc<Mutex<ApiState>>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    match state.replies.pop_front() {
        Some(reply) => (reply.status, reply.body),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "no canned reply queued".to_string(),
        ),
    }
}
