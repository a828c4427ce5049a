//! skuboard-agent — talks to the remote agent endpoint.
//!
//! [`Agent`] is the seam: a single `ask(app, prompt)` call returning the
//! reply envelope. [`client::AgentClient`] implements it over HTTPS;
//! [`SkuAgent`] builds the two calls the dashboard needs on top of any
//! [`Agent`].

pub mod client;
pub mod prompts;

use skuboard_core::config::AgentConfig;
use skuboard_core::dashboard::TimeWindow;
use skuboard_core::{decorate, normalize, Row};
use std::future::Future;

pub use client::{AgentClient, AgentReply, AgentRequest};

/// Fallback acknowledgement when the notification app replies without text.
pub const SUBMIT_ACK: &str = "Comment submitted successfully!";

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("agent request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("agent request failed with status {status}")]
    Status { status: u16, body: String },

    #[error("agent reply is not a JSON envelope: {0}")]
    Envelope(serde_json::Error),

    #[error("Please enter a comment before submitting")]
    EmptyComment,
}

/// One prompt in, one reply envelope out.
pub trait Agent: Send + Sync {
    fn ask(
        &self,
        app_name: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<AgentReply, AgentError>> + Send;
}

/// The ranking and notification calls, bound to their agent apps.
pub struct SkuAgent<A> {
    agent: A,
    sku_app: String,
    notify_app: String,
}

impl SkuAgent<AgentClient> {
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        Ok(Self::new(AgentClient::new(config)?, config))
    }
}

impl<A: Agent> SkuAgent<A> {
    pub fn new(agent: A, config: &AgentConfig) -> Self {
        Self {
            agent,
            sku_app: config.sku_app.clone(),
            notify_app: config.notify_app.clone(),
        }
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Fetch the worst performers over `window`, normalized and decorated.
    /// An unreadable reply yields an empty list, not an error.
    pub async fn fetch_ranked_skus(&self, window: TimeWindow) -> Result<Vec<Row>, AgentError> {
        let prompt = prompts::ranked_skus(window);
        let reply = self.agent.ask(&self.sku_app, &prompt).await?;
        let rows = decorate(normalize(&reply.text));
        tracing::info!(months = window.months(), rows = rows.len(), "ranked SKUs fetched");
        Ok(rows)
    }

    /// Send `comment` about `rows` to the notification app and return the
    /// acknowledgement to show the user.
    pub async fn submit_comment(&self, rows: &[&Row], comment: &str) -> Result<String, AgentError> {
        if comment.trim().is_empty() {
            return Err(AgentError::EmptyComment);
        }
        let prompt = prompts::notification(rows, comment);
        let reply = self.agent.ask(&self.notify_app, &prompt).await?;
        tracing::info!(rows = rows.len(), "comment submitted");
        Ok(acknowledgement(&reply))
    }
}

/// Reply text as shown to the user: strings verbatim, other values as JSON,
/// [`SUBMIT_ACK`] when there is nothing to show.
fn acknowledgement(reply: &AgentReply) -> String {
    let text = match &reply.text {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    if text.is_empty() {
        SUBMIT_ACK.to_string()
    } else {
        text
    }
}
