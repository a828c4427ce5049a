//! HTTP client for the agent endpoint.
//!
//! Every call is a `POST` of `{app_name, user_id, prompt}` with a static
//! bearer token. The endpoint answers with an envelope whose `text` field
//! carries the generated reply. There is no retry.

use crate::{Agent, AgentError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use skuboard_core::config::AgentConfig;
use std::time::Duration;

/// Request body sent to the agent endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentRequest {
    pub app_name: String,
    pub user_id: String,
    pub prompt: String,
}

/// Parsed response envelope.
///
/// `text` is left untouched: it is whatever the agent produced and goes
/// through the normalizer before anyone trusts its shape. A missing field
/// is [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub text: Value,
}

impl AgentReply {
    pub fn from_envelope(envelope: &Value) -> Self {
        Self {
            text: envelope.get("text").cloned().unwrap_or(Value::Null),
        }
    }
}

pub struct AgentClient {
    client: reqwest::Client,
    url: String,
    token: String,
    user_id: String,
}

impl AgentClient {
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            token: config.token.clone(),
            user_id: config.user_id.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Agent for AgentClient {
    async fn ask(&self, app_name: &str, prompt: &str) -> Result<AgentReply, AgentError> {
        let body = AgentRequest {
            app_name: app_name.to_string(),
            user_id: self.user_id.clone(),
            prompt: prompt.to_string(),
        };

        tracing::debug!(url = %self.url, app_name, "agent request");
        let mut request = self.client.post(&self.url).json(&body);
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), app_name, "agent request rejected");
            return Err(AgentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let envelope: Value = serde_json::from_slice(&bytes).map_err(AgentError::Envelope)?;
        tracing::debug!(app_name, bytes = bytes.len(), "agent reply received");
        Ok(AgentReply::from_envelope(&envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_shape() {
        let body = AgentRequest {
            app_name: "sku_rationalization_agent_1".to_string(),
            user_id: "5139041".to_string(),
            prompt: "hello".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "app_name": "sku_rationalization_agent_1",
                "user_id": "5139041",
                "prompt": "hello"
            })
        );
    }

    #[test]
    fn reply_text_is_taken_verbatim() {
        let reply = AgentReply::from_envelope(&json!({"text": "[{\"sku\":\"1\"}]", "other": 1}));
        assert_eq!(reply.text, json!("[{\"sku\":\"1\"}]"));
    }

    #[test]
    fn missing_text_is_null() {
        assert_eq!(AgentReply::from_envelope(&json!({})).text, Value::Null);
        assert_eq!(AgentReply::from_envelope(&json!([1, 2])).text, Value::Null);
    }
}
