// ============================================================
// Layer 5 — OpenAI-Compatible Completion Client
// ============================================================
// Sends a rendered prompt as a single user message to
// `POST {api_base}/chat/completions` and returns the first
// choice's content. Works against OpenAI itself and against
// local servers that speak the same API (vLLM, Ollama, ...).
//
// No streaming, retries or response cache. A failed request
// is an error for the caller.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::traits::CompletionClient;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Everything needed to reach one model endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub model: String,

    /// Base URL without trailing slash, e.g. "http://localhost:11434/v1"
    pub api_base: String,

    /// Never written to run_config.json
    #[serde(skip)]
    pub api_key: Option<String>,

    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            max_tokens: 1000,
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking client for one model on one endpoint.
pub struct OpenAiCompatClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl OpenAiCompatClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        tracing::info!("Using model '{}' at {}", config.model, config.api_base);
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }
}

impl CompletionClient for OpenAiCompatClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let mut builder = self.http.post(self.endpoint()).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder
            .send()
            .with_context(|| format!("Failed to connect to {}", self.config.api_base))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            anyhow::bail!("Completion request failed ({}): {}", status, text);
        }

        let body: ChatResponse = resp.json().context("Failed to parse completion response")?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        tracing::debug!("Received {} chars from '{}'", content.len(), self.config.model);
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// ─── Test Double ──────────────────────────────────────────────────────────────
// Replays canned completions in order and records every prompt.
#[cfg(test)]
pub struct ScriptedClient {
    replies: std::cell::RefCell<std::collections::VecDeque<Result<String, String>>>,
    prompts: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl ScriptedClient {
    pub fn new<'a>(replies: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            replies: std::cell::RefCell::new(replies.into_iter().map(|r| Ok(r.to_string())).collect()),
            prompts: std::cell::RefCell::new(Vec::new()),
        }
    }

    /// Queue a failed request after the replies given so far
    pub fn then_fail(self, message: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(message.to_string()));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

#[cfg(test)]
impl CompletionClient for ScriptedClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => anyhow::bail!(message),
            None => anyhow::bail!("scripted client ran out of replies"),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenAiCompatClient::new(ClientConfig {
            api_base: "http://localhost:11434/v1/".into(),
            ..ClientConfig::default()
        })
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_api_key_is_not_serialised() {
        let cfg = ClientConfig {
            api_key: Some("sk-secret".into()),
            ..ClientConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("sk-secret"));
    }

    #[test]
    fn test_request_shape() {
        let req = ChatRequest {
            model: "m",
            messages: vec![ChatMessage { role: "user", content: "hi" }],
            max_tokens: 10,
            temperature: 0.0,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["messages"][0]["role"], "user");
        assert_eq!(v["max_tokens"], 10);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Answer: No"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("Answer: No"));
    }

    #[test]
    fn test_scripted_client_replays_then_fails() {
        let client = ScriptedClient::new(["one"]).then_fail("boom");
        assert_eq!(client.complete("a").unwrap(), "one");
        assert!(client.complete("b").is_err());
        assert!(client.complete("c").is_err());
        assert_eq!(client.prompts(), ["a", "b", "c"]);
    }
}
