//! Best-effort plain-language rewriting of article text.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{PulseClient, PulseError, net};

/// Fixed system instruction sent with every rewrite request.
pub const SYSTEM_INSTRUCTION: &str =
    "You rewrite financial news headlines in simple, clear language for 10th graders.";

/// An opaque async text-transform service.
///
/// Returns `None` on any failure; callers treat the result as optional decoration and
/// never block the feed on it.
pub trait TextSimplifier: Send + Sync {
    fn simplify<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>>;
}

/// [`TextSimplifier`] backed by an OpenAI-compatible `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatSimplifier {
    client: PulseClient,
    model: String,
    temperature: f32,
}

impl ChatSimplifier {
    pub fn new(client: &PulseClient) -> Self {
        Self {
            client: client.clone(),
            model: "gpt-4o".to_string(),
            temperature: 0.3,
        }
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub const fn temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    async fn request(&self, text: &str) -> Result<Option<String>, PulseError> {
        let key = self.client.simplify_api_key()?;
        let url = self.client.base_simplify().join("chat/completions")?;

        let user = format!(
            "Simplify this financial news so a 10th grader can understand:\n\"\"\n{text}\n\"\""
        );
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: self.temperature,
        };

        let shown = net::redact(&self.client, &url);
        debug!(url = %shown, model = %self.model, "POST chat completion");
        let req = self.client.http().post(url).bearer_auth(key).json(&body);
        let text = net::send_text(req, shown).await?;

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }
}

impl TextSimplifier for ChatSimplifier {
    fn simplify<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>> {
        Box::pin(async move {
            match self.request(text).await {
                Ok(out) => out,
                Err(e) => {
                    warn!(error = %e, "text simplification failed");
                    None
                }
            }
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}
