use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

use super::{Companion, GeneratedQuote, http_client, mood_from_reply, parse_quote_reply};
use crate::mood::Mood;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const MOOD_PROMPT: &str = "You are a mood analyzer. Analyze the given text and return only one word from: happy, sad, excited, calm, stressed, motivated, tired";

/// Chat-completions backed companion.
///
/// A fresh blocking client is built per request, so calls must run off the
/// async runtime (the API uses `spawn_blocking`).
#[derive(Debug, Clone)]
pub struct OpenAiCompanion {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiCompanion {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn chat(&self, body: Value) -> Result<String> {
        let client = http_client(self.timeout)
            .ok_or_else(|| anyhow!("Failed to build HTTP client"))?;
        let url = format!("{}/chat/completions", self.base_url);

        let response: Value = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .context("OpenAI request failed")?
            .error_for_status()
            .context("OpenAI returned an error status")?
            .json()
            .context("OpenAI response was not JSON")?;

        let content = response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        debug!(len = content.len(), "OpenAI reply received");
        Ok(content)
    }
}

impl Companion for OpenAiCompanion {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn analyze_mood(&self, text: &str) -> Mood {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": MOOD_PROMPT },
                { "role": "user", "content": text },
            ],
            "max_tokens": 10,
            "temperature": 0.3,
        });

        match self.chat(body) {
            Ok(reply) => mood_from_reply(&reply),
            Err(e) => {
                warn!("OpenAI mood analysis failed: {:#}", e);
                Mood::Calm
            }
        }
    }

    fn generate_quote(&self, mood: Mood) -> GeneratedQuote {
        let prompt = format!(
            "Generate an inspirational quote that matches the mood: {}. Return in format: \"Quote text\" - Author Name",
            mood
        );
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "system", "content": prompt }],
            "max_tokens": 100,
            "temperature": 0.7,
        });

        match self.chat(body) {
            Ok(reply) => parse_quote_reply(&reply),
            Err(e) => {
                warn!("OpenAI quote generation failed: {:#}", e);
                GeneratedQuote::fallback()
            }
        }
    }

    fn analyze_sentiment(&self, text: &str) -> Mood {
        self.analyze_mood(text)
    }
}
