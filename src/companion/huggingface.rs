use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::warn;

use super::{Companion, GeneratedQuote, http_client, mood_from_sentiment};
use crate::mood::Mood;

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";
const SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

/// Sentiment-only companion. It has no quote model, so quotes are the fallback.
#[derive(Debug, Clone)]
pub struct HuggingFaceCompanion {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl HuggingFaceCompanion {
    pub fn new(api_key: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn sentiment_label(&self, text: &str) -> Result<String> {
        let client = http_client(self.timeout)
            .ok_or_else(|| anyhow!("Failed to build HTTP client"))?;
        let url = format!("{}/{}", self.base_url, SENTIMENT_MODEL);

        let response: Value = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "inputs": text }))
            .send()
            .context("HuggingFace request failed")?
            .error_for_status()
            .context("HuggingFace returned an error status")?
            .json()
            .context("HuggingFace response was not JSON")?;

        Ok(first_label(&response).unwrap_or_default().to_string())
    }
}

/// The inference API answers either `[{label, score}, ...]` or a nested
/// `[[{label, score}, ...]]`.
fn first_label(response: &Value) -> Option<&str> {
    let first = response.get(0)?;
    let entry = if first.is_array() {
        first.get(0)?
    } else {
        first
    };
    entry.get("label")?.as_str()
}

impl Companion for HuggingFaceCompanion {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn analyze_mood(&self, text: &str) -> Mood {
        self.analyze_sentiment(text)
    }

    fn generate_quote(&self, _mood: Mood) -> GeneratedQuote {
        GeneratedQuote::fallback()
    }

    fn analyze_sentiment(&self, text: &str) -> Mood {
        match self.sentiment_label(text) {
            Ok(label) => mood_from_sentiment(&label),
            Err(e) => {
                warn!("HuggingFace sentiment analysis failed: {:#}", e);
                Mood::Calm
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_label_flat_and_nested() {
        let flat = json!([{ "label": "positive", "score": 0.9 }]);
        assert_eq!(first_label(&flat), Some("positive"));

        let nested = json!([[
            { "label": "negative", "score": 0.8 },
            { "label": "neutral", "score": 0.1 }
        ]]);
        assert_eq!(first_label(&nested), Some("negative"));

        assert_eq!(first_label(&json!({ "error": "loading" })), None);
    }

    #[test]
    fn test_network_failure_falls_back_to_calm() {
        let companion = HuggingFaceCompanion::new("hf-test", Duration::from_secs(2))
            .with_base_url("http://127.0.0.1:1");
        assert_eq!(companion.analyze_sentiment("awful"), Mood::Calm);
        assert_eq!(companion.generate_quote(Mood::Sad), GeneratedQuote::fallback());
    }
}
