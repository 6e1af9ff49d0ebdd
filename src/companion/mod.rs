//! Optional AI helpers for mood analysis and quote generation.
//!
//! Every [`Companion`] method is total: network, status and parse failures
//! are logged and turned into the calm mood or the fallback quote.

mod huggingface;
mod openai;

pub use huggingface::HuggingFaceCompanion;
pub use openai::OpenAiCompanion;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::AiConfig;
use crate::content::{QuoteCategory, QuoteData};
use crate::mood::Mood;

pub const FALLBACK_QUOTE_TEXT: &str = "Stay positive and keep moving forward.";
pub const FALLBACK_QUOTE_AUTHOR: &str = "AI Companion";
const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuote {
    pub text: String,
    pub author: String,
}

impl GeneratedQuote {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_QUOTE_TEXT.to_string(),
            author: FALLBACK_QUOTE_AUTHOR.to_string(),
        }
    }

    /// Wrap as a dashboard quote with a fresh `ai-` id.
    pub fn into_quote(self) -> QuoteData {
        QuoteData {
            id: format!("ai-{}", Uuid::new_v4()),
            text: self.text,
            author: self.author,
            category: QuoteCategory::Motivational,
            style: "ai".to_string(),
            is_favorite: None,
        }
    }
}

pub trait Companion: Send + Sync {
    /// Short identifier used in logs and `companion config`.
    fn name(&self) -> &'static str;

    fn analyze_mood(&self, text: &str) -> Mood;

    fn generate_quote(&self, mood: Mood) -> GeneratedQuote;

    fn analyze_sentiment(&self, text: &str) -> Mood;
}

/// Used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCompanion;

impl Companion for NullCompanion {
    fn name(&self) -> &'static str {
        "none"
    }

    fn analyze_mood(&self, _text: &str) -> Mood {
        Mood::Calm
    }

    fn generate_quote(&self, _mood: Mood) -> GeneratedQuote {
        GeneratedQuote::fallback()
    }

    fn analyze_sentiment(&self, _text: &str) -> Mood {
        Mood::Calm
    }
}

/// Pick a companion from the configured keys: OpenAI first, then HuggingFace.
pub fn from_config(config: &AiConfig) -> Arc<dyn Companion> {
    let timeout = Duration::from_secs(config.timeout_secs);

    let companion: Arc<dyn Companion> = if let Some(key) = non_empty(&config.openai_api_key) {
        Arc::new(OpenAiCompanion::new(key, &config.model, timeout))
    } else if let Some(key) = non_empty(&config.huggingface_api_key) {
        Arc::new(HuggingFaceCompanion::new(key, timeout))
    } else {
        Arc::new(NullCompanion)
    };

    info!(companion = companion.name(), "AI companion selected");
    companion
}

fn non_empty(key: &Option<String>) -> Option<&str> {
    key.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

fn http_client(timeout: Duration) -> Option<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("daily-companion/", env!("CARGO_PKG_VERSION")))
        .build()
        .ok()
}

/// Map a one-word model reply to a mood. Anything unrecognized is calm.
fn mood_from_reply(reply: &str) -> Mood {
    let word = reply
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    Mood::parse_or_default(&word)
}

/// Split a `"Quote text" - Author` reply.
fn parse_quote_reply(reply: &str) -> GeneratedQuote {
    let mut parts = reply.split(" - ");

    let text = parts
        .next()
        .map(|t| t.replace('"', "").trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| FALLBACK_QUOTE_TEXT.to_string());
    let author = parts
        .next()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    GeneratedQuote { text, author }
}

/// Map a sentiment label to a mood.
fn mood_from_sentiment(label: &str) -> Mood {
    match label.trim().to_lowercase().as_str() {
        "positive" => Mood::Happy,
        "negative" => Mood::Sad,
        _ => Mood::Calm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_null_companion_is_calm() {
        let companion = NullCompanion;
        assert_eq!(companion.analyze_mood("I am thrilled"), Mood::Calm);
        assert_eq!(companion.analyze_sentiment("terrible day"), Mood::Calm);
        assert_eq!(
            companion.generate_quote(Mood::Happy),
            GeneratedQuote {
                text: "Stay positive and keep moving forward.".to_string(),
                author: "AI Companion".to_string(),
            }
        );
    }

    #[test]
    fn test_from_config_prefers_openai() {
        let config = AiConfig {
            openai_api_key: Some("sk-test".to_string()),
            huggingface_api_key: Some("hf-test".to_string()),
            ..AiConfig::default()
        };
        assert_eq!(from_config(&config).name(), "openai");

        let config = AiConfig {
            openai_api_key: Some("  ".to_string()),
            huggingface_api_key: Some("hf-test".to_string()),
            ..AiConfig::default()
        };
        assert_eq!(from_config(&config).name(), "huggingface");

        assert_eq!(from_config(&AiConfig::default()).name(), "none");
    }

    #[test]
    fn test_mood_from_reply() {
        assert_eq!(mood_from_reply("Happy"), Mood::Happy);
        assert_eq!(mood_from_reply("  stressed.\n"), Mood::Stressed);
        assert_eq!(mood_from_reply("bored"), Mood::Calm);
        assert_eq!(mood_from_reply(""), Mood::Calm);
    }

    #[test]
    fn test_parse_quote_reply() {
        assert_eq!(
            parse_quote_reply("\"Keep going.\" - Jane Doe"),
            GeneratedQuote {
                text: "Keep going.".to_string(),
                author: "Jane Doe".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_quote_reply_without_author() {
        let quote = parse_quote_reply("\"Small steps count.\"");
        assert_eq!(quote.text, "Small steps count.");
        assert_eq!(quote.author, "Unknown");
    }

    #[test]
    fn test_parse_empty_quote_reply() {
        let quote = parse_quote_reply("");
        assert_eq!(quote.text, FALLBACK_QUOTE_TEXT);
        assert_eq!(quote.author, "Unknown");
    }

    #[test]
    fn test_mood_from_sentiment() {
        assert_eq!(mood_from_sentiment("POSITIVE"), Mood::Happy);
        assert_eq!(mood_from_sentiment("negative"), Mood::Sad);
        assert_eq!(mood_from_sentiment("neutral"), Mood::Calm);
        assert_eq!(mood_from_sentiment("LABEL_3"), Mood::Calm);
    }
}
