use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mood::Mood;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: DateTime<Local>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewJournalEntry {
    pub content: String,
    #[serde(default)]
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl JournalEntry {
    pub fn from_new(new: NewJournalEntry, date: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            content: new.content,
            ai_summary: new.ai_summary,
            mood: new.mood,
            tags: new.tags,
        }
    }
}
