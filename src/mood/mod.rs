pub mod classifier;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use classifier::classify_mood;

/// Mood labels a user can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    #[default]
    Calm,
    Stressed,
    Motivated,
    Tired,
    Anxious,
    Hopeful,
    Focused,
}

impl Mood {
    pub const ALL: [Mood; 10] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Excited,
        Mood::Calm,
        Mood::Stressed,
        Mood::Motivated,
        Mood::Tired,
        Mood::Anxious,
        Mood::Hopeful,
        Mood::Focused,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Calm => "calm",
            Mood::Stressed => "stressed",
            Mood::Motivated => "motivated",
            Mood::Tired => "tired",
            Mood::Anxious => "anxious",
            Mood::Hopeful => "hopeful",
            Mood::Focused => "focused",
        }
    }

    /// Parse a label, falling back to `Calm` for anything unrecognized.
    pub fn parse_or_default(s: &str) -> Mood {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| format!("Invalid mood: {}", s))
    }
}

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;

/// A single mood report. Replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodData {
    pub mood: Mood,
    pub note: String,
    pub timestamp: DateTime<Local>,
    pub intensity: u8,
}

impl MoodData {
    pub fn new(
        mood: Mood,
        note: impl Into<String>,
        intensity: u8,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            mood,
            note: note.into(),
            timestamp,
            intensity: intensity.clamp(MIN_INTENSITY, MAX_INTENSITY),
        }
    }
}
