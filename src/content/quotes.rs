use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteCategory {
    Motivational,
    Productivity,
    Wisdom,
    Funny,
}

impl fmt::Display for QuoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteCategory::Motivational => write!(f, "motivational"),
            QuoteCategory::Productivity => write!(f, "productivity"),
            QuoteCategory::Wisdom => write!(f, "wisdom"),
            QuoteCategory::Funny => write!(f, "funny"),
        }
    }
}

impl FromStr for QuoteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "motivational" => Ok(QuoteCategory::Motivational),
            "productivity" => Ok(QuoteCategory::Productivity),
            "wisdom" => Ok(QuoteCategory::Wisdom),
            "funny" => Ok(QuoteCategory::Funny),
            _ => Err(format!("Invalid quote category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteData {
    pub id: String,
    pub text: String,
    pub author: String,
    pub category: QuoteCategory,
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// How the next quote is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteSelection {
    Random,
    #[default]
    Daily,
    Category(QuoteCategory),
}

impl FromStr for QuoteSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(QuoteSelection::Random),
            "daily" => Ok(QuoteSelection::Daily),
            other => other.parse().map(QuoteSelection::Category),
        }
    }
}

impl QuoteSelection {
    /// Parse a selection, falling back to the daily quote.
    pub fn parse_or_default(s: &str) -> QuoteSelection {
        s.parse().unwrap_or_default()
    }
}

const POOL: [(&str, &str, &str, QuoteCategory, &str); 12] = [
    (
        "1",
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
        QuoteCategory::Motivational,
        "inspirational",
    ),
    (
        "2",
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Winston Churchill",
        QuoteCategory::Motivational,
        "powerful",
    ),
    (
        "3",
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
        QuoteCategory::Motivational,
        "uplifting",
    ),
    (
        "4",
        "Focus on being productive instead of busy.",
        "Tim Ferriss",
        QuoteCategory::Productivity,
        "practical",
    ),
    (
        "5",
        "The way to get started is to quit talking and begin doing.",
        "Walt Disney",
        QuoteCategory::Productivity,
        "actionable",
    ),
    (
        "6",
        "Productivity is never an accident. It is always the result of a commitment to excellence.",
        "Paul J. Meyer",
        QuoteCategory::Productivity,
        "insightful",
    ),
    (
        "7",
        "The only true wisdom is in knowing you know nothing.",
        "Socrates",
        QuoteCategory::Wisdom,
        "philosophical",
    ),
    (
        "8",
        "In the middle of difficulty lies opportunity.",
        "Albert Einstein",
        QuoteCategory::Wisdom,
        "profound",
    ),
    (
        "9",
        "The best time to plant a tree was 20 years ago. The second best time is now.",
        "Chinese Proverb",
        QuoteCategory::Wisdom,
        "timeless",
    ),
    (
        "10",
        "I'm not lazy, I'm on energy saving mode.",
        "Anonymous",
        QuoteCategory::Funny,
        "witty",
    ),
    (
        "11",
        "I told my wife she was drawing her eyebrows too high. She looked surprised.",
        "Anonymous",
        QuoteCategory::Funny,
        "punny",
    ),
    (
        "12",
        "The early bird might get the worm, but the second mouse gets the cheese.",
        "Anonymous",
        QuoteCategory::Funny,
        "clever",
    ),
];

fn quote_at(index: usize) -> QuoteData {
    let (id, text, author, category, style) = POOL[index];
    QuoteData {
        id: id.to_string(),
        text: text.to_string(),
        author: author.to_string(),
        category,
        style: style.to_string(),
        is_favorite: None,
    }
}

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> QuoteData {
    quote_at(rng.gen_range(0..POOL.len()))
}

pub fn quote_by_category<R: Rng + ?Sized>(category: QuoteCategory, rng: &mut R) -> QuoteData {
    let matching: Vec<usize> = (0..POOL.len())
        .filter(|&i| POOL[i].3 == category)
        .collect();

    match matching.choose(rng) {
        Some(&index) => quote_at(index),
        None => random_quote(rng),
    }
}

/// Seed for the daily quote: the sum of the character codes of the date
/// written as `Sat Oct 17 2026`.
pub fn daily_seed(date: NaiveDate) -> u64 {
    date.format("%a %b %d %Y")
        .to_string()
        .chars()
        .map(|c| c as u64)
        .sum()
}

/// Same date, same quote.
pub fn daily_quote(date: NaiveDate) -> QuoteData {
    let index = (daily_seed(date) % POOL.len() as u64) as usize;
    quote_at(index)
}

pub fn select_quote<R: Rng + ?Sized>(
    selection: QuoteSelection,
    today: NaiveDate,
    rng: &mut R,
) -> QuoteData {
    match selection {
        QuoteSelection::Random => random_quote(rng),
        QuoteSelection::Daily => daily_quote(today),
        QuoteSelection::Category(category) => quote_by_category(category, rng),
    }
}
