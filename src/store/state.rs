use rand::Rng;
use serde::Serialize;

use super::preferences::Preferences;
use crate::clock::Clock;
use crate::content::greeting::{self, DEFAULT_NAME};
use crate::content::quotes;
use crate::content::weather::{self, DEFAULT_LOCATION};
use crate::content::{QuoteData, WeatherData};
use crate::journal::JournalEntry;
use crate::mood::MoodData;
use crate::stats::UserStats;
use crate::theme::ThemeConfig;
use crate::todo::TodoItem;
use crate::todo::item::sample_todos;

/// Everything the dashboard shows. Snapshots are immutable once published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    pub greeting: String,
    pub weather: WeatherData,
    pub todos: Vec<TodoItem>,
    pub quote: QuoteData,
    pub mood: Option<MoodData>,
    pub theme: ThemeConfig,
    pub is_night_mode: bool,
    pub user_stats: UserStats,
    pub journal_entries: Vec<JournalEntry>,
    pub favorite_quotes: Vec<QuoteData>,
    pub preferences: Preferences,
}

/// Personalization used when generating content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    pub name: String,
    pub location: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl DashboardState {
    /// A fresh dashboard: generated content, starter todos, no mood, calm theme.
    pub fn initial<R: Rng + ?Sized>(
        clock: &dyn Clock,
        options: &DashboardOptions,
        rng: &mut R,
    ) -> Self {
        Self {
            greeting: greeting::time_based_greeting(clock, &options.name),
            weather: weather::mock_weather(rng, &options.location),
            todos: sample_todos(clock.now()),
            quote: quotes::random_quote(rng),
            mood: None,
            theme: ThemeConfig::default_theme(),
            is_night_mode: false,
            user_stats: UserStats::default(),
            journal_entries: Vec::new(),
            favorite_quotes: Vec::new(),
            preferences: Preferences::default(),
        }
    }

    pub fn completed_count(&self) -> u64 {
        self.todos.iter().filter(|t| t.is_completed()).count() as u64
    }

    pub fn find_todo(&self, id: &str) -> Option<&TodoItem> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Resolve an exact id, or else a 1-based position in the list.
    pub fn resolve_todo_id(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if let Some(todo) = self.find_todo(reference) {
            return Some(todo.id.clone());
        }

        let position: usize = reference.parse().ok()?;
        self.todos
            .get(position.checked_sub(1)?)
            .map(|todo| todo.id.clone())
    }

    pub fn is_favorite(&self, quote_id: &str) -> bool {
        self.favorite_quotes.iter().any(|q| q.id == quote_id)
    }
}
