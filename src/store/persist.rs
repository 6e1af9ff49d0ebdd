use serde::{Deserialize, Serialize};

use super::preferences::Preferences;
use super::state::DashboardState;
use crate::content::QuoteData;
use crate::journal::JournalEntry;
use crate::mood::MoodData;
use crate::stats::UserStats;
use crate::theme::ThemeConfig;
use crate::todo::TodoItem;

/// Key the dashboard snapshot is stored under.
pub const STORAGE_KEY: &str = "dashboard-storage";

/// The persisted subset of [`DashboardState`].
///
/// Absent keys leave the default in place when merged. Weather, quote,
/// greeting and theme are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<TodoItem>>,
    pub mood: Option<MoodData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_entries: Option<Vec<JournalEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_quotes: Option<Vec<QuoteData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_stats: Option<UserStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_night_mode: Option<bool>,
}

impl From<&DashboardState> for PersistedState {
    fn from(state: &DashboardState) -> Self {
        Self {
            todos: Some(state.todos.clone()),
            mood: state.mood.clone(),
            journal_entries: Some(state.journal_entries.clone()),
            favorite_quotes: Some(state.favorite_quotes.clone()),
            user_stats: Some(state.user_stats.clone()),
            preferences: Some(state.preferences.clone()),
            is_night_mode: Some(state.is_night_mode),
        }
    }
}

impl PersistedState {
    /// Merge over `state` and re-derive the theme from the restored mood.
    pub fn merge_into(self, state: &mut DashboardState) {
        if let Some(todos) = self.todos {
            state.todos = todos;
        }
        state.mood = self.mood;
        if let Some(journal_entries) = self.journal_entries {
            state.journal_entries = journal_entries;
        }
        if let Some(favorite_quotes) = self.favorite_quotes {
            state.favorite_quotes = favorite_quotes;
        }
        if let Some(user_stats) = self.user_stats {
            state.user_stats = user_stats;
        }
        if let Some(preferences) = self.preferences {
            state.preferences = preferences;
        }
        if let Some(is_night_mode) = self.is_night_mode {
            state.is_night_mode = is_night_mode;
        }

        state.theme = state
            .mood
            .as_ref()
            .map(|m| ThemeConfig::for_mood(m.mood))
            .unwrap_or_default()
            .with_dark(state.is_night_mode);
    }
}
