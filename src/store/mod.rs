//! The dashboard store: single owner of shared dashboard state.
//!
//! Every action builds a new [`DashboardState`] and swaps it in behind a fresh
//! `Arc`, so observers can compare snapshots with `Arc::ptr_eq`. Subscribers
//! run synchronously, in registration order, before the action returns.
//! Actions never fail. Unknown ids are silent no-ops.

pub mod persist;
pub mod preferences;
pub mod state;

use rand::Rng;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::content::quotes::{self, QuoteSelection};
use crate::content::{QuoteData, WeatherPatch, daily_focus, greeting, weather};
use crate::journal::{JournalEntry, NewJournalEntry};
use crate::mood::{Mood, MoodData, classify_mood};
use crate::stats::{Badge, TIMER_TASK_BONUS_POINTS, TODO_COMPLETION_POINTS};
use crate::storage::SnapshotStore;
use crate::theme::ThemeConfig;
use crate::timer::FocusEvent;
use crate::todo::{NewTodo, TodoItem};

pub use persist::{PersistedState, STORAGE_KEY};
pub use preferences::{Layout, Preferences, PreferencesPatch};
pub use state::{DashboardOptions, DashboardState};

type Subscriber = Box<dyn Fn(&Arc<DashboardState>) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Whether an action touched fields that belong in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Persist {
    Yes,
    No,
}

pub struct DashboardStore {
    state: Arc<DashboardState>,
    clock: Arc<dyn Clock>,
    snapshots: Box<dyn SnapshotStore>,
    options: DashboardOptions,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl DashboardStore {
    /// Build a store around an explicit initial state. Nothing is loaded.
    pub fn new(
        initial: DashboardState,
        clock: Arc<dyn Clock>,
        snapshots: Box<dyn SnapshotStore>,
    ) -> Self {
        Self {
            state: Arc::new(initial),
            clock,
            snapshots,
            options: DashboardOptions::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Build the default dashboard and merge the persisted snapshot over it.
    ///
    /// A missing or unreadable snapshot yields the defaults.
    pub fn open(
        snapshots: Box<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
        options: DashboardOptions,
    ) -> Self {
        let mut state = DashboardState::initial(clock.as_ref(), &options, &mut rand::thread_rng());

        if let Some(persisted) = load_persisted(snapshots.as_ref()) {
            persisted.merge_into(&mut state);
        }

        let mut store = Self::new(state, clock, snapshots);
        store.options = options;
        store
    }

    /// Merge the latest snapshot over the current state, picking up whatever
    /// other processes persisted since this store was opened.
    ///
    /// Long-lived holders call this before acting so they do not write back a
    /// stale snapshot. Nothing is written and a missing snapshot is a no-op.
    pub fn reload(&mut self) {
        if let Some(persisted) = load_persisted(self.snapshots.as_ref()) {
            debug!("dashboard snapshot reloaded");
            self.update(Persist::No, |state| persisted.merge_into(state));
        }
    }

    pub fn state(&self) -> Arc<DashboardState> {
        Arc::clone(&self.state)
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn daily_focus(&self) -> String {
        daily_focus(&self.state.todos)
    }

    pub fn focus_time(&self) -> u64 {
        self.state.user_stats.focus_time
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&Arc<DashboardState>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn update(&mut self, persist: Persist, apply: impl FnOnce(&mut DashboardState)) {
        let mut next = DashboardState::clone(&self.state);
        apply(&mut next);
        self.state = Arc::new(next);

        for (_, subscriber) in &self.subscribers {
            subscriber(&self.state);
        }

        if persist == Persist::Yes {
            self.persist();
        }
    }

    fn persist(&self) {
        let snapshot = PersistedState::from(self.state.as_ref());
        let blob = match serde_json::to_string(&snapshot) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("Failed to serialize dashboard snapshot: {}", e);
                return;
            }
        };

        if let Err(e) = self.snapshots.save(STORAGE_KEY, &blob) {
            warn!("Failed to save dashboard snapshot: {:#}", e);
        }
    }

    // ------------------------------------------------------------------
    // Greeting, weather, quotes
    // ------------------------------------------------------------------

    pub fn update_greeting(&mut self) {
        let greeting = greeting::time_based_greeting(self.clock.as_ref(), &self.options.name);
        self.update(Persist::No, |state| state.greeting = greeting);
    }

    pub fn update_weather(&mut self, patch: WeatherPatch) {
        self.update(Persist::No, |state| state.weather.merge(patch));
    }

    pub fn refresh_weather<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let fresh = weather::mock_weather(rng, &self.options.location);
        debug!(condition = %fresh.condition, "weather refreshed");
        self.update(Persist::No, |state| state.weather = fresh);
    }

    pub fn update_quote(&mut self, quote: QuoteData) {
        self.update(Persist::No, |state| state.quote = quote);
    }

    pub fn refresh_quote<R: Rng + ?Sized>(&mut self, selection: QuoteSelection, rng: &mut R) {
        let quote = quotes::select_quote(selection, self.clock.today(), rng);
        self.update_quote(quote);
    }

    /// Add the quote to favorites, or remove it if its id is already there.
    pub fn toggle_quote_favorite(&mut self, quote: QuoteData) {
        self.update(Persist::Yes, |state| {
            if state.is_favorite(&quote.id) {
                state.favorite_quotes.retain(|fq| fq.id != quote.id);
            } else {
                state.favorite_quotes.push(QuoteData {
                    is_favorite: Some(true),
                    ..quote
                });
            }
        });
    }

    // ------------------------------------------------------------------
    // Todos
    // ------------------------------------------------------------------

    pub fn update_todos(&mut self, todos: Vec<TodoItem>) {
        self.update(Persist::Yes, |state| {
            state.todos = todos;
            state.user_stats.completed_tasks = state.completed_count();
        });
    }

    /// Returns the id assigned to the new todo.
    pub fn add_todo(&mut self, new: NewTodo) -> String {
        let item = TodoItem::from_new(new, self.clock.now());
        let id = item.id.clone();
        debug!(id = %id, "adding todo");

        self.update(Persist::Yes, |state| {
            state.todos.push(item);
            state.user_stats.total_tasks += 1;
        });
        id
    }

    pub fn toggle_todo(&mut self, id: &str) {
        self.update(Persist::Yes, |state| {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == id)
                && todo.toggle_completed()
            {
                state.user_stats.add_points(TODO_COMPLETION_POINTS);
            }
            state.user_stats.completed_tasks = state.completed_count();
        });
    }

    pub fn toggle_in_progress(&mut self, id: &str) {
        self.update(Persist::Yes, |state| {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == id) {
                todo.toggle_in_progress();
            }
            state.user_stats.completed_tasks = state.completed_count();
        });
    }

    /// `total_tasks` is a historical counter and is left alone.
    pub fn delete_todo(&mut self, id: &str) {
        self.update(Persist::Yes, |state| state.todos.retain(|t| t.id != id));
    }

    // ------------------------------------------------------------------
    // Mood and theme
    // ------------------------------------------------------------------

    /// Replace the mood and switch to its theme, keeping the night-mode flag.
    pub fn update_mood(&mut self, mood: MoodData) {
        debug!(mood = %mood.mood, "mood updated");
        self.update(Persist::Yes, |state| {
            state.theme = ThemeConfig::for_mood(mood.mood).with_dark(state.is_night_mode);
            state.mood = Some(mood);
        });
    }

    /// Classify a free-text note and record it as the current mood.
    pub fn log_mood_note(&mut self, note: &str, intensity: u8) -> Mood {
        let mood = classify_mood(note);
        self.update_mood(MoodData::new(mood, note, intensity, self.clock.now()));
        mood
    }

    pub fn quick_mood(&mut self, mood: Mood) {
        let note = format!("Feeling {}", mood);
        self.update_mood(MoodData::new(mood, note, 5, self.clock.now()));
    }

    /// Flips night mode and the theme's dark flag together; the palette stays.
    pub fn toggle_night_mode(&mut self) {
        self.update(Persist::Yes, |state| {
            state.is_night_mode = !state.is_night_mode;
            state.theme.is_dark = state.is_night_mode;
        });
    }

    pub fn update_preferences(&mut self, patch: PreferencesPatch) {
        self.update(Persist::Yes, |state| state.preferences.merge(patch));
    }

    // ------------------------------------------------------------------
    // Journal
    // ------------------------------------------------------------------

    /// Newest entries come first. Returns the new entry's id.
    pub fn add_journal_entry(&mut self, new: NewJournalEntry) -> String {
        let entry = JournalEntry::from_new(new, self.clock.now());
        let id = entry.id.clone();
        self.update(Persist::Yes, |state| state.journal_entries.insert(0, entry));
        id
    }

    // ------------------------------------------------------------------
    // Gamification
    // ------------------------------------------------------------------

    pub fn add_points(&mut self, points: u64) {
        self.update(Persist::Yes, |state| state.user_stats.add_points(points));
    }

    pub fn unlock_badge(&mut self, badge: Badge) {
        self.update(Persist::Yes, |state| state.user_stats.unlock_badge(badge));
    }

    pub fn increment_streak(&mut self) {
        self.update(Persist::Yes, |state| state.user_stats.increment_streak());
    }

    pub fn add_focus_time(&mut self, minutes: u64) {
        self.update(Persist::Yes, |state| state.user_stats.add_focus_time(minutes));
    }

    /// Reward a finished focus segment: its minutes plus a point per minute.
    pub fn record_focus_session(&mut self, minutes: u64) {
        debug!(minutes, "focus session recorded");
        self.update(Persist::Yes, |state| {
            state.user_stats.add_focus_time(minutes);
            state.user_stats.add_points(minutes);
        });
    }

    /// Complete a todo picked in the focus timer, with the timer bonus on top
    /// of the usual completion points. Missing or already-completed todos are
    /// left alone and earn nothing.
    pub fn complete_task_from_timer(&mut self, id: &str) {
        self.update(Persist::Yes, |state| {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == id)
                && !todo.is_completed()
            {
                todo.toggle_completed();
                state
                    .user_stats
                    .add_points(TODO_COMPLETION_POINTS + TIMER_TASK_BONUS_POINTS);
            }
            state.user_stats.completed_tasks = state.completed_count();
        });
    }

    pub fn apply_timer_event(&mut self, event: FocusEvent) {
        match event {
            FocusEvent::FocusTimeEarned(minutes) => self.record_focus_session(u64::from(minutes)),
            FocusEvent::TaskCompleted(id) => self.complete_task_from_timer(&id),
        }
    }
}

fn load_persisted(snapshots: &dyn SnapshotStore) -> Option<PersistedState> {
    let blob = match snapshots.load(STORAGE_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read dashboard snapshot, using defaults: {:#}", e);
            return None;
        }
    };

    match serde_json::from_str(&blob) {
        Ok(persisted) => Some(persisted),
        Err(e) => {
            warn!("Dashboard snapshot is corrupt, using defaults: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests;
