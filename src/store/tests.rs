use super::*;
use crate::clock::FixedClock;
use crate::mood::Mood;
use crate::storage::{FileSnapshotStore, MemorySnapshotStore};
use crate::stats::Rarity;
use crate::todo::{Priority, TodoStatus};
use chrono::{Local, TimeZone};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;
use tempfile::TempDir;

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        Local.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap(),
    ))
}

fn initial_state() -> DashboardState {
    DashboardState::initial(
        clock().as_ref(),
        &DashboardOptions::default(),
        &mut StdRng::seed_from_u64(7),
    )
}

fn test_store() -> DashboardStore {
    DashboardStore::new(initial_state(), clock(), Box::new(MemorySnapshotStore::new()))
}

fn store_with_snapshots(snapshots: Arc<MemorySnapshotStore>) -> DashboardStore {
    DashboardStore::open(Box::new(snapshots), clock(), DashboardOptions::default())
}

/// Every read and write fails, like an unreadable or full disk.
struct FailingSnapshots;

impl SnapshotStore for FailingSnapshots {
    fn load(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Err(anyhow::anyhow!("permission denied"))
    }

    fn save(&self, _key: &str, _blob: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("no space left on device"))
    }
}

#[test]
fn test_initial_state() {
    let store = test_store();
    let state = store.state();

    assert_eq!(state.greeting, "Good morning, Friend! ☀️");
    assert_eq!(state.todos.len(), 4);
    assert_eq!(state.mood, None);
    assert_eq!(state.theme, ThemeConfig::default_theme());
    assert!(!state.is_night_mode);
    assert_eq!(state.user_stats.level(), 1);
    assert_eq!(state.weather.location, "Your City");
}

#[test]
fn test_toggle_todo_twice_restores_status() {
    let mut store = test_store();
    let before = store.state().find_todo("1").unwrap().status;

    store.toggle_todo("1");
    assert!(store.state().find_todo("1").unwrap().is_completed());
    store.toggle_todo("1");

    let state = store.state();
    assert_eq!(state.find_todo("1").unwrap().status, before);
    assert_eq!(state.user_stats.completed_tasks, state.completed_count());
}

#[test]
fn test_completing_todo_awards_points() {
    let mut store = test_store();
    store.toggle_todo("1");

    let state = store.state();
    assert_eq!(state.user_stats.total_points(), 10);
    assert_eq!(state.user_stats.completed_tasks, 2);

    // Un-completing keeps the points already earned.
    store.toggle_todo("1");
    assert_eq!(store.state().user_stats.total_points(), 10);
    assert_eq!(store.state().user_stats.completed_tasks, 1);
}

#[test]
fn test_in_progress_then_toggle_completes() {
    let mut store = test_store();
    store.toggle_in_progress("3");
    assert_eq!(
        store.state().find_todo("3").unwrap().status,
        TodoStatus::InProgress
    );

    store.toggle_todo("3");
    assert_eq!(
        store.state().find_todo("3").unwrap().status,
        TodoStatus::Completed
    );
}

#[test]
fn test_add_todo_counts_and_delete_does_not_decrement() {
    let mut store = test_store();
    let id = store.add_todo(NewTodo::new("Plan the week", Priority::High));

    let state = store.state();
    assert_eq!(state.todos.len(), 5);
    assert_eq!(state.user_stats.total_tasks, 1);
    let added = state.find_todo(&id).unwrap();
    assert_eq!(added.text, "Plan the week");
    assert_eq!(added.status, TodoStatus::NotStarted);

    store.delete_todo(&id);
    let state = store.state();
    assert_eq!(state.todos.len(), 4);
    assert_eq!(state.user_stats.total_tasks, 1);
}

#[test]
fn test_delete_missing_id_publishes_equal_snapshot() {
    let mut store = test_store();
    let before = store.state();

    store.delete_todo("no-such-id");
    let after = store.state();

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(*before, *after);
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut store = test_store();
    let before = store.state();

    store.toggle_todo("missing");
    store.toggle_in_progress("missing");
    store.complete_task_from_timer("missing");

    let after = store.state();
    assert_eq!(after.todos, before.todos);
    assert_eq!(after.user_stats.total_points(), 0);
}

#[test]
fn test_favorite_toggle_is_its_own_inverse() {
    let mut store = test_store();
    let quote = store.state().quote.clone();

    store.toggle_quote_favorite(quote.clone());
    let state = store.state();
    assert_eq!(state.favorite_quotes.len(), 1);
    assert_eq!(state.favorite_quotes[0].id, quote.id);
    assert_eq!(state.favorite_quotes[0].is_favorite, Some(true));

    store.toggle_quote_favorite(quote.clone());
    assert!(store.state().favorite_quotes.is_empty());

    store.toggle_quote_favorite(quote.clone());
    store.toggle_quote_favorite(QuoteData {
        is_favorite: None,
        ..quote.clone()
    });
    assert!(store.state().favorite_quotes.is_empty());
}

#[test]
fn test_refresh_quote_daily_is_deterministic() {
    let mut store = test_store();
    let mut rng = StdRng::seed_from_u64(1);

    store.refresh_quote(QuoteSelection::Daily, &mut rng);
    assert_eq!(store.state().quote.id, "9");

    store.refresh_quote(
        QuoteSelection::Category(quotes::QuoteCategory::Wisdom),
        &mut rng,
    );
    assert_eq!(
        store.state().quote.category,
        quotes::QuoteCategory::Wisdom
    );
}

#[test]
fn test_update_weather_merges_patch() {
    let mut store = test_store();
    let before = store.state().weather.clone();

    store.update_weather(WeatherPatch {
        temperature: Some(30),
        ..WeatherPatch::default()
    });

    let weather = store.state().weather.clone();
    assert_eq!(weather.temperature, 30);
    assert_eq!(weather.condition, before.condition);
    assert_eq!(weather.location, before.location);
}

#[test]
fn test_happy_mood_sets_happy_theme() {
    let mut store = test_store();
    store.quick_mood(Mood::Happy);

    let state = store.state();
    let mood = state.mood.as_ref().unwrap();
    assert_eq!(mood.mood, Mood::Happy);
    assert_eq!(mood.note, "Feeling happy");
    assert_eq!(mood.intensity, 5);
    assert_eq!(state.theme, ThemeConfig::for_mood(Mood::Happy));
    assert_eq!(state.theme.name, "happy");
}

#[test]
fn test_unknown_mood_label_falls_back_to_calm() {
    let mut store = test_store();
    store.quick_mood(Mood::parse_or_default("bored"));

    let state = store.state();
    assert_eq!(state.mood.as_ref().unwrap().mood, Mood::Calm);
    assert_eq!(state.theme, ThemeConfig::for_label("bored"));
    assert_eq!(state.theme.name, "calm");
}

#[test]
fn test_mood_note_is_classified() {
    let mut store = test_store();
    let mood = store.log_mood_note("Feeling overwhelmed with work", 8);

    assert_eq!(mood, Mood::Stressed);
    let state = store.state();
    let recorded = state.mood.as_ref().unwrap();
    assert_eq!(recorded.note, "Feeling overwhelmed with work");
    assert_eq!(recorded.intensity, 8);
    assert_eq!(state.theme.name, "stressed");
}

#[test]
fn test_night_mode_flips_theme_dark_flag() {
    let mut store = test_store();
    store.quick_mood(Mood::Sad);

    store.toggle_night_mode();
    let state = store.state();
    assert!(state.is_night_mode);
    assert!(state.theme.is_dark);
    assert_eq!(state.theme.name, "sad");

    // A later mood change keeps the dark flag.
    store.quick_mood(Mood::Excited);
    assert!(store.state().theme.is_dark);

    store.toggle_night_mode();
    assert!(!store.state().is_night_mode);
    assert!(!store.state().theme.is_dark);
}

#[test]
fn test_update_preferences_merges() {
    let mut store = test_store();
    store.update_preferences(PreferencesPatch {
        layout: Some(Layout::List),
        sound_enabled: Some(false),
        ..PreferencesPatch::default()
    });

    let prefs = store.state().preferences.clone();
    assert_eq!(prefs.layout, Layout::List);
    assert!(!prefs.sound_enabled);
    assert_eq!(prefs.accent_color, "#3B82F6");
    assert!(prefs.notifications_enabled);
}

#[test]
fn test_journal_entries_are_prepended() {
    let mut store = test_store();
    let first = store.add_journal_entry(NewJournalEntry {
        content: "First".to_string(),
        ..NewJournalEntry::default()
    });
    let second = store.add_journal_entry(NewJournalEntry {
        content: "Second".to_string(),
        mood: Some(Mood::Hopeful),
        ..NewJournalEntry::default()
    });

    let state = store.state();
    let ids: Vec<&str> = state.journal_entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    assert_eq!(state.journal_entries[0].mood, Some(Mood::Hopeful));
}

#[test]
fn test_level_follows_points() {
    let mut store = test_store();
    store.add_points(99);
    assert_eq!(store.state().user_stats.level(), 1);
    store.add_points(1);
    assert_eq!(store.state().user_stats.level(), 2);
    store.add_points(150);
    assert_eq!(store.state().user_stats.level(), 3);
}

#[test]
fn test_streak_and_badges() {
    let mut store = test_store();
    store.increment_streak();
    store.increment_streak();
    store.unlock_badge(Badge {
        id: "early-bird".to_string(),
        name: "Early Bird".to_string(),
        description: "Finished a task before 9am".to_string(),
        icon: "🌅".to_string(),
        unlocked_at: store.clock().now(),
        rarity: Rarity::Rare,
    });

    let stats = store.state().user_stats.clone();
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.badges().len(), 1);
    assert_eq!(stats.badges()[0].id, "early-bird");
}

#[test]
fn test_record_focus_session() {
    let mut store = test_store();
    store.record_focus_session(25);

    let stats = store.state().user_stats.clone();
    assert_eq!(stats.focus_time, 25);
    assert_eq!(stats.total_points(), 25);
    assert_eq!(store.focus_time(), 25);

    store.add_focus_time(5);
    assert_eq!(store.focus_time(), 30);
    assert_eq!(store.state().user_stats.total_points(), 25);
}

#[test]
fn test_complete_task_from_timer_awards_bonus() {
    let mut store = test_store();
    store.complete_task_from_timer("1");

    let state = store.state();
    assert!(state.find_todo("1").unwrap().is_completed());
    assert_eq!(state.user_stats.total_points(), 25);
    assert_eq!(state.user_stats.completed_tasks, 2);

    // Already completed: nothing more to earn.
    store.complete_task_from_timer("1");
    assert_eq!(store.state().user_stats.total_points(), 25);
    assert!(store.state().find_todo("1").unwrap().is_completed());
}

#[test]
fn test_timer_events_are_applied() {
    let mut store = test_store();
    store.apply_timer_event(FocusEvent::FocusTimeEarned(15));
    store.apply_timer_event(FocusEvent::TaskCompleted("4".to_string()));

    let state = store.state();
    assert_eq!(state.user_stats.focus_time, 15);
    assert_eq!(state.user_stats.total_points(), 40);
    assert!(state.find_todo("4").unwrap().is_completed());
}

#[test]
fn test_daily_focus_tracks_todos() {
    let mut store = test_store();
    assert_eq!(
        store.daily_focus(),
        "Focus on 1 high-priority task today"
    );

    store.update_todos(Vec::new());
    assert_eq!(
        store.daily_focus(),
        "Great job! All tasks completed. Time to plan tomorrow"
    );
    assert_eq!(store.state().user_stats.completed_tasks, 0);
}

#[test]
fn test_subscribers_notified_once_per_action() {
    let mut store = test_store();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let id = store.subscribe(move |state| {
        sink.lock().unwrap().push(state.is_night_mode);
    });

    store.toggle_night_mode();
    store.toggle_night_mode();
    assert_eq!(*seen.lock().unwrap(), vec![true, false]);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.toggle_night_mode();
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn test_subscriber_sees_published_snapshot() {
    let mut store = test_store();
    let published = Arc::new(Mutex::new(None));

    let sink = Arc::clone(&published);
    store.subscribe(move |state| {
        *sink.lock().unwrap() = Some(Arc::clone(state));
    });
    store.add_points(5);

    let published = published.lock().unwrap().clone().unwrap();
    assert!(Arc::ptr_eq(&published, &store.state()));
}

#[test]
fn test_state_survives_reload() {
    let snapshots = Arc::new(MemorySnapshotStore::new());

    let mut store = store_with_snapshots(Arc::clone(&snapshots));
    let id = store.add_todo(NewTodo::new("Persisted task", Priority::Low));
    store.quick_mood(Mood::Motivated);
    store.toggle_night_mode();
    store.add_points(120);
    let quote = store.state().quote.clone();
    store.toggle_quote_favorite(quote.clone());
    store.add_journal_entry(NewJournalEntry {
        content: "Good day".to_string(),
        ..NewJournalEntry::default()
    });
    let saved = store.state();

    let reloaded = store_with_snapshots(snapshots).state();
    assert_eq!(reloaded.todos, saved.todos);
    assert!(reloaded.find_todo(&id).is_some());
    assert_eq!(reloaded.mood, saved.mood);
    assert_eq!(reloaded.user_stats, saved.user_stats);
    assert_eq!(reloaded.user_stats.level(), 2);
    assert_eq!(reloaded.favorite_quotes[0].id, quote.id);
    assert_eq!(reloaded.journal_entries, saved.journal_entries);
    assert!(reloaded.is_night_mode);
    assert_eq!(
        reloaded.theme,
        ThemeConfig::for_mood(Mood::Motivated).with_dark(true)
    );
}

#[test]
fn test_transient_fields_are_not_persisted() {
    let snapshots = Arc::new(MemorySnapshotStore::new());
    let mut store = store_with_snapshots(Arc::clone(&snapshots));
    store.add_points(1);

    let blob = snapshots.get(STORAGE_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.contains_key("todos"));
    assert!(object.contains_key("user_stats"));
    assert!(!object.contains_key("weather"));
    assert!(!object.contains_key("quote"));
    assert!(!object.contains_key("greeting"));
    assert!(!object.contains_key("theme"));
}

#[test]
fn test_transient_actions_do_not_write_snapshot() {
    let snapshots = Arc::new(MemorySnapshotStore::new());
    let mut store = store_with_snapshots(Arc::clone(&snapshots));

    store.update_greeting();
    store.refresh_weather(&mut StdRng::seed_from_u64(3));
    store.refresh_quote(QuoteSelection::Random, &mut StdRng::seed_from_u64(3));

    assert_eq!(snapshots.get(STORAGE_KEY), None);
}

#[test]
fn test_corrupt_snapshot_yields_defaults() {
    let snapshots = Arc::new(MemorySnapshotStore::with_entry(STORAGE_KEY, "{not json"));
    let state = store_with_snapshots(snapshots).state();

    assert_eq!(state.todos.len(), 4);
    assert_eq!(state.user_stats, crate::stats::UserStats::default());
    assert_eq!(state.mood, None);
}

#[test]
fn test_partial_snapshot_keeps_other_defaults() {
    let snapshots = Arc::new(MemorySnapshotStore::with_entry(
        STORAGE_KEY,
        r#"{"is_night_mode": true}"#,
    ));
    let state = store_with_snapshots(snapshots).state();

    assert!(state.is_night_mode);
    assert!(state.theme.is_dark);
    assert_eq!(state.theme.name, "calm");
    assert_eq!(state.todos.len(), 4);
}

#[test]
fn test_unreadable_snapshot_yields_defaults() {
    let store = DashboardStore::open(
        Box::new(FailingSnapshots),
        clock(),
        DashboardOptions::default(),
    );
    let state = store.state();

    assert_eq!(state.todos.len(), 4);
    assert_eq!(state.mood, None);
    assert_eq!(state.user_stats, crate::stats::UserStats::default());
    assert!(!state.is_night_mode);
}

#[test]
fn test_failed_save_still_publishes_and_notifies() {
    let mut store = DashboardStore::open(
        Box::new(FailingSnapshots),
        clock(),
        DashboardOptions::default(),
    );
    let notified = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&notified);
    store.subscribe(move |_| *counter.lock().unwrap() += 1);

    let before = store.state();
    let id = store.add_todo(NewTodo::new("Unsaved task", Priority::High));
    store.toggle_todo(&id);

    let state = store.state();
    assert_eq!(*notified.lock().unwrap(), 2);
    assert!(!Arc::ptr_eq(&before, &state));
    assert!(state.find_todo(&id).unwrap().is_completed());
    assert_eq!(state.user_stats.total_points(), 10);

    // A failing reload leaves the in-memory state alone
    store.reload();
    assert!(Arc::ptr_eq(&state, &store.state()));
}

#[test]
fn test_reload_without_snapshot_is_noop() {
    let mut store = store_with_snapshots(Arc::new(MemorySnapshotStore::new()));
    let before = store.state();

    store.reload();
    assert!(Arc::ptr_eq(&before, &store.state()));
}

#[test]
fn test_timer_rewards_keep_changes_persisted_during_session() {
    let temp = TempDir::new().unwrap();
    let open = || {
        DashboardStore::open(
            Box::new(FileSnapshotStore::new(temp.path())),
            clock(),
            DashboardOptions::default(),
        )
    };

    let mut session = open();
    let mut other = open();
    let id = other.add_todo(NewTodo::new("added during focus", Priority::Medium));
    other.quick_mood(Mood::Happy);

    session.reload();
    session.apply_timer_event(FocusEvent::FocusTimeEarned(25));

    let state = open().state();
    assert!(state.find_todo(&id).is_some());
    assert_eq!(state.mood.as_ref().map(|m| m.mood), Some(Mood::Happy));
    assert_eq!(state.theme.name, "happy");
    assert_eq!(state.user_stats.focus_time, 25);
    assert_eq!(state.user_stats.total_points(), 25);
}
