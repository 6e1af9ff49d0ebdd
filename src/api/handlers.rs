use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::journal::NewJournalEntry;
use crate::mood::{Mood, MoodData, classify_mood};
use crate::store::{DashboardStore, PreferencesPatch};
use crate::todo::NewTodo;

use super::AppContext;
use super::models::{
    CreatedResponse, DashboardView, ErrorResponse, FocusRequest, MoodRequest, QuoteRefreshRequest,
};

const DEFAULT_INTENSITY: u8 = 5;

type ViewResult = Result<Json<DashboardView>, Response>;

/// Run a store action on the blocking pool, after picking up snapshots
/// that CLI commands persisted since the last request.
///
/// Reloading and persisting both touch the snapshot file, so neither runs on
/// an async worker while the store lock is held.
async fn with_store<T, F>(ctx: &AppContext, action: F) -> Result<T, Response>
where
    F: FnOnce(&mut DashboardStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&ctx.store);
    tokio::task::spawn_blocking(move || {
        let mut guard = store.blocking_lock();
        guard.reload();
        action(&mut *guard)
    })
    .await
    .map_err(ErrorResponse::internal)
}

/// Apply an action and answer with the resulting dashboard.
async fn apply<F>(ctx: &AppContext, action: F) -> ViewResult
where
    F: FnOnce(&mut DashboardStore) + Send + 'static,
{
    with_store(ctx, move |store| {
        action(&mut *store);
        DashboardView::from(&*store)
    })
    .await
    .map(Json)
}

fn created(result: Result<CreatedResponse, Response>) -> Response {
    match result {
        Ok(body) => (StatusCode::CREATED, Json(body)).into_response(),
        Err(response) => response,
    }
}

pub async fn get_dashboard(State(ctx): State<AppContext>) -> ViewResult {
    with_store(&ctx, |store| DashboardView::from(&*store))
        .await
        .map(Json)
}

pub async fn create_todo(State(ctx): State<AppContext>, Json(req): Json<NewTodo>) -> Response {
    if req.text.trim().is_empty() {
        return ErrorResponse::bad_request("Todo text must not be empty");
    }

    let result = with_store(&ctx, move |store| {
        let id = store.add_todo(req);
        CreatedResponse {
            id,
            dashboard: DashboardView::from(&*store),
        }
    })
    .await;
    created(result)
}

pub async fn toggle_todo(State(ctx): State<AppContext>, Path(id): Path<String>) -> ViewResult {
    apply(&ctx, move |store| store.toggle_todo(&id)).await
}

pub async fn toggle_progress(State(ctx): State<AppContext>, Path(id): Path<String>) -> ViewResult {
    apply(&ctx, move |store| store.toggle_in_progress(&id)).await
}

pub async fn delete_todo(State(ctx): State<AppContext>, Path(id): Path<String>) -> ViewResult {
    apply(&ctx, move |store| store.delete_todo(&id)).await
}

/// Record a mood, either named outright or classified from the note.
pub async fn set_mood(State(ctx): State<AppContext>, Json(req): Json<MoodRequest>) -> Response {
    let intensity = req.intensity.unwrap_or(DEFAULT_INTENSITY);

    let (mood, note) = match (req.mood.as_deref(), req.note) {
        (Some(label), note) => {
            let mood = Mood::parse_or_default(label);
            let note = note.unwrap_or_else(|| format!("Feeling {}", mood));
            (mood, note)
        }
        (None, Some(note)) if req.analyze => {
            let companion = ctx.companion.clone();
            let text = note.clone();
            match tokio::task::spawn_blocking(move || companion.analyze_mood(&text)).await {
                Ok(mood) => (mood, note),
                Err(e) => return ErrorResponse::internal(e),
            }
        }
        (None, Some(note)) => (classify_mood(&note), note),
        (None, None) => return ErrorResponse::bad_request("Either mood or note is required"),
    };

    debug!(mood = %mood, "mood posted");
    apply(&ctx, move |store| {
        let now = store.clock().now();
        store.update_mood(MoodData::new(mood, note, intensity, now));
    })
    .await
    .into_response()
}

pub async fn refresh_quote(
    State(ctx): State<AppContext>,
    body: Option<Json<QuoteRefreshRequest>>,
) -> ViewResult {
    let selection = body.map(|Json(req)| req.selection()).unwrap_or_default();
    apply(&ctx, move |store| store.refresh_quote(selection, &mut rand::thread_rng())).await
}

/// Ask the AI companion for a quote matching the current mood.
pub async fn generate_quote(State(ctx): State<AppContext>) -> Response {
    let mood = {
        let store = ctx.store.lock().await;
        store.state().mood.as_ref().map(|m| m.mood).unwrap_or_default()
    };

    let companion = ctx.companion.clone();
    let quote = match tokio::task::spawn_blocking(move || companion.generate_quote(mood)).await {
        Ok(quote) => quote,
        Err(e) => return ErrorResponse::internal(e),
    };

    apply(&ctx, move |store| store.update_quote(quote.into_quote()))
        .await
        .into_response()
}

/// Toggle the current quote in the favorites list.
pub async fn favorite_quote(State(ctx): State<AppContext>) -> ViewResult {
    apply(&ctx, |store| {
        let quote = store.state().quote.clone();
        store.toggle_quote_favorite(quote);
    })
    .await
}

pub async fn toggle_night_mode(State(ctx): State<AppContext>) -> ViewResult {
    apply(&ctx, |store| store.toggle_night_mode()).await
}

pub async fn update_preferences(
    State(ctx): State<AppContext>,
    Json(patch): Json<PreferencesPatch>,
) -> ViewResult {
    apply(&ctx, move |store| store.update_preferences(patch)).await
}

pub async fn add_journal_entry(
    State(ctx): State<AppContext>,
    Json(entry): Json<NewJournalEntry>,
) -> Response {
    if entry.content.trim().is_empty() {
        return ErrorResponse::bad_request("Journal entry must not be empty");
    }

    let result = with_store(&ctx, move |store| {
        let id = store.add_journal_entry(entry);
        CreatedResponse {
            id,
            dashboard: DashboardView::from(&*store),
        }
    })
    .await;
    created(result)
}

/// Credit a finished focus session, completing its task if one was picked.
pub async fn record_focus(
    State(ctx): State<AppContext>,
    Json(req): Json<FocusRequest>,
) -> ViewResult {
    apply(&ctx, move |store| {
        store.record_focus_session(req.minutes);
        if let Some(task_id) = req.task_id {
            store.complete_task_from_timer(&task_id);
        }
    })
    .await
}
