use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{AppContext, handlers};

async fn health_check() -> &'static str {
    "ok"
}

pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/todos", post(handlers::create_todo))
        .route("/api/todos/{id}", delete(handlers::delete_todo))
        .route("/api/todos/{id}/toggle", patch(handlers::toggle_todo))
        .route("/api/todos/{id}/progress", patch(handlers::toggle_progress))
        .route("/api/mood", post(handlers::set_mood))
        .route("/api/quote/refresh", post(handlers::refresh_quote))
        .route("/api/quote/generate", post(handlers::generate_quote))
        .route("/api/quote/favorite", post(handlers::favorite_quote))
        .route("/api/night-mode", post(handlers::toggle_night_mode))
        .route("/api/preferences", patch(handlers::update_preferences))
        .route("/api/journal", post(handlers::add_journal_entry))
        .route("/api/focus", post(handlers::record_focus))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
