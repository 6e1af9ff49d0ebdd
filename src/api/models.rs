use axum::{
    Json,
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::content::QuoteSelection;
use crate::store::{DashboardState, DashboardStore};

/// The dashboard read model: the full state plus derived values.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub state: DashboardState,
    pub level: u64,
    pub total_points: u64,
    pub daily_focus: String,
}

impl From<&DashboardStore> for DashboardView {
    fn from(store: &DashboardStore) -> Self {
        let state = DashboardState::clone(&store.state());
        Self {
            level: state.user_stats.level(),
            total_points: state.user_stats.total_points(),
            daily_focus: store.daily_focus(),
            state,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub dashboard: DashboardView,
}

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub mood: Option<String>,
    pub note: Option<String>,
    pub intensity: Option<u8>,
    /// Ask the AI companion to classify `note` instead of the keyword matcher.
    #[serde(default)]
    pub analyze: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteRefreshRequest {
    pub selection: Option<String>,
}

impl QuoteRefreshRequest {
    pub fn selection(&self) -> QuoteSelection {
        self.selection
            .as_deref()
            .map(QuoteSelection::parse_or_default)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct FocusRequest {
    pub minutes: u64,
    /// Todo completed during the session, if any.
    pub task_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    pub fn internal(e: impl std::fmt::Display) -> Response<Body> {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(Self::new(e.to_string()))).into_response()
    }

    pub fn bad_request(message: impl Into<String>) -> Response<Body> {
        (StatusCode::BAD_REQUEST, Json(Self::new(message))).into_response()
    }
}
