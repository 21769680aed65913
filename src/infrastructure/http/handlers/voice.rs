//! Voice HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::VoicesResponse;
use crate::infrastructure::http::state::AppState;

/// 列出所有音色
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    Json(state.list_voices_handler.handle(ListVoices).into())
}
