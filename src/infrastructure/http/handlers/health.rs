//! Health Handler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GetHealth;
use crate::infrastructure::http::dto::HealthResponseDto;
use crate::infrastructure::http::state::AppState;

/// 健康检查
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponseDto> {
    Json(state.get_health_handler.handle(GetHealth).await.into())
}
