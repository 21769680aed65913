//! Speech HTTP Handlers
//!
//! `POST /v1/audio/speech` 与别名 `POST /synthesize`

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::application::ApplicationError;
use crate::infrastructure::http::dto::SpeechRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 推理耗时（秒）
pub const LATENCY_HEADER: &str = "x-tts-latency-s";
/// 实际使用的音色
pub const VOICE_ID_HEADER: &str = "x-tts-voice-id";

/// 合成语音
pub async fn create_speech(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let command = req
        .into_command()
        .map_err(ApplicationError::from)?;

    let result = state.synthesize_speech_handler.handle(command).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(result.content_type()),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(result.audio_data.len()));
    if let Ok(latency) = HeaderValue::from_str(&format!("{:.3}", result.latency.as_secs_f64())) {
        headers.insert(LATENCY_HEADER, latency);
    }
    // 非 ASCII 音色名无法放入 header，直接省略
    if let Ok(voice) = HeaderValue::from_str(&result.voice_id) {
        headers.insert(VOICE_ID_HEADER, voice);
    }

    Ok((StatusCode::OK, headers, Body::from(result.audio_data)).into_response())
}
