//! HTTP Routes
//!
//! API Endpoints:
//! - /v1/audio/speech   POST  OpenAI 兼容语音合成
//! - /synthesize        POST  同上（旧客户端别名）
//! - /v1/voices         GET   列出所有音色
//! - /health            GET   健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/synthesize", post(handlers::create_speech))
        .nest("/v1", v1_routes())
}

/// OpenAI 兼容路由
fn v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/audio/speech", post(handlers::create_speech))
        .route("/voices", get(handlers::list_voices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ModelDescriptor;
    use crate::infrastructure::adapters::{
        FakeTtsClient, FfmpegExporter, FileReferenceLoader, VoiceDirectory,
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use std::fs;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    fn model() -> ModelDescriptor {
        ModelDescriptor {
            backbone_repo: "neuphonic/neutts-nano-german".into(),
            codec_repo: "neuphonic/neucodec".into(),
            backbone_device: "cpu".into(),
            codec_device: "cpu".into(),
        }
    }

    /// 两个扫描得到的音色：anna、otto
    fn app() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        for name in ["otto", "anna"] {
            fs::write(dir.path().join(format!("{}.wav", name)), b"RIFF").unwrap();
            fs::write(dir.path().join(format!("{}.txt", name)), "Guten Tag.\n").unwrap();
        }
        let registry = VoiceDirectory::new(dir.path()).load_registry().unwrap();

        let state = AppState::new(
            Arc::new(registry),
            Arc::new(FileReferenceLoader::new()),
            Arc::new(FakeTtsClient::with_defaults()),
            Arc::new(FfmpegExporter::default()),
            model(),
        );
        (dir, create_routes().with_state(Arc::new(state)))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_speech_wav() {
        let (_dir, app) = app();
        let response = app
            .oneshot(post_json(
                "/v1/audio/speech",
                r#"{"input":"Hallo Welt","voice":"otto","response_format":"wav"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(response.headers()["x-tts-voice-id"], "otto");
        assert!(response.headers().contains_key("x-tts-latency-s"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_synthesize_alias_uses_default_voice() {
        let (_dir, app) = app();
        let response = app
            .oneshot(post_json("/synthesize", r#"{"text":"Hallo","format":"pcm"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-tts-voice-id"], "default");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/pcm");
    }

    #[tokio::test]
    async fn test_unknown_voice_lists_available() {
        let (_dir, app) = app();
        let response = app
            .oneshot(post_json(
                "/v1/audio/speech",
                r#"{"input":"Hallo","voice":"x","response_format":"wav"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(
            json["error"]["message"],
            "Unknown voice 'x'. Available: anna, default, otto"
        );
        assert_eq!(json["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_missing_input_is_unprocessable() {
        let (_dir, app) = app();
        let response = app
            .oneshot(post_json("/v1/audio/speech", r#"{"voice":"anna"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_body(response).await;
        assert_eq!(json["error"]["message"], "Missing required field 'input'.");
    }

    #[tokio::test]
    async fn test_non_string_voice_uses_default() {
        let (_dir, app) = app();
        let response = app
            .oneshot(post_json(
                "/v1/audio/speech",
                r#"{"input":"Hallo","voice":123,"response_format":"wav"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-tts-voice-id"], "default");
    }

    #[tokio::test]
    async fn test_non_string_input_is_unprocessable() {
        let (_dir, app) = app();
        let response = app
            .oneshot(post_json(
                "/v1/audio/speech",
                r#"{"input":42,"response_format":"wav"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_body(response).await;
        assert_eq!(json["error"]["message"], "Missing required field 'input'.");
    }

    #[tokio::test]
    async fn test_bad_speed_is_unprocessable() {
        let (_dir, app) = app();
        let response = app
            .oneshot(post_json(
                "/v1/audio/speech",
                r#"{"input":"Hallo","speed":5.0,"response_format":"wav"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unsupported_format_and_malformed_json() {
        let (_dir, app) = app();
        let response = app
            .clone()
            .oneshot(post_json(
                "/v1/audio/speech",
                r#"{"input":"Hallo","response_format":"ogg"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(post_json("/v1/audio/speech", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_list_voices() {
        let (_dir, app) = app();
        let response = app
            .oneshot(Request::builder().uri("/v1/voices").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["voices"], serde_json::json!(["anna", "default", "otto"]));
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, app) = app();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model"]["backbone"], "neuphonic/neutts-nano-german");
        assert_eq!(json["devices"]["codec"], "cpu");
        assert_eq!(json["engine_reachable"], true);
        assert_eq!(json["voices"].as_array().unwrap().len(), 3);
    }
}
