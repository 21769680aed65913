//! Health Query Handlers

use std::sync::Arc;

use crate::application::ports::TtsEnginePort;
use crate::application::queries::{GetHealth, ModelDescriptor};
use crate::domain::voice::VoiceRegistry;

/// 健康检查响应
#[derive(Debug, Clone)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: ModelDescriptor,
    pub voices: Vec<String>,
    pub engine_reachable: bool,
}

/// GetHealth Handler
///
/// 注册表在服务启动前已加载完成，能走到这里说明服务已就绪
pub struct GetHealthHandler {
    voices: Arc<VoiceRegistry>,
    tts_engine: Arc<dyn TtsEnginePort>,
    model: ModelDescriptor,
}

impl GetHealthHandler {
    pub fn new(
        voices: Arc<VoiceRegistry>,
        tts_engine: Arc<dyn TtsEnginePort>,
        model: ModelDescriptor,
    ) -> Self {
        Self {
            voices,
            tts_engine,
            model,
        }
    }

    pub async fn handle(&self, _query: GetHealth) -> HealthResponse {
        let engine_reachable = self.tts_engine.health_check().await;
        if !engine_reachable {
            tracing::warn!("TTS engine health check failed");
        }

        HealthResponse {
            status: "ok",
            model: self.model.clone(),
            voices: self.voices.list_ids(),
            engine_reachable,
        }
    }
}
