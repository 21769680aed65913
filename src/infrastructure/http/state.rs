//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    SynthesizeSpeechHandler,
    // Query handlers
    GetHealthHandler, ListVoicesHandler, ModelDescriptor,
    // Ports
    AudioExporterPort, ReferenceLoaderPort, TtsEnginePort,
};
use crate::domain::voice::VoiceRegistry;

/// 应用状态
///
/// 音色注册表启动时构建一次，之后只读共享
pub struct AppState {
    // ========== Shared ==========
    pub voices: Arc<VoiceRegistry>,

    // ========== Command Handlers ==========
    pub synthesize_speech_handler: SynthesizeSpeechHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub get_health_handler: GetHealthHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        voices: Arc<VoiceRegistry>,
        reference_loader: Arc<dyn ReferenceLoaderPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        exporter: Arc<dyn AudioExporterPort>,
        model: ModelDescriptor,
    ) -> Self {
        Self {
            voices: voices.clone(),

            // Command handlers
            synthesize_speech_handler: SynthesizeSpeechHandler::new(
                voices.clone(),
                reference_loader,
                tts_engine.clone(),
                exporter,
            ),

            // Query handlers
            list_voices_handler: ListVoicesHandler::new(voices.clone()),
            get_health_handler: GetHealthHandler::new(voices, tts_engine, model),
        }
    }
}
