//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、AudioExporter、ReferenceLoader）
//! - commands: 语音合成命令及处理器
//! - queries: 音色列表、健康检查查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::SynthesizeSpeechHandler, SynthesizeSpeech, SynthesizeSpeechResponse,
};

pub use error::ApplicationError;

pub use ports::{
    // Audio exporter
    AudioExporterPort,
    ExportError,
    // Reference loader
    ReferenceError,
    ReferenceLoaderPort,
    VoiceReference,
    // TTS engine
    InferRequest,
    ReferenceEmbedding,
    TtsEnginePort,
    TtsError,
};

pub use queries::{
    handlers::{GetHealthHandler, HealthResponse, ListVoicesHandler, VoiceListResponse},
    GetHealth, ListVoices, ModelDescriptor,
};
