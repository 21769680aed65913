//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_exporter;
mod reference_loader;
mod tts_engine;

pub use audio_exporter::{AudioExporterPort, ExportError};
pub use reference_loader::{ReferenceError, ReferenceLoaderPort, VoiceReference};
pub use tts_engine::{InferRequest, ReferenceEmbedding, TtsEnginePort, TtsError};
