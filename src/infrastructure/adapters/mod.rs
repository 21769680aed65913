//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod audio;
pub mod tts;
pub mod voices;

pub use audio::{FfmpegExporter, FfmpegExporterConfig};
pub use tts::*;
pub use voices::{FileReferenceLoader, VoiceDirectory, DEFAULT_MANIFEST_NAME};
