//! Audio Exporter Port - 音频导出抽象
//!
//! 将合成的波形导出为请求的格式：wav / pcm 直接写出，压缩格式交给外部转码器

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::{AudioFormat, Waveform};

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Transcoder failed: {0}")]
    TranscoderFailed(String),

    #[error("Output file was not created: {0}")]
    MissingOutput(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err.to_string())
    }
}

/// Audio Exporter Port
#[async_trait]
pub trait AudioExporterPort: Send + Sync {
    /// 导出音频，返回目标格式的完整字节
    async fn export(&self, waveform: &Waveform, format: AudioFormat)
        -> Result<Vec<u8>, ExportError>;
}
