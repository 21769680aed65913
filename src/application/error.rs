//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{ExportError, ReferenceError, TtsError};
use crate::domain::speech::SpeechError;
use crate::domain::voice::VoiceError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求参数不合法（缺少 input、语速越界等）
    #[error("{0}")]
    ValidationError(String),

    /// 请求参数无法识别（如不支持的输出格式）
    #[error("{0}")]
    BadRequest(String),

    /// 未知音色，附带可用音色列表
    #[error("Unknown voice '{requested}'. Available: {}", available.join(", "))]
    UnknownVoice {
        requested: String,
        available: Vec<String>,
    },

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 音频导出错误
    #[error("Audio export failed: {0}")]
    ExportError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::UnknownVoice {
                requested,
                available,
            } => Self::UnknownVoice {
                requested,
                available,
            },
            other => Self::InternalError(other.to_string()),
        }
    }
}

impl From<SpeechError> for ApplicationError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::UnsupportedFormat(_) => Self::BadRequest(err.to_string()),
            SpeechError::EmptyInput | SpeechError::SpeedOutOfRange(_) => {
                Self::ValidationError(err.to_string())
            }
        }
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<ExportError> for ApplicationError {
    fn from(err: ExportError) -> Self {
        Self::ExportError(err.to_string())
    }
}

impl From<ReferenceError> for ApplicationError {
    fn from(err: ReferenceError) -> Self {
        Self::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_voice_keeps_available_list() {
        let err: ApplicationError = VoiceError::UnknownVoice {
            requested: "x".to_string(),
            available: vec!["a".to_string(), "default".to_string()],
        }
        .into();
        assert_eq!(err.to_string(), "Unknown voice 'x'. Available: a, default");
    }

    #[test]
    fn test_speech_errors_are_classified() {
        let bad: ApplicationError = SpeechError::UnsupportedFormat("ogg".into()).into();
        assert!(matches!(bad, ApplicationError::BadRequest(_)));

        let invalid: ApplicationError = SpeechError::EmptyInput.into();
        assert!(matches!(invalid, ApplicationError::ValidationError(_)));
    }
}
