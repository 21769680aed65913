//! Voice Context - Errors

use std::path::PathBuf;
use thiserror::Error;

use super::AssetKind;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("failed to read voice manifest {}: {reason}", path.display())]
    ManifestUnreadable { path: PathBuf, reason: String },

    #[error("malformed voice manifest {}: {reason}", path.display())]
    ManifestMalformed { path: PathBuf, reason: String },

    #[error("invalid voice id: {0:?}")]
    InvalidVoiceId(String),

    #[error("missing {kind} for voice '{voice}': {}", path.display())]
    MissingAsset {
        voice: String,
        kind: AssetKind,
        path: PathBuf,
    },

    #[error(
        "No voices found in {}. Provide voices.json OR at least one pair <voice>.wav + <voice>.txt.",
        dir.display()
    )]
    NoVoices { dir: PathBuf },

    #[error("Unknown voice '{requested}'. Available: {}", available.join(", "))]
    UnknownVoice {
        requested: String,
        available: Vec<String>,
    },

    #[error("failed to scan voice directory {}: {reason}", path.display())]
    ScanFailed { path: PathBuf, reason: String },
}

impl VoiceError {
    /// 请求期错误（客户端输入问题），其余均为启动期致命错误
    pub fn is_client_error(&self) -> bool {
        matches!(self, VoiceError::UnknownVoice { .. })
    }
}
