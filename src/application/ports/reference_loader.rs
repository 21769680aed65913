//! Reference Loader Port - 参考素材读取

use async_trait::async_trait;
use thiserror::Error;

use super::ReferenceEmbedding;
use crate::domain::voice::VoiceAsset;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Failed to read reference transcript {path}: {reason}")]
    TranscriptUnreadable { path: String, reason: String },
}

/// 一次合成所需的参考素材
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceReference {
    pub transcript: String,
    pub embedding: ReferenceEmbedding,
}

#[async_trait]
pub trait ReferenceLoaderPort: Send + Sync {
    async fn load_reference(&self, asset: &VoiceAsset) -> Result<VoiceReference, ReferenceError>;
}
