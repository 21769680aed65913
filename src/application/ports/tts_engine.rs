//! TTS Engine Port - TTS 推理引擎抽象
//!
//! 定义 TTS 推理的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::speech::Waveform;
use crate::domain::voice::EmbeddingFormat;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 说话人参考
///
/// 优先使用预计算的 codes；没有时由引擎从参考音频现场编码
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceEmbedding {
    Codes {
        path: PathBuf,
        format: Option<EmbeddingFormat>,
    },
    Audio {
        wav_path: PathBuf,
    },
}

/// TTS 推理请求
#[derive(Debug, Clone)]
pub struct InferRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 说话人参考
    pub reference: ReferenceEmbedding,
    /// 参考音频对应的文本
    pub reference_text: String,
    /// 语速
    pub speed: f32,
    /// 音色标识（用于日志和追踪）
    pub voice_id: String,
}

/// TTS Engine Port
///
/// 外部神经推理引擎的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 执行 TTS 推理，返回 24kHz 单声道波形
    async fn infer(&self, request: InferRequest) -> Result<Waveform, TtsError>;

    /// 检查 TTS 服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
