//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 不调用推理服务，按文本长度生成固定频率的正弦波

use async_trait::async_trait;
use std::f32::consts::PI;

use crate::application::ports::{InferRequest, TtsEnginePort, TtsError};
use crate::domain::speech::{Waveform, ENGINE_SAMPLE_RATE};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 每个字符对应的时长（毫秒）
    pub ms_per_char: u32,
    /// 正弦波频率（Hz）
    pub frequency: f32,
    /// 振幅 (0.0 - 1.0)
    pub amplitude: f32,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            ms_per_char: 60,
            frequency: 220.0,
            amplitude: 0.2,
        }
    }
}

/// Fake TTS Client
///
/// 用于测试和本地联调，输出与文本长度成正比的 24kHz 波形
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            ms_per_char = config.ms_per_char,
            frequency = config.frequency,
            "FakeTtsClient initialized"
        );
        Self { config }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    fn render(&self, text: &str) -> Waveform {
        let chars = text.chars().count() as u64;
        let len = (chars * self.config.ms_per_char as u64 * ENGINE_SAMPLE_RATE as u64 / 1000) as usize;
        let step = 2.0 * PI * self.config.frequency / ENGINE_SAMPLE_RATE as f32;
        let samples = (0..len)
            .map(|i| (i as f32 * step).sin() * self.config.amplitude)
            .collect();
        Waveform::new(samples, ENGINE_SAMPLE_RATE)
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn infer(&self, request: InferRequest) -> Result<Waveform, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            reference = ?request.reference,
            "FakeTtsClient: rendering tone"
        );
        Ok(self.render(&request.text))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
