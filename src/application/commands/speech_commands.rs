//! Speech Commands - 语音合成命令

use std::time::Duration;

use crate::domain::speech::AudioFormat;

/// 合成语音命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    /// 要合成的文本
    pub input: String,
    /// 请求的音色，缺失或空白时使用 `default`
    pub voice: Option<String>,
    /// 输出格式
    pub format: AudioFormat,
    /// 语速，缺失时为 1.0
    pub speed: Option<f32>,
}

/// 合成语音响应
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    pub audio_data: Vec<u8>,
    pub format: AudioFormat,
    /// 实际使用的音色标识（规范化之后）
    pub voice_id: String,
    /// 推理耗时
    pub latency: Duration,
    pub sample_rate: u32,
}

impl SynthesizeSpeechResponse {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}
