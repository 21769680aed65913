//! Speech Context - Value Objects

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 推理引擎输出的采样率（Hz）
pub const ENGINE_SAMPLE_RATE: u32 = 24_000;

/// 语速范围（OpenAI 兼容）
pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 2.0;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Unsupported response_format '{0}'. Supported: mp3, opus, aac, flac, wav, pcm")]
    UnsupportedFormat(String),

    #[error("Missing required field 'input'.")]
    EmptyInput,

    #[error("speed must be between 0.5 and 2.0, got {0}")]
    SpeedOutOfRange(f32),
}

/// 输出音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    /// 裸 f32 小端采样，无文件头
    Pcm,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/ogg",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Pcm => "audio/pcm",
        }
    }

    /// 是否需要外部转码器
    pub fn needs_transcoder(&self) -> bool {
        !matches!(self, Self::Wav | Self::Pcm)
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for AudioFormat {
    type Err = SpeechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "opus" => Ok(Self::Opus),
            "aac" => Ok(Self::Aac),
            "flac" => Ok(Self::Flac),
            "wav" => Ok(Self::Wav),
            "pcm" => Ok(Self::Pcm),
            _ => Err(SpeechError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// 单声道波形
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }
}

/// 校验语速
pub fn validate_speed(speed: f32) -> Result<f32, SpeechError> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(SpeechError::SpeedOutOfRange(speed));
    }
    Ok(speed)
}
