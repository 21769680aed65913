//! Data Transfer Objects

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::{HealthResponse, SynthesizeSpeech, VoiceListResponse};
use crate::domain::speech::{AudioFormat, SpeechError};

// ============================================================================
// Speech DTOs
// ============================================================================

/// OpenAI 兼容的语音合成请求
///
/// `text` / `format` 为旧客户端使用的别名；`model`、`stream` 等字段忽略。
/// 文本字段类型不对时按缺失处理，交给后续的默认值和校验
#[derive(Debug, Default, Deserialize)]
pub struct SpeechRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub input: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub voice: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub response_format: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub format: Option<String>,
    #[serde(default)]
    pub speed: Option<f32>,
}

impl SpeechRequest {
    /// 转换为合成命令，输出格式在这里解析
    ///
    /// 主字段为空串时回退到别名字段
    pub fn into_command(self) -> Result<SynthesizeSpeech, SpeechError> {
        let format = match non_empty(self.response_format).or(non_empty(self.format)) {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => AudioFormat::default(),
        };

        Ok(SynthesizeSpeech {
            input: non_empty(self.input).or(self.text).unwrap_or_default(),
            voice: self.voice,
            format,
            speed: self.speed,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// 只接受 JSON 字符串，其余类型（数字、对象、null）视为缺失
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
}

impl From<VoiceListResponse> for VoicesResponse {
    fn from(r: VoiceListResponse) -> Self {
        Self { voices: r.voices }
    }
}

// ============================================================================
// Health DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub backbone: String,
    pub codec: String,
}

#[derive(Debug, Serialize)]
pub struct DeviceInfo {
    pub backbone: String,
    pub codec: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: &'static str,
    pub model: ModelInfo,
    pub devices: DeviceInfo,
    pub voices: Vec<String>,
    pub engine_reachable: bool,
    pub version: &'static str,
}

impl From<HealthResponse> for HealthResponseDto {
    fn from(r: HealthResponse) -> Self {
        Self {
            status: r.status,
            model: ModelInfo {
                backbone: r.model.backbone_repo,
                codec: r.model.codec_repo,
            },
            devices: DeviceInfo {
                backbone: r.model.backbone_device,
                codec: r.model.codec_device,
            },
            voices: r.voices,
            engine_reachable: r.engine_reachable,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SpeechRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_openai_fields() {
        let cmd = parse(r#"{"model":"tts-1","input":"Hallo","voice":"greta","response_format":"wav","speed":1.25}"#)
            .into_command()
            .unwrap();

        assert_eq!(cmd.input, "Hallo");
        assert_eq!(cmd.voice.as_deref(), Some("greta"));
        assert_eq!(cmd.format, AudioFormat::Wav);
        assert_eq!(cmd.speed, Some(1.25));
    }

    #[test]
    fn test_legacy_aliases_and_defaults() {
        let cmd = parse(r#"{"text":"Hallo","format":"FLAC"}"#).into_command().unwrap();
        assert_eq!(cmd.input, "Hallo");
        assert_eq!(cmd.format, AudioFormat::Flac);
        assert!(cmd.voice.is_none());

        let cmd = parse(r#"{"input":"Hallo"}"#).into_command().unwrap();
        assert_eq!(cmd.format, AudioFormat::Mp3);
    }

    #[test]
    fn test_missing_input_becomes_empty() {
        let cmd = parse(r#"{"voice":"greta"}"#).into_command().unwrap();
        assert!(cmd.input.is_empty());
    }

    #[test]
    fn test_empty_primary_fields_fall_back_to_aliases() {
        let cmd = parse(r#"{"input":"","text":"Hallo","response_format":"","format":"wav"}"#)
            .into_command()
            .unwrap();
        assert_eq!(cmd.input, "Hallo");
        assert_eq!(cmd.format, AudioFormat::Wav);
    }

    #[test]
    fn test_non_string_fields_treated_as_missing() {
        let cmd = parse(r#"{"input":42,"voice":123,"response_format":["wav"]}"#)
            .into_command()
            .unwrap();
        assert!(cmd.input.is_empty());
        assert!(cmd.voice.is_none());
        assert_eq!(cmd.format, AudioFormat::Mp3);
    }

    #[test]
    fn test_unsupported_format() {
        let err = parse(r#"{"input":"x","response_format":"ogg"}"#)
            .into_command()
            .unwrap_err();
        assert!(matches!(err, SpeechError::UnsupportedFormat(_)));
    }
}
