//! HTTP TTS Client - 调用外部神经推理引擎
//!
//! 实现 TtsEnginePort trait，通过 HTTP 调用外部推理服务
//!
//! 外部推理 API:
//! POST {base_url}/infer
//! Request: {"text": "...", "ref_text": "...", "ref_codes": "/voices/a.pt", "speed": 1.0} (JSON)
//! Response: audio/wav，或裸 f32 小端采样（采样率见 X-Sample-Rate）
//!
//! 参考素材以路径传递，推理服务与本服务共享音色目录

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{InferRequest, ReferenceEmbedding, TtsEnginePort, TtsError};
use crate::domain::speech::{Waveform, ENGINE_SAMPLE_RATE};
use crate::domain::voice::EmbeddingFormat;
use crate::infrastructure::adapters::audio::wav_codec::{decode_raw_f32, decode_wav, is_wav};

/// TTS 推理请求体 (JSON)
#[derive(Debug, Serialize)]
struct TtsHttpRequest {
    /// 要合成的文本
    text: String,
    /// 参考音频对应的文本
    ref_text: String,
    /// 预计算 codes 路径
    #[serde(skip_serializing_if = "Option::is_none")]
    ref_codes: Option<String>,
    /// codes 文件格式
    #[serde(skip_serializing_if = "Option::is_none")]
    ref_codes_format: Option<EmbeddingFormat>,
    /// 参考音频路径（无 codes 时由引擎编码）
    #[serde(skip_serializing_if = "Option::is_none")]
    ref_audio: Option<String>,
    speed: f32,
}

impl From<InferRequest> for TtsHttpRequest {
    fn from(request: InferRequest) -> Self {
        let (ref_codes, ref_codes_format, ref_audio) = match request.reference {
            ReferenceEmbedding::Codes { path, format } => {
                (Some(path.display().to_string()), format, None)
            }
            ReferenceEmbedding::Audio { wav_path } => {
                (None, None, Some(wav_path.display().to_string()))
            }
        };
        Self {
            text: request.text,
            ref_text: request.reference_text,
            ref_codes,
            ref_codes_format,
            ref_audio,
            speed: request.speed,
        }
    }
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// 推理服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取推理 URL
    fn infer_url(&self) -> String {
        format!("{}/infer", self.config.base_url.trim_end_matches('/'))
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }
}

/// 解析推理服务返回的音频
fn parse_audio_body(body: &[u8], sample_rate: Option<u32>) -> Result<Waveform, TtsError> {
    let result = if is_wav(body) {
        decode_wav(body)
    } else {
        decode_raw_f32(body, sample_rate.unwrap_or(ENGINE_SAMPLE_RATE))
    };
    result.map_err(|e| TtsError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl TtsEnginePort for HttpTtsClient {
    async fn infer(&self, request: InferRequest) -> Result<Waveform, TtsError> {
        let voice_id = request.voice_id.clone();
        let http_request = TtsHttpRequest::from(request);

        tracing::debug!(
            url = %self.infer_url(),
            voice_id = %voice_id,
            text_len = http_request.text.len(),
            ref_codes = ?http_request.ref_codes,
            ref_audio = ?http_request.ref_audio,
            "Sending TTS infer request"
        );

        let response = self
            .client
            .post(self.infer_url())
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let sample_rate = response
            .headers()
            .get("X-Sample-Rate")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        let waveform = parse_audio_body(&body, sample_rate)?;

        tracing::info!(
            voice_id = %voice_id,
            sample_rate = waveform.sample_rate(),
            duration_ms = waveform.duration_ms(),
            "TTS inference completed"
        );

        Ok(waveform)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::audio::wav_codec::encode_wav;
    use std::path::PathBuf;

    #[test]
    fn test_config_default() {
        let config = HttpTtsClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8001");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpTtsClientConfig::new("http://engine:9000/").with_timeout(60);
        let client = HttpTtsClient::new(config).unwrap();
        assert_eq!(client.infer_url(), "http://engine:9000/infer");
        assert_eq!(client.health_url(), "http://engine:9000/health");
    }

    #[test]
    fn test_request_body_with_codes() {
        let body = TtsHttpRequest::from(InferRequest {
            text: "Hallo".into(),
            reference: ReferenceEmbedding::Codes {
                path: PathBuf::from("/voices/greta.pt"),
                format: Some(EmbeddingFormat::Pt),
            },
            reference_text: "Guten Tag".into(),
            speed: 1.0,
            voice_id: "greta".into(),
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["ref_codes"], "/voices/greta.pt");
        assert_eq!(json["ref_codes_format"], "pt");
        assert_eq!(json["ref_text"], "Guten Tag");
        assert!(json.get("ref_audio").is_none());
    }

    #[test]
    fn test_request_body_with_audio() {
        let body = TtsHttpRequest::from(InferRequest {
            text: "Hallo".into(),
            reference: ReferenceEmbedding::Audio {
                wav_path: PathBuf::from("/voices/greta.wav"),
            },
            reference_text: "Guten Tag".into(),
            speed: 1.5,
            voice_id: "greta".into(),
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["ref_audio"], "/voices/greta.wav");
        assert!(json.get("ref_codes").is_none());
        assert_eq!(json["speed"], 1.5);
    }

    #[test]
    fn test_parse_wav_and_raw_bodies() {
        let wave = Waveform::new(vec![0.0; 48], 16_000);
        let from_wav = parse_audio_body(&encode_wav(&wave), None).unwrap();
        assert_eq!(from_wav.sample_rate(), 16_000);
        assert_eq!(from_wav.samples().len(), 48);

        let raw: Vec<u8> = [0.5f32, -0.5].iter().flat_map(|s| s.to_le_bytes()).collect();
        let from_raw = parse_audio_body(&raw, None).unwrap();
        assert_eq!(from_raw.sample_rate(), ENGINE_SAMPLE_RATE);
        assert_eq!(from_raw.samples(), &[0.5, -0.5]);
    }

    #[tokio::test]
    async fn test_unreachable_engine() {
        let config = HttpTtsClientConfig::new("http://127.0.0.1:1").with_timeout(2);
        let client = HttpTtsClient::new(config).unwrap();
        assert!(!client.health_check().await);
    }
}
