//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 音色目录配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 模型描述（透传给健康检查）
    #[serde(default)]
    pub model: ModelConfig,

    /// 音频导出配置
    #[serde(default)]
    pub export: ExportConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 音色目录配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 音色素材目录
    #[serde(default = "default_voices_dir")]
    pub dir: PathBuf,

    /// 清单文件名（相对于 `dir`）
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

fn default_voices_dir() -> PathBuf {
    PathBuf::from("/voices")
}

fn default_manifest() -> String {
    "voices.json".to_string()
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            dir: default_voices_dir(),
            manifest: default_manifest(),
        }
    }
}

/// 推理引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsEngineKind {
    /// 外部 HTTP 推理服务
    #[default]
    Http,
    /// 本地假引擎，输出正弦波
    Fake,
}

impl std::fmt::Display for TtsEngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Fake => write!(f, "fake"),
        }
    }
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub engine: TtsEngineKind,

    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            engine: TtsEngineKind::default(),
            url: default_tts_url(),
            timeout_secs: default_tts_timeout(),
        }
    }
}

/// 模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_backbone_repo")]
    pub backbone_repo: String,

    #[serde(default = "default_codec_repo")]
    pub codec_repo: String,

    #[serde(default = "default_device")]
    pub backbone_device: String,

    #[serde(default = "default_device")]
    pub codec_device: String,
}

fn default_backbone_repo() -> String {
    "neuphonic/neutts-nano-german".to_string()
}

fn default_codec_repo() -> String {
    "neuphonic/neucodec".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backbone_repo: default_backbone_repo(),
            codec_repo: default_codec_repo(),
            backbone_device: default_device(),
            codec_device: default_device(),
        }
    }
}

/// 音频导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// ffmpeg 可执行文件路径
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// libmp3lame VBR 质量 (0-9)
    #[serde(default = "default_mp3_quality")]
    pub mp3_quality: u8,

    /// Opus 比特率（bps）
    /// 语音推荐 16000-64000
    #[serde(default = "default_opus_bitrate")]
    pub opus_bitrate: u32,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_mp3_quality() -> u8 {
    4
}

fn default_opus_bitrate() -> u32 {
    32000
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            mp3_quality: default_mp3_quality(),
            opus_bitrate: default_opus_bitrate(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
