//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 旧版环境变量（VOICE_SAMPLES_DIR、NEUTTS_*）
//! 2. 环境变量（NEUVOX_*）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TtsEngineKind};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 旧版部署使用的环境变量 → 配置键
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("VOICE_SAMPLES_DIR", "voices.dir"),
    ("NEUTTS_BACKBONE_REPO", "model.backbone_repo"),
    ("NEUTTS_CODEC_REPO", "model.codec_repo"),
    ("NEUTTS_BACKBONE_DEVICE", "model.backbone_device"),
    ("NEUTTS_CODEC_DEVICE", "model.codec_device"),
];

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索 config.toml / config.local.toml
///
/// 按优先级从高到低合并配置：
/// 1. 旧版环境变量
/// 2. 环境变量（前缀 `NEUVOX_`，层级分隔符 `__`）
/// 3. 配置文件（config.toml 或 config.local.toml）
/// 4. 默认值
///
/// # 环境变量示例
/// - `NEUVOX_SERVER__PORT=8080`
/// - `NEUVOX_VOICES__DIR=/data/voices`
/// - `NEUVOX_TTS__ENGINE=fake`
/// - `NEUVOX_TTS__URL=http://engine:8001`
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_config_with(config_path, |key| std::env::var(key).ok())
}

/// 加载配置，旧版变量通过 `lookup` 读取
fn load_config_with<F>(config_path: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("voices.dir", "/voices")?
        .set_default("voices.manifest", "voices.json")?
        .set_default("tts.engine", "http")?
        .set_default("tts.url", "http://localhost:8001")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("model.backbone_repo", "neuphonic/neutts-nano-german")?
        .set_default("model.codec_repo", "neuphonic/neucodec")?
        .set_default("model.backbone_device", "cpu")?
        .set_default("model.codec_device", "cpu")?
        .set_default("export.ffmpeg_path", "ffmpeg")?
        .set_default("export.mp3_quality", 4)?
        .set_default("export.opus_bitrate", 32000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量
    // 前缀: NEUVOX_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("NEUVOX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 旧版环境变量（最高优先级），空值忽略
    for (var, key) in LEGACY_ENV_KEYS {
        let value = lookup(var).filter(|v| !v.trim().is_empty());
        builder = builder.set_override_option(*key, value)?;
    }

    // 5. 构建配置
    let config = builder.build()?;

    // 6. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 7. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.engine == TtsEngineKind::Http && config.tts.url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty when tts.engine is http".to_string(),
        ));
    }

    if config.voices.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice directory cannot be empty".to_string(),
        ));
    }

    if config.voices.manifest.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice manifest name cannot be empty".to_string(),
        ));
    }

    if config.export.mp3_quality > 9 {
        return Err(ConfigError::ValidationError(format!(
            "mp3_quality must be 0-9, got {}",
            config.export.mp3_quality
        )));
    }

    if config.export.opus_bitrate == 0 {
        return Err(ConfigError::ValidationError(
            "opus_bitrate cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Voice Directory: {:?}", config.voices.dir);
    tracing::info!("Voice Manifest: {}", config.voices.manifest);
    tracing::info!("TTS Engine: {}", config.tts.engine);
    if config.tts.engine == TtsEngineKind::Http {
        tracing::info!("TTS URL: {}", config.tts.url);
        tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    }
    tracing::info!(
        "Backbone: {} ({})",
        config.model.backbone_repo,
        config.model.backbone_device
    );
    tracing::info!("Codec: {} ({})", config.model.codec_repo, config.model.codec_device);
    tracing::info!("FFmpeg: {:?}", config.export.ffmpeg_path);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn no_legacy(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_tts_url_only_matters_for_http_engine() {
        let mut config = AppConfig::default();
        config.tts.url = String::new();
        assert!(validate_config(&config).is_err());

        config.tts.engine = TtsEngineKind::Fake;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_export_settings() {
        let mut config = AppConfig::default();
        config.export.mp3_quality = 10;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.export.opus_bitrate = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_voice_dir() {
        let mut config = AppConfig::default();
        config.voices.dir = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9000\n\n[voices]\ndir = \"/srv/voices\"\n\n[tts]\nengine = \"fake\""
        )
        .unwrap();

        let config = load_config_with(Some(file.path()), no_legacy).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.voices.dir, PathBuf::from("/srv/voices"));
        assert_eq!(config.tts.engine, TtsEngineKind::Fake);
        assert_eq!(config.model.codec_repo, "neuphonic/neucodec");
    }

    #[test]
    fn test_legacy_variables_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[voices]\ndir = \"/srv/voices\"").unwrap();

        let legacy: HashMap<&str, &str> = [
            ("VOICE_SAMPLES_DIR", "/legacy/voices"),
            ("NEUTTS_BACKBONE_DEVICE", "cuda"),
            ("NEUTTS_CODEC_REPO", "  "),
        ]
        .into_iter()
        .collect();

        let config = load_config_with(Some(file.path()), |key| {
            legacy.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.voices.dir, PathBuf::from("/legacy/voices"));
        assert_eq!(config.model.backbone_device, "cuda");
        // 空白值不覆盖
        assert_eq!(config.model.codec_repo, "neuphonic/neucodec");
    }

    #[test]
    fn test_invalid_file_value_fails_validation() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[export]\nmp3_quality = 12").unwrap();

        let err = load_config_with(Some(file.path()), no_legacy).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
