//! Configuration Module
//!
//! 提供应用配置管理功能，支持多层级配置来源：
//! - 旧版环境变量（VOICE_SAMPLES_DIR、NEUTTS_*）
//! - 环境变量 NEUVOX_*
//! - 配置文件（TOML 格式）
//! - 默认值（最低优先级）

mod loader;
mod types;

pub use loader::{load_config_from_path, print_config, ConfigError};
pub use types::{
    AppConfig, ExportConfig, LogConfig, ModelConfig, ServerConfig, TtsConfig, TtsEngineKind,
    VoicesConfig,
};
