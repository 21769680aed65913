//! Neuvox - OpenAI 兼容的语音合成服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色注册表（清单 + 目录扫描，default 别名）
//! - Speech Context: 输出格式、波形、语速
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, AudioExporter, ReferenceLoader）
//! - Commands: 语音合成
//! - Queries: 音色列表、健康检查
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: OpenAI 兼容 RESTful API
//! - Adapters: 音色目录、TTS Client、WAV 编解码、ffmpeg 导出

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
