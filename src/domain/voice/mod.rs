//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色标识与素材（wav / txt / codes）
//! - 清单与目录扫描的合并策略
//! - 音色解析

mod errors;
mod registry;
mod value_objects;

pub use errors::VoiceError;
pub use registry::VoiceRegistry;
pub use value_objects::{AssetKind, EmbeddingFormat, VoiceAsset, VoiceId, DEFAULT_VOICE};
