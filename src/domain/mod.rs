//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色注册与解析
//! - Speech Context: 合成输出格式与波形

pub mod speech;
pub mod voice;
