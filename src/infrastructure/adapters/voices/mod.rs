//! Voice Adapters - 音色目录加载与参考素材读取

mod reference_loader;
mod voice_directory;

pub use reference_loader::FileReferenceLoader;
pub use voice_directory::{VoiceDirectory, DEFAULT_MANIFEST_NAME};
