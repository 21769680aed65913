//! Voice Context - Value Objects

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::VoiceError;

/// 默认音色标识
pub const DEFAULT_VOICE: &str = "default";

/// 音色标识
///
/// 不变量:
/// - 非空，且不能全部为空白字符
/// - 区分大小写
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, VoiceError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(VoiceError::InvalidVoiceId(id));
        }
        Ok(Self(id))
    }

    /// 默认音色
    pub fn default_voice() -> Self {
        Self(DEFAULT_VOICE.to_string())
    }

    /// 规范化请求中的音色标识
    ///
    /// 缺失、空串或纯空白都视为 `default`，其余取 trim 后的值
    pub fn requested(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(id) if !id.is_empty() => Self(id.to_string()),
            _ => Self::default_voice(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_VOICE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 说话人嵌入（codes）文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingFormat {
    Pt,
    Pth,
    Bin,
    Npy,
}

impl EmbeddingFormat {
    /// 扫描目录时的匹配顺序，先命中者生效
    pub const PRIORITY: [EmbeddingFormat; 4] = [Self::Pt, Self::Pth, Self::Bin, Self::Npy];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pt" => Some(Self::Pt),
            "pth" => Some(Self::Pth),
            "bin" => Some(Self::Bin),
            "npy" => Some(Self::Npy),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::Pth => "pth",
            Self::Bin => "bin",
            Self::Npy => "npy",
        }
    }
}

/// 音色素材 - 参考音频、文本及可选的预计算 codes
///
/// 不变量（加载时校验）:
/// - wav_path / txt_path 指向存在的文件
/// - codes_path 若存在也必须指向存在的文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceAsset {
    wav_path: PathBuf,
    txt_path: PathBuf,
    codes_path: Option<PathBuf>,
}

impl VoiceAsset {
    pub fn new(wav_path: PathBuf, txt_path: PathBuf, codes_path: Option<PathBuf>) -> Self {
        Self {
            wav_path,
            txt_path,
            codes_path,
        }
    }

    pub fn wav_path(&self) -> &Path {
        &self.wav_path
    }

    pub fn txt_path(&self) -> &Path {
        &self.txt_path
    }

    pub fn codes_path(&self) -> Option<&Path> {
        self.codes_path.as_deref()
    }

    /// codes 文件格式，扩展名无法识别时为 None
    pub fn codes_format(&self) -> Option<EmbeddingFormat> {
        self.codes_path.as_deref().and_then(EmbeddingFormat::from_path)
    }
}

/// 素材文件类型（用于错误信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Wav,
    Txt,
    Codes,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Wav => write!(f, "wav"),
            AssetKind::Txt => write!(f, "txt"),
            AssetKind::Codes => write!(f, "codes"),
        }
    }
}
