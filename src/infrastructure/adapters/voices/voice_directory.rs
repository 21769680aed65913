//! Voice Directory - 从音色目录加载注册表
//!
//! 两个来源:
//! 1. `voices.json` 清单（可选，存在时对其声明的音色具有最终决定权）
//! 2. 目录扫描：`<id>.wav` + `<id>.txt`，可选 `<id>.{pt,pth,bin,npy}`
//!
//! 清单中的任何结构问题都是致命错误，扫描中不完整的素材对会被静默跳过。

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::domain::voice::{
    AssetKind, EmbeddingFormat, VoiceAsset, VoiceError, VoiceId, VoiceRegistry,
};

/// 默认清单文件名
pub const DEFAULT_MANIFEST_NAME: &str = "voices.json";

const WAV_EXTENSION: &str = "wav";
const TRANSCRIPT_EXTENSION: &str = "txt";

/// 清单条目，路径相对于音色目录
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    wav: String,
    txt: String,
    #[serde(default)]
    codes: Option<String>,
}

/// 音色目录
#[derive(Debug, Clone)]
pub struct VoiceDirectory {
    dir: PathBuf,
    manifest_name: String,
}

impl VoiceDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_manifest(dir, DEFAULT_MANIFEST_NAME)
    }

    pub fn with_manifest(dir: impl Into<PathBuf>, manifest_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            manifest_name: manifest_name.into(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(&self.manifest_name)
    }

    /// 加载注册表（启动期调用一次，失败即中止启动）
    pub fn load_registry(&self) -> Result<VoiceRegistry, VoiceError> {
        let manifest = if self.manifest_path().is_file() {
            self.load_manifest()?
        } else {
            tracing::debug!(path = %self.manifest_path().display(), "No voice manifest, scan only");
            BTreeMap::new()
        };
        let scanned = self.scan()?;

        tracing::info!(
            dir = %self.dir.display(),
            manifest_voices = manifest.len(),
            scanned_voices = scanned.len(),
            "Voice sources discovered"
        );

        let registry = VoiceRegistry::assemble(manifest, scanned, &self.dir)?;

        tracing::info!(voices = ?registry.list_ids(), "Voice registry loaded");
        Ok(registry)
    }

    /// 解析清单并校验所有声明的文件
    pub fn load_manifest(&self) -> Result<BTreeMap<VoiceId, VoiceAsset>, VoiceError> {
        let path = self.manifest_path();
        let raw = fs::read_to_string(&path).map_err(|e| VoiceError::ManifestUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let entries: BTreeMap<String, ManifestEntry> =
            serde_json::from_str(&raw).map_err(|e| VoiceError::ManifestMalformed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let mut voices = BTreeMap::new();
        for (raw_id, entry) in entries {
            let id = VoiceId::new(raw_id).map_err(|e| VoiceError::ManifestMalformed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            let wav = self.require(&id, AssetKind::Wav, &entry.wav)?;
            let txt = self.require(&id, AssetKind::Txt, &entry.txt)?;
            let codes = entry
                .codes
                .as_deref()
                .map(|codes| self.require(&id, AssetKind::Codes, codes))
                .transpose()?;

            voices.insert(id, VoiceAsset::new(wav, txt, codes));
        }

        Ok(voices)
    }

    /// 扫描目录中的 `<id>.wav` + `<id>.txt` 素材对
    ///
    /// 目录不存在时返回空集合
    pub fn scan(&self) -> Result<BTreeMap<VoiceId, VoiceAsset>, VoiceError> {
        let mut voices = BTreeMap::new();
        if !self.dir.is_dir() {
            tracing::warn!(dir = %self.dir.display(), "Voice directory does not exist");
            return Ok(voices);
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| self.scan_error(e))?;
        for entry in entries {
            let wav = entry.map_err(|e| self.scan_error(e))?.path();
            if !wav.is_file() || wav.extension().and_then(|e| e.to_str()) != Some(WAV_EXTENSION) {
                continue;
            }
            let Some(stem) = wav.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(id) = VoiceId::new(stem) else {
                continue;
            };

            let txt = self.sibling(stem, TRANSCRIPT_EXTENSION);
            if !txt.is_file() {
                tracing::debug!(voice = %id, "Skipping voice without transcript");
                continue;
            }

            let codes = EmbeddingFormat::PRIORITY
                .iter()
                .map(|format| self.sibling(stem, format.extension()))
                .find(|path| path.is_file());

            voices.insert(id, VoiceAsset::new(wav, txt, codes));
        }

        Ok(voices)
    }

    fn require(&self, id: &VoiceId, kind: AssetKind, relative: &str) -> Result<PathBuf, VoiceError> {
        let path = self.dir.join(relative);
        if !path.is_file() {
            return Err(VoiceError::MissingAsset {
                voice: id.to_string(),
                kind,
                path,
            });
        }
        Ok(path)
    }

    fn sibling(&self, stem: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", stem, extension))
    }

    fn scan_error(&self, err: std::io::Error) -> VoiceError {
        VoiceError::ScanFailed {
            path: self.dir.clone(),
            reason: err.to_string(),
        }
    }
}
