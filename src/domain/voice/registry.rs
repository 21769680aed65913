//! Voice Context - Registry
//!
//! 音色注册表：合并清单与目录扫描两个来源，保证存在 `default`，
//! 加载完成后只读，可被任意数量的请求并发读取（无需加锁）。

use std::collections::BTreeMap;
use std::path::Path;

use super::{VoiceAsset, VoiceError, VoiceId};

/// 音色注册表
///
/// 不变量:
/// - 至少包含一个音色
/// - 必定包含 `default`
#[derive(Debug, Clone)]
pub struct VoiceRegistry {
    voices: BTreeMap<VoiceId, VoiceAsset>,
}

impl VoiceRegistry {
    /// 由两个来源组装注册表
    ///
    /// - `manifest`: 清单中的音色，对同名标识具有最终决定权
    /// - `scanned`: 目录扫描得到的音色，仅补充清单中没有的标识
    /// - `source_dir`: 仅用于错误信息
    pub fn assemble(
        manifest: BTreeMap<VoiceId, VoiceAsset>,
        scanned: BTreeMap<VoiceId, VoiceAsset>,
        source_dir: &Path,
    ) -> Result<Self, VoiceError> {
        let mut voices = manifest;
        for (id, asset) in scanned {
            voices.entry(id).or_insert(asset);
        }

        if voices.is_empty() {
            return Err(VoiceError::NoVoices {
                dir: source_dir.to_path_buf(),
            });
        }

        ensure_default(&mut voices);

        Ok(Self { voices })
    }

    /// 解析音色标识
    ///
    /// 缺失或空白的标识按 `default` 处理
    pub fn resolve(&self, requested: Option<&str>) -> Result<&VoiceAsset, VoiceError> {
        let id = VoiceId::requested(requested);
        self.voices
            .get(&id)
            .ok_or_else(|| VoiceError::UnknownVoice {
                requested: id.to_string(),
                available: self.list_ids(),
            })
    }

    /// 所有音色标识（已排序，含 `default`）
    pub fn list_ids(&self) -> Vec<String> {
        self.voices.keys().map(|id| id.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

/// 若没有显式声明 `default`，将其指向排序后的第一个音色
fn ensure_default(voices: &mut BTreeMap<VoiceId, VoiceAsset>) {
    let default_id = VoiceId::default_voice();
    if voices.contains_key(&default_id) {
        return;
    }
    if let Some(first) = voices.values().next().cloned() {
        voices.insert(default_id, first);
    }
}
