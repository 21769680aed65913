//! Voice Query Handlers

use std::sync::Arc;

use crate::application::queries::ListVoices;
use crate::domain::voice::VoiceRegistry;

/// 音色列表响应
#[derive(Debug, Clone)]
pub struct VoiceListResponse {
    /// 已排序的音色标识，包含 `default`
    pub voices: Vec<String>,
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    voices: Arc<VoiceRegistry>,
}

impl ListVoicesHandler {
    pub fn new(voices: Arc<VoiceRegistry>) -> Self {
        Self { voices }
    }

    pub fn handle(&self, _query: ListVoices) -> VoiceListResponse {
        VoiceListResponse {
            voices: self.voices.list_ids(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::{VoiceAsset, VoiceId};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_list_voices_sorted_with_default() {
        let mut scanned = BTreeMap::new();
        for name in ["otto", "anna"] {
            scanned.insert(
                VoiceId::new(name).unwrap(),
                VoiceAsset::new(
                    PathBuf::from(format!("{}.wav", name)),
                    PathBuf::from(format!("{}.txt", name)),
                    None,
                ),
            );
        }
        let registry = VoiceRegistry::assemble(BTreeMap::new(), scanned, Path::new(".")).unwrap();
        let handler = ListVoicesHandler::new(Arc::new(registry));

        assert_eq!(handler.handle(ListVoices).voices, vec!["anna", "default", "otto"]);
    }
}
