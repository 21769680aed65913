//! File Reference Loader - 从文件系统读取参考素材
//!
//! 实现 ReferenceLoaderPort trait

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{
    ReferenceEmbedding, ReferenceError, ReferenceLoaderPort, VoiceReference,
};
use crate::domain::voice::VoiceAsset;

/// 文件系统参考素材读取器
///
/// 存在预计算 codes 时优先使用，否则交给引擎从参考音频编码
#[derive(Debug, Default, Clone)]
pub struct FileReferenceLoader;

impl FileReferenceLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReferenceLoaderPort for FileReferenceLoader {
    async fn load_reference(&self, asset: &VoiceAsset) -> Result<VoiceReference, ReferenceError> {
        let transcript = fs::read_to_string(asset.txt_path())
            .await
            .map_err(|e| ReferenceError::TranscriptUnreadable {
                path: asset.txt_path().display().to_string(),
                reason: e.to_string(),
            })?
            .trim()
            .to_string();

        let embedding = match asset.codes_path() {
            Some(path) => ReferenceEmbedding::Codes {
                path: path.to_path_buf(),
                format: asset.codes_format(),
            },
            None => ReferenceEmbedding::Audio {
                wav_path: asset.wav_path().to_path_buf(),
            },
        };

        Ok(VoiceReference {
            transcript,
            embedding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::EmbeddingFormat;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_prefers_cached_codes() {
        let temp = tempdir().unwrap();
        let wav = temp.path().join("greta.wav");
        let txt = temp.path().join("greta.txt");
        let codes = temp.path().join("greta.npy");
        std::fs::write(&txt, "  Guten Morgen.\n").unwrap();

        let asset = VoiceAsset::new(wav, txt, Some(codes.clone()));
        let reference = FileReferenceLoader::new().load_reference(&asset).await.unwrap();

        assert_eq!(reference.transcript, "Guten Morgen.");
        assert_eq!(
            reference.embedding,
            ReferenceEmbedding::Codes {
                path: codes,
                format: Some(EmbeddingFormat::Npy),
            }
        );
    }

    #[tokio::test]
    async fn test_falls_back_to_reference_audio() {
        let temp = tempdir().unwrap();
        let wav = temp.path().join("greta.wav");
        let txt = temp.path().join("greta.txt");
        std::fs::write(&txt, "Hallo").unwrap();

        let asset = VoiceAsset::new(wav.clone(), txt, None);
        let reference = FileReferenceLoader::new().load_reference(&asset).await.unwrap();

        assert_eq!(reference.embedding, ReferenceEmbedding::Audio { wav_path: wav });
    }

    #[tokio::test]
    async fn test_missing_transcript_is_error() {
        let temp = tempdir().unwrap();
        let asset = VoiceAsset::new(
            temp.path().join("a.wav"),
            temp.path().join("a.txt"),
            None,
        );
        let err = FileReferenceLoader::new().load_reference(&asset).await.unwrap_err();
        assert!(matches!(err, ReferenceError::TranscriptUnreadable { .. }));
    }
}
