//! FFmpeg Exporter - 音频导出实现
//!
//! - wav: 进程内编码为 16 位 PCM WAV
//! - pcm: 裸 f32 小端采样
//! - mp3 / opus / aac / flac: 写临时 WAV 后调用 ffmpeg 转码
//!
//! 每次导出使用独立的临时目录，函数返回时自动删除

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;

use super::wav_codec::{encode_raw_f32, encode_wav};
use crate::application::ports::{AudioExporterPort, ExportError};
use crate::domain::speech::{AudioFormat, Waveform};

/// FFmpeg 导出器配置
#[derive(Debug, Clone)]
pub struct FfmpegExporterConfig {
    /// ffmpeg 可执行文件路径
    pub ffmpeg_path: PathBuf,
    /// libmp3lame VBR 质量 (0 最好 - 9 最差)
    pub mp3_quality: u8,
    /// Opus 比特率（bps）
    pub opus_bitrate: u32,
}

impl Default for FfmpegExporterConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            mp3_quality: 4,
            opus_bitrate: 32000, // 32kbps，语音足够
        }
    }
}

/// FFmpeg 导出器
pub struct FfmpegExporter {
    config: FfmpegExporterConfig,
}

impl FfmpegExporter {
    pub fn new(config: FfmpegExporterConfig) -> Self {
        Self { config }
    }

    /// 目标格式对应的 ffmpeg 编码参数
    fn codec_args(&self, format: AudioFormat) -> Vec<String> {
        match format {
            AudioFormat::Mp3 => vec![
                "-codec:a".into(),
                "libmp3lame".into(),
                "-q:a".into(),
                self.config.mp3_quality.to_string(),
            ],
            AudioFormat::Opus => vec![
                "-codec:a".into(),
                "libopus".into(),
                "-b:a".into(),
                self.config.opus_bitrate.to_string(),
                "-f".into(),
                "ogg".into(),
            ],
            AudioFormat::Aac => vec![
                "-codec:a".into(),
                "aac".into(),
                "-f".into(),
                "adts".into(),
            ],
            AudioFormat::Flac => vec!["-codec:a".into(), "flac".into()],
            AudioFormat::Wav | AudioFormat::Pcm => Vec::new(),
        }
    }

    async fn transcode(&self, waveform: &Waveform, format: AudioFormat) -> Result<Vec<u8>, ExportError> {
        let work_dir = tempfile::Builder::new().prefix("neuvox-export-").tempdir()?;
        let input = work_dir.path().join("speech.wav");
        let output = work_dir.path().join(format!("speech.{}", format.extension()));

        fs::write(&input, encode_wav(waveform)).await?;
        self.run_ffmpeg(&input, &output, format).await?;

        if !fs::try_exists(&output).await.unwrap_or(false) {
            return Err(ExportError::MissingOutput(
                output.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default(),
            ));
        }

        let data = fs::read(&output).await?;
        tracing::debug!(
            format = %format,
            input_samples = waveform.samples().len(),
            output_size = data.len(),
            "Transcoded with ffmpeg"
        );
        Ok(data)
    }

    async fn run_ffmpeg(&self, input: &Path, output: &Path, format: AudioFormat) -> Result<(), ExportError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(input)
            .args(self.codec_args(format))
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                ExportError::TranscoderFailed(format!(
                    "failed to run {}: {}",
                    self.config.ffmpeg_path.display(),
                    e
                ))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            tracing::warn!(
                format = %format,
                code = ?result.status.code(),
                stderr = %stderr,
                "ffmpeg exited with failure"
            );
            return Err(ExportError::TranscoderFailed(format!(
                "ffmpeg exited with {:?}: {}",
                result.status.code(),
                stderr
            )));
        }

        Ok(())
    }
}

impl Default for FfmpegExporter {
    fn default() -> Self {
        Self::new(FfmpegExporterConfig::default())
    }
}

#[async_trait]
impl AudioExporterPort for FfmpegExporter {
    async fn export(
        &self,
        waveform: &Waveform,
        format: AudioFormat,
    ) -> Result<Vec<u8>, ExportError> {
        if waveform.sample_rate() == 0 {
            return Err(ExportError::InvalidInput("sample rate is 0".to_string()));
        }

        if format.needs_transcoder() {
            return self.transcode(waveform, format).await;
        }

        match format {
            AudioFormat::Pcm => Ok(encode_raw_f32(waveform)),
            _ => Ok(encode_wav(waveform)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::ENGINE_SAMPLE_RATE;

    fn silence() -> Waveform {
        Waveform::new(vec![0.0; 480], ENGINE_SAMPLE_RATE)
    }

    #[tokio::test]
    async fn test_wav_bypasses_ffmpeg() {
        let exporter = FfmpegExporter::new(FfmpegExporterConfig {
            ffmpeg_path: PathBuf::from("/nonexistent/ffmpeg"),
            ..Default::default()
        });
        let data = exporter.export(&silence(), AudioFormat::Wav).await.unwrap();
        assert_eq!(&data[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_pcm_is_raw_f32() {
        let data = FfmpegExporter::default()
            .export(&silence(), AudioFormat::Pcm)
            .await
            .unwrap();
        assert_eq!(data.len(), 480 * 4);
    }

    #[tokio::test]
    async fn test_missing_ffmpeg_is_export_error() {
        let exporter = FfmpegExporter::new(FfmpegExporterConfig {
            ffmpeg_path: PathBuf::from("/nonexistent/ffmpeg"),
            ..Default::default()
        });
        let err = exporter.export(&silence(), AudioFormat::Mp3).await.unwrap_err();
        assert!(matches!(err, ExportError::TranscoderFailed(_)));
    }

    #[tokio::test]
    async fn test_zero_sample_rate_rejected() {
        let err = FfmpegExporter::default()
            .export(&Waveform::new(vec![0.0], 0), AudioFormat::Wav)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidInput(_)));
    }

    #[test]
    fn test_codec_args() {
        let exporter = FfmpegExporter::default();
        assert_eq!(
            exporter.codec_args(AudioFormat::Mp3),
            vec!["-codec:a", "libmp3lame", "-q:a", "4"]
        );
        assert!(exporter.codec_args(AudioFormat::Opus).contains(&"ogg".to_string()));
        assert!(exporter.codec_args(AudioFormat::Wav).is_empty());
    }
}
