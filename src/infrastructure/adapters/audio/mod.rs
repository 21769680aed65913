//! Audio Adapter - WAV 编解码与 ffmpeg 导出

mod ffmpeg_exporter;
pub mod wav_codec;

pub use ffmpeg_exporter::{FfmpegExporter, FfmpegExporterConfig};
