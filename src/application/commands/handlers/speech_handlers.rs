//! Speech Command Handlers
//!
//! 解析音色 → 读取参考素材 → 推理 → 导出

use std::sync::Arc;
use std::time::Instant;

use crate::application::commands::{SynthesizeSpeech, SynthesizeSpeechResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioExporterPort, InferRequest, ReferenceLoaderPort, TtsEnginePort,
};
use crate::domain::speech::{validate_speed, SpeechError};
use crate::domain::voice::{VoiceId, VoiceRegistry};

/// SynthesizeSpeech Handler
pub struct SynthesizeSpeechHandler {
    voices: Arc<VoiceRegistry>,
    reference_loader: Arc<dyn ReferenceLoaderPort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    exporter: Arc<dyn AudioExporterPort>,
}

impl SynthesizeSpeechHandler {
    pub fn new(
        voices: Arc<VoiceRegistry>,
        reference_loader: Arc<dyn ReferenceLoaderPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        exporter: Arc<dyn AudioExporterPort>,
    ) -> Self {
        Self {
            voices,
            reference_loader,
            tts_engine,
            exporter,
        }
    }

    pub async fn handle(
        &self,
        command: SynthesizeSpeech,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        if command.input.trim().is_empty() {
            return Err(SpeechError::EmptyInput.into());
        }
        let speed = validate_speed(command.speed.unwrap_or(1.0))?;

        let voice_id = VoiceId::requested(command.voice.as_deref());
        let asset = self.voices.resolve(Some(voice_id.as_str()))?;
        let reference = self.reference_loader.load_reference(asset).await?;

        tracing::debug!(
            voice_id = %voice_id,
            text_len = command.input.len(),
            format = %command.format,
            reference = ?reference.embedding,
            "Synthesizing speech"
        );

        let started = Instant::now();
        let waveform = self
            .tts_engine
            .infer(InferRequest {
                text: command.input,
                reference: reference.embedding,
                reference_text: reference.transcript,
                speed,
                voice_id: voice_id.to_string(),
            })
            .await?;
        let latency = started.elapsed();

        let audio_data = self.exporter.export(&waveform, command.format).await?;

        tracing::info!(
            voice_id = %voice_id,
            format = %command.format,
            latency_ms = latency.as_millis() as u64,
            duration_ms = waveform.duration_ms(),
            size = audio_data.len(),
            "Speech synthesized"
        );

        Ok(SynthesizeSpeechResponse {
            audio_data,
            format: command.format,
            voice_id: voice_id.to_string(),
            latency,
            sample_rate: waveform.sample_rate(),
        })
    }
}
