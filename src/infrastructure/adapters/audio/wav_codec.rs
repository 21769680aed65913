//! WAV Codec - 基于 symphonia 的 WAV 解码与 PCM 编码
//!
//! 支持：
//! - WAV（任意 PCM / float 子格式）→ 单声道 f32 波形
//! - 波形 → 16 位 PCM WAV
//! - 波形 ↔ 裸 f32 小端字节流

use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use crate::domain::speech::Waveform;

#[derive(Debug, Error)]
pub enum WavCodecError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

/// 判断字节流是否为 RIFF/WAVE
pub fn is_wav(data: &[u8]) -> bool {
    data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE"
}

/// 使用 symphonia 解码 WAV，多声道按帧平均混为单声道
pub fn decode_wav(data: &[u8]) -> Result<Waveform, WavCodecError> {
    if !is_wav(data) {
        return Err(WavCodecError::InvalidInput(
            "missing RIFF/WAVE header".to_string(),
        ));
    }

    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("wav");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| WavCodecError::DecodingError(format!("Probe failed: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| WavCodecError::DecodingError("No audio track found".to_string()))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| WavCodecError::DecodingError("Unknown sample rate".to_string()))?;

    let channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .ok_or_else(|| WavCodecError::DecodingError("Unknown channel count".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| WavCodecError::DecodingError(format!("Decoder creation failed: {}", e)))?;

    let track_id = track.id;
    let mut interleaved: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(WavCodecError::DecodingError(format!(
                    "Packet read error: {}",
                    e
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Decode error (skipping packet): {}", e);
                continue;
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        let actual_samples = num_frames * spec.channels.count();
        interleaved.extend(&sample_buf.samples()[..actual_samples]);
    }

    let samples = if channels > 1 {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    } else {
        interleaved
    };

    Ok(Waveform::new(samples, sample_rate))
}

/// 将波形编码为 16 位 PCM 单声道 WAV
pub fn encode_wav(waveform: &Waveform) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let num_channels: u16 = 1;
    let sample_rate = waveform.sample_rate();
    let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
    let block_align = num_channels * (bits_per_sample / 8);

    let data_size = waveform.samples().len() * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(file_size as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&num_channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());

    for &s in waveform.samples() {
        let clamped = s.clamp(-1.0, 1.0);
        wav.extend_from_slice(&((clamped * 32767.0) as i16).to_le_bytes());
    }

    wav
}

/// 裸 f32 小端字节流，无文件头
pub fn encode_raw_f32(waveform: &Waveform) -> Vec<u8> {
    waveform
        .samples()
        .iter()
        .flat_map(|s| s.to_le_bytes())
        .collect()
}

/// 解析裸 f32 小端字节流
pub fn decode_raw_f32(data: &[u8], sample_rate: u32) -> Result<Waveform, WavCodecError> {
    if data.len() % 4 != 0 {
        return Err(WavCodecError::InvalidInput(format!(
            "raw f32 stream length {} is not a multiple of 4",
            data.len()
        )));
    }
    let samples = data
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    Ok(Waveform::new(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::ENGINE_SAMPLE_RATE;

    fn tone(len: usize) -> Waveform {
        let samples = (0..len)
            .map(|i| (i as f32 * 0.05).sin() * 0.5)
            .collect();
        Waveform::new(samples, ENGINE_SAMPLE_RATE)
    }

    #[test]
    fn test_encode_wav_header() {
        let wav = encode_wav(&tone(100));

        assert!(is_wav(&wav));
        assert_eq!(wav.len(), 44 + 200);
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 24_000);
        assert_eq!(&wav[36..40], b"data");
    }

    #[test]
    fn test_decode_encoded_wav() {
        let original = tone(2400);
        let decoded = decode_wav(&encode_wav(&original)).unwrap();

        assert_eq!(decoded.sample_rate(), ENGINE_SAMPLE_RATE);
        assert_eq!(decoded.samples().len(), 2400);
        // 16 位量化误差
        for (a, b) in original.samples().iter().zip(decoded.samples()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_decode_rejects_non_wav() {
        assert!(matches!(
            decode_wav(b"not a wav file at all"),
            Err(WavCodecError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_raw_f32_layout() {
        let wave = Waveform::new(vec![0.25, -1.0], ENGINE_SAMPLE_RATE);
        let raw = encode_raw_f32(&wave);
        assert_eq!(raw.len(), 8);
        assert_eq!(&raw[0..4], &0.25f32.to_le_bytes());
        assert_eq!(decode_raw_f32(&raw, ENGINE_SAMPLE_RATE).unwrap(), wave);
    }

    #[test]
    fn test_raw_f32_rejects_truncated_stream() {
        assert!(decode_raw_f32(&[0, 0, 0], ENGINE_SAMPLE_RATE).is_err());
    }
}
