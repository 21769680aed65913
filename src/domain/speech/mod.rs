//! Speech Context - 语音合成限界上下文
//!
//! 输出格式、波形以及请求参数校验

mod value_objects;

pub use value_objects::{
    validate_speed, AudioFormat, SpeechError, Waveform, ENGINE_SAMPLE_RATE, MAX_SPEED, MIN_SPEED,
};
