//! Audio side of lip sync
//!
//! This module provides:
//! - Encoded clips and WAV decoding
//! - Live frequency analysis of played audio
//! - Text-driven synthetic envelopes
//! - Device playback (with the `audio-io` feature)

pub mod analyzer;
pub mod buffer;
pub mod clip;
pub mod envelope;
#[cfg(feature = "audio-io")]
pub mod output;
pub mod resampler;
pub mod synthetic;
pub mod wav;

pub use analyzer::{AnalyzerConfig, LiveAnalyzer};
pub use buffer::AudioRingBuffer;
pub use clip::{AudioClip, AudioFormat};
pub use envelope::{AudioEnvelopeSample, SPECTRUM_BINS};
#[cfg(feature = "audio-io")]
pub use output::CpalPlaybackSink;
pub use resampler::{resample_to, MonoResampler};
pub use synthetic::{estimate_duration, EnvelopeConfig, SyntheticEnvelope};
pub use wav::{decode_wav, encode_wav, read_wav, write_wav, PcmAudio};
