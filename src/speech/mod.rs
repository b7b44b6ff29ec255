//! Speech synthesis
//!
//! This module provides:
//! - Voice settings and playback lifecycle signals
//! - The synthesizer contract plus a headless hum voice
//! - Local VITS synthesis via sherpa-rs (with the `vits-tts` feature)

pub mod synthesizer;
#[cfg(feature = "vits-tts")]
pub mod vits;
pub mod voice;

pub use synthesizer::{clean_text_for_speech, HumSynthesizer, SpeechSynthesizer};
#[cfg(feature = "vits-tts")]
pub use vits::{VitsConfig, VitsSynthesizer};
pub use voice::{SpeechErrorKind, SpeechEvent, VoiceConfig};
