//! Voice settings and the playback lifecycle signals a synthesizer emits.

use serde::{Deserialize, Serialize};

/// Voice parameters forwarded to the speech synthesizer.
///
/// The first group mirrors a hosted TTS vendor's voice settings, the second
/// is what a local/platform engine understands. Each engine reads the part
/// it supports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub voice_id: String,
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,

    pub language: String,
    /// Speaking rate multiplier, 0.1..=10
    pub rate: f32,
    /// Pitch multiplier, 0..=2
    pub pitch: f32,
    /// Output gain, 0..=1
    pub volume: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice_id: "RmcV9cAq1TByxNSgbii7".to_string(),
            model_id: "eleven_flash_v2_5".to_string(),
            stability: 0.5,
            similarity_boost: 0.8,
            style: 0.2,
            use_speaker_boost: true,
            language: "en-US".to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 0.8,
        }
    }
}

impl VoiceConfig {
    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Copy with rate, pitch, volume and the vendor sliders forced into range
    pub fn clamped(&self) -> Self {
        Self {
            rate: clamp_or(self.rate, 0.1, 10.0, 1.0),
            pitch: clamp_or(self.pitch, 0.0, 2.0, 1.0),
            volume: clamp_or(self.volume, 0.0, 1.0, 0.8),
            stability: clamp_or(self.stability, 0.0, 1.0, 0.5),
            similarity_boost: clamp_or(self.similarity_boost, 0.0, 1.0, 0.8),
            style: clamp_or(self.style, 0.0, 1.0, 0.2),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.voice_id.trim().is_empty() {
            return Err("voice_id must not be empty".to_string());
        }
        for (name, value) in [
            ("stability", self.stability),
            ("similarity_boost", self.similarity_boost),
            ("style", self.style),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be in [0, 1], got {}", name, value));
            }
        }
        Ok(())
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechErrorKind {
    /// Playback was stopped to make room for something else
    Interrupted,
    /// The output device went away or refused the stream
    Device,
    /// The audio could not be decoded
    Decode,
    Other,
}

impl SpeechErrorKind {
    /// Interruption is how engines report a deliberate stop, not a failure
    pub fn is_benign(self) -> bool {
        self == SpeechErrorKind::Interrupted
    }
}

/// Lifecycle signals of one playing utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    Ended,
    Error(SpeechErrorKind),
}

impl SpeechEvent {
    /// True once the utterance is over, for whatever reason
    pub fn is_terminal(self) -> bool {
        !matches!(self, SpeechEvent::Started)
    }
}
