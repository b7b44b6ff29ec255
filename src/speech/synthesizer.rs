use super::voice::VoiceConfig;
use crate::audio::synthetic::{EnvelopeConfig, SyntheticEnvelope};
use crate::audio::wav::encode_wav;
use crate::audio::AudioClip;
use crate::Result;
use async_trait::async_trait;
use std::f32::consts::PI;
use std::time::Duration;
use tracing::debug;

/// Text in, playable audio out
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<AudioClip>;
}

/// Normalize text before synthesis: expand symbols and common abbreviations,
/// drop markdown and emoji, collapse whitespace.
pub fn clean_text_for_speech(text: &str) -> String {
    let mut result = text.to_string();

    let abbreviations = [
        ("Mr.", "Mister"),
        ("Mrs.", "Misses"),
        ("Ms.", "Miss"),
        ("Dr.", "Doctor"),
        ("vs.", "versus"),
        ("etc.", "etcetera"),
        ("e.g.", "for example"),
        ("i.e.", "that is"),
    ];
    for (abbrev, expansion) in abbreviations {
        result = result.replace(abbrev, expansion);
    }

    result = result.replace('&', " and ");
    result = result.replace('%', " percent");
    result = result.replace('@', " at ");
    result = result.replace('+', " plus ");
    result = result.replace('=', " equals ");

    let cleaned: String = result
        .chars()
        .filter(|c| !matches!(c, '*' | '_' | '`' | '#' | '~' | '<' | '>' | '|' | '[' | ']' | '{' | '}'))
        .filter(|c| c.is_ascii() || c.is_alphabetic() || c.is_whitespace())
        .collect();

    let mut out = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    // Punctuation glued to spaces reads as a pause in most engines
    for (from, to) in [(" ,", ","), (" .", "."), (" !", "!"), (" ?", "?")] {
        out = out.replace(from, to);
    }
    out
}

/// Headless stand-in for a real voice: a low hum whose loudness follows the
/// synthetic speech envelope for the text, encoded as 16-bit WAV.
#[derive(Debug, Clone)]
pub struct HumSynthesizer {
    sample_rate: u32,
    frequency_hz: f32,
    envelope: EnvelopeConfig,
}

impl Default for HumSynthesizer {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            frequency_hz: 180.0,
            envelope: EnvelopeConfig::default(),
        }
    }
}

impl HumSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }

    pub fn with_envelope(mut self, envelope: EnvelopeConfig) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn render(&self, text: &str, voice: &VoiceConfig) -> Result<AudioClip> {
        let voice = voice.clamped();
        let envelope_config = self
            .envelope
            .clone()
            .with_words_per_minute(self.envelope.words_per_minute * voice.rate);
        let envelope = SyntheticEnvelope::from_text(text, &envelope_config);
        let total = (envelope.duration().as_secs_f64() * self.sample_rate as f64) as usize;
        let frequency = self.frequency_hz * voice.pitch.max(0.1);

        let samples: Vec<f32> = (0..total)
            .map(|i| {
                let t = i as f32 / self.sample_rate as f32;
                let gain = envelope.volume_at(Duration::from_secs_f32(t)) * voice.volume;
                (2.0 * PI * frequency * t).sin() * gain
            })
            .collect();

        debug!("Rendered {} hum samples for {:?}", samples.len(), text);
        Ok(AudioClip::new(encode_wav(&samples, self.sample_rate)?))
    }
}

#[async_trait]
impl SpeechSynthesizer for HumSynthesizer {
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<AudioClip> {
        let cleaned = clean_text_for_speech(text);
        let this = self.clone();
        let voice = voice.clone();
        tokio::task::spawn_blocking(move || this.render(&cleaned, &voice))
            .await
            .map_err(|e| crate::MouthpieceError::SpeechError(format!("Synthesis task failed: {}", e)))?
    }
}
