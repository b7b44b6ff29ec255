//! Text-driven envelope for speech without analyzable audio.
//!
//! Each estimated word contributes a rise / plateau / decay / pause
//! sub-envelope; the concatenation is then multiplied by [`speech_shape`]
//! over the estimated utterance duration.

use super::envelope::{speech_shape, speech_spectrum, AudioEnvelopeSample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Assumed speaking rate for duration estimates
    pub words_per_minute: f32,

    /// Animation frame cadence the envelope is sampled at
    pub frame_interval_ms: u64,

    /// Frames of rapid rise at the start of each word
    pub rise_frames: usize,

    /// Frames of jittered plateau
    pub plateau_frames: usize,

    /// Frames of decay at the end of each word
    pub decay_frames: usize,

    /// Near-silent frames between words
    pub pause_frames: usize,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 150.0,
            frame_interval_ms: 16,
            rise_frames: 10,
            plateau_frames: 15,
            decay_frames: 12,
            pause_frames: 8,
        }
    }
}

impl EnvelopeConfig {
    pub fn with_words_per_minute(mut self, wpm: f32) -> Self {
        self.words_per_minute = wpm;
        self
    }

    pub fn with_frame_interval(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.words_per_minute > 0.0) {
            return Err("words_per_minute must be positive".to_string());
        }
        if self.frame_interval_ms == 0 {
            return Err("frame_interval_ms must be positive".to_string());
        }
        if self.rise_frames + self.plateau_frames + self.decay_frames + self.pause_frames == 0 {
            return Err("word envelope must span at least one frame".to_string());
        }
        Ok(())
    }

    pub fn frames_per_word(&self) -> usize {
        self.rise_frames + self.plateau_frames + self.decay_frames + self.pause_frames
    }
}

/// Whitespace-separated word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Speaking time for `text` at `words_per_minute`
pub fn estimate_duration(text: &str, words_per_minute: f32) -> Duration {
    if !(words_per_minute > 0.0) {
        return Duration::ZERO;
    }
    let secs = word_count(text) as f64 * 60.0 / words_per_minute as f64;
    Duration::from_secs_f64(secs)
}

/// Pre-rendered synthetic envelope for one utterance
#[derive(Debug, Clone)]
pub struct SyntheticEnvelope {
    pattern: Vec<f32>,
    duration_ms: u64,
    frame_interval_ms: u64,
    rng: StdRng,
}

impl SyntheticEnvelope {
    pub fn from_text(text: &str, config: &EnvelopeConfig) -> Self {
        Self::from_text_with_rng(text, config, StdRng::from_entropy())
    }

    /// Deterministic variant for a given jitter source
    pub fn from_text_with_rng(text: &str, config: &EnvelopeConfig, mut rng: StdRng) -> Self {
        let words = word_count(text);
        let duration_ms = estimate_duration(text, config.words_per_minute).as_millis() as u64;
        let mut pattern = Vec::with_capacity(words * config.frames_per_word());
        for _ in 0..words {
            push_word(&mut pattern, config, &mut rng);
        }
        Self {
            pattern,
            duration_ms,
            frame_interval_ms: config.frame_interval_ms.max(1),
            rng,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed.as_millis() as u64 >= self.duration_ms
    }

    /// Loudness at `elapsed`; 0 outside the utterance
    pub fn volume_at(&self, elapsed: Duration) -> f32 {
        let elapsed_ms = elapsed.as_millis() as u64;
        if self.pattern.is_empty() || elapsed_ms >= self.duration_ms {
            return 0.0;
        }
        let frame = (elapsed_ms / self.frame_interval_ms) as usize % self.pattern.len();
        let progress = elapsed_ms as f32 / self.duration_ms as f32;
        (self.pattern[frame] * speech_shape(progress)).clamp(0.0, 1.0)
    }

    /// Full sample with a speech-like spectrum for the current loudness
    pub fn sample_at(&mut self, elapsed: Duration) -> AudioEnvelopeSample {
        let volume = self.volume_at(elapsed);
        AudioEnvelopeSample {
            volume,
            frequency_bins: speech_spectrum(volume, &mut self.rng),
            timestamp_ms: elapsed.as_millis() as u64,
        }
    }
}

fn push_word(pattern: &mut Vec<f32>, config: &EnvelopeConfig, rng: &mut StdRng) {
    let rise = config.rise_frames.max(1) as f32;
    for i in 0..config.rise_frames {
        pattern.push(0.1 + (i as f32 / rise) * 0.6);
    }
    for _ in 0..config.plateau_frames {
        pattern.push(0.7 + rng.gen::<f32>() * 0.2);
    }
    let decay = config.decay_frames.max(1) as f32;
    for i in 0..config.decay_frames {
        pattern.push(0.7 * (1.0 - i as f32 / decay) + rng.gen::<f32>() * 0.1);
    }
    for _ in 0..config.pause_frames {
        pattern.push(0.05 + rng.gen::<f32>() * 0.05);
    }
}
