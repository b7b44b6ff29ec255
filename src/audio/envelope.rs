//! Volume and spectrum samples handed to the frame blender.

use rand::Rng;
use std::f32::consts::PI;

/// Number of frequency bins in every sample (half of a 256-point FFT)
pub const SPECTRUM_BINS: usize = 128;

/// One frame's worth of audio energy. Consumed immediately, never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEnvelopeSample {
    /// Overall loudness in [0,1]
    pub volume: f32,

    /// Per-bin magnitudes in [0,1]
    pub frequency_bins: Vec<f32>,

    /// Playback position the sample describes
    pub timestamp_ms: u64,
}

impl AudioEnvelopeSample {
    pub fn silent(timestamp_ms: u64) -> Self {
        Self {
            volume: 0.0,
            frequency_bins: vec![0.0; SPECTRUM_BINS],
            timestamp_ms,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.volume <= 0.0
    }
}

/// Root mean square of bin magnitudes, normalized by `max_magnitude`
pub fn rms_volume(bins: &[f32], max_magnitude: f32) -> f32 {
    if bins.is_empty() || max_magnitude <= 0.0 {
        return 0.0;
    }
    let mean_square = bins.iter().map(|b| b * b).sum::<f32>() / bins.len() as f32;
    (mean_square.sqrt() / max_magnitude).clamp(0.0, 1.0)
}

/// Global shaping over an utterance: linear buildup in the first 10%,
/// a gently oscillating plateau, linear decay over the last 10%.
pub fn speech_shape(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    if p < 0.1 {
        p / 0.1
    } else if p < 0.9 {
        0.8 + (p * PI * 4.0).sin() * 0.1
    } else {
        (1.0 - p) / 0.1
    }
}

/// Speech-like spectrum for a given loudness: strong low formants, a mid hump,
/// and a weak decaying top end.
pub fn speech_spectrum<R: Rng + ?Sized>(volume: f32, rng: &mut R) -> Vec<f32> {
    (0..SPECTRUM_BINS)
        .map(|i| {
            let position = i as f32 / SPECTRUM_BINS as f32;
            let amplitude = if position < 0.3 {
                volume * (0.8 + rng.gen::<f32>() * 0.4) * (1.0 - position)
            } else if position < 0.6 {
                volume * (0.4 + rng.gen::<f32>() * 0.3) * (position * PI).sin()
            } else {
                volume * (0.1 + rng.gen::<f32>() * 0.2) * (-position * 2.0).exp()
            };
            amplitude.clamp(0.0, 1.0)
        })
        .collect()
}
