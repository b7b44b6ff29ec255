//! Frequency-domain loudness from real audio.
//!
//! Mirrors a browser analyser node: Hann-windowed FFT, magnitudes smoothed
//! over time, mapped from a decibel range into [0,1] per bin.

use super::buffer::AudioRingBuffer;
use super::envelope::{rms_volume, AudioEnvelopeSample};
use super::wav::PcmAudio;
use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f32::consts::PI;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// FFT length in samples; yields `fft_size / 2` bins
    pub fft_size: usize,

    /// Weight of the previous frame's magnitude in [0,1)
    pub smoothing: f32,

    /// Magnitude mapped to 0
    pub min_db: f32,

    /// Magnitude mapped to 1
    pub max_db: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 256,
            smoothing: 0.8,
            min_db: -90.0,
            max_db: -10.0,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.fft_size < 32 || !self.fft_size.is_power_of_two() {
            return Err(format!("fft_size must be a power of two >= 32, got {}", self.fft_size));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err("smoothing must be in [0, 1)".to_string());
        }
        if self.min_db >= self.max_db {
            return Err("min_db must be below max_db".to_string());
        }
        Ok(())
    }
}

pub struct LiveAnalyzer {
    config: AnalyzerConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex32>,
    smoothed: Vec<f32>,
    history: VecDeque<f32>,
}

impl LiveAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let size = config.fft_size.max(2);
        let fft = FftPlanner::<f32>::new().plan_fft_forward(size);
        let window = (0..size)
            .map(|n| 0.5 - 0.5 * ((2.0 * PI * n as f32) / (size - 1) as f32).cos())
            .collect();
        Self {
            fft,
            window,
            scratch: vec![Complex32::new(0.0, 0.0); size],
            smoothed: vec![0.0; size / 2],
            history: VecDeque::from(vec![0.0; size]),
            config,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.smoothed.len()
    }

    /// Forget smoothing state, e.g. between utterances
    pub fn reset(&mut self) {
        self.smoothed.iter_mut().for_each(|m| *m = 0.0);
        self.history.iter_mut().for_each(|s| *s = 0.0);
    }

    /// Analyze the most recent `fft_size` samples; shorter input is zero padded
    pub fn analyze(&mut self, samples: &[f32], timestamp_ms: u64) -> AudioEnvelopeSample {
        let size = self.window.len();
        let tail = &samples[samples.len().saturating_sub(size)..];
        let pad = size - tail.len();

        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let x = if i < pad { 0.0 } else { tail[i - pad] };
            *slot = Complex32::new(x * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);

        let tau = self.config.smoothing;
        let range = self.config.max_db - self.config.min_db;
        let mut bins = Vec::with_capacity(self.smoothed.len());
        for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.scratch[k].norm() / size as f32;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
            let db = 20.0 * smoothed.max(f32::MIN_POSITIVE).log10();
            bins.push(((db - self.config.min_db) / range).clamp(0.0, 1.0));
        }

        AudioEnvelopeSample {
            volume: rms_volume(&bins, 1.0),
            frequency_bins: bins,
            timestamp_ms,
        }
    }

    /// Drain newly played samples from a playback tap and analyze the latest window
    pub fn analyze_tap(&mut self, tap: &AudioRingBuffer, timestamp_ms: u64) -> AudioEnvelopeSample {
        let size = self.window.len();
        for sample in tap.drain() {
            if self.history.len() == size {
                self.history.pop_front();
            }
            self.history.push_back(sample);
        }
        let window: Vec<f32> = self.history.iter().copied().collect();
        self.analyze(&window, timestamp_ms)
    }

    /// Analyze the window of a decoded clip ending at the playback position
    pub fn analyze_clip(&mut self, pcm: &PcmAudio, position: Duration) -> AudioEnvelopeSample {
        let timestamp_ms = position.as_millis() as u64;
        let end = pcm.index_at(position.as_secs_f64());
        if end == 0 || end > pcm.samples.len() {
            return self.analyze(&[], timestamp_ms);
        }
        self.analyze(&pcm.samples[..end], timestamp_ms)
    }
}

impl std::fmt::Debug for LiveAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveAnalyzer").field("config", &self.config).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(amplitude: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * 1000.0 * i as f32 / 16000.0).sin() * amplitude)
            .collect()
    }

    fn settle(analyzer: &mut LiveAnalyzer, samples: &[f32]) -> AudioEnvelopeSample {
        let mut last = analyzer.analyze(samples, 0);
        for _ in 0..60 {
            last = analyzer.analyze(samples, 0);
        }
        last
    }

    #[test]
    fn test_silence_is_zero() {
        let mut analyzer = LiveAnalyzer::new(AnalyzerConfig::default());
        let sample = analyzer.analyze(&[0.0; 256], 0);
        assert_eq!(sample.volume, 0.0);
        assert_eq!(sample.frequency_bins.len(), 128);
        assert_eq!(analyzer.analyze(&[], 16).volume, 0.0);
    }

    #[test]
    fn test_louder_signal_reads_louder() {
        let mut quiet = LiveAnalyzer::new(AnalyzerConfig::default());
        let mut loud = LiveAnalyzer::new(AnalyzerConfig::default());
        let q = settle(&mut quiet, &tone(0.01, 256));
        let l = settle(&mut loud, &tone(0.8, 256));
        assert!(l.volume > q.volume);
        assert!(l.volume > 0.0 && l.volume <= 1.0);
        // 1 kHz at 16 kHz sample rate lands in bin 16
        let peak = l
            .frequency_bins
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!((15..=17).contains(&peak));
    }

    #[test]
    fn test_smoothing_decays_after_signal_stops() {
        let mut analyzer = LiveAnalyzer::new(AnalyzerConfig::default());
        let voiced = settle(&mut analyzer, &tone(0.8, 256));
        let after = analyzer.analyze(&[0.0; 256], 0);
        assert!(after.volume > 0.0);
        assert!(after.volume < voiced.volume);
    }

    #[test]
    fn test_tap_and_clip_sources() {
        let mut analyzer = LiveAnalyzer::new(AnalyzerConfig::default());
        let tap = AudioRingBuffer::new(4096);
        tap.push(&tone(0.5, 1024));
        assert!(analyzer.analyze_tap(&tap, 0).volume > 0.0);
        assert!(tap.is_empty());

        analyzer.reset();
        let pcm = PcmAudio::new(tone(0.5, 16000), 16000);
        assert!(analyzer.analyze_clip(&pcm, Duration::from_millis(500)).volume > 0.0);
        analyzer.reset();
        assert_eq!(analyzer.analyze_clip(&pcm, Duration::from_secs(2)).volume, 0.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(AnalyzerConfig::default().validate().is_ok());
        let bad = AnalyzerConfig {
            fft_size: 100,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
