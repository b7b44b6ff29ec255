//! Frame and pipeline timing

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Sliding window of durations
#[derive(Debug, Clone)]
pub struct TimingTracker {
    samples: VecDeque<Duration>,
    max_samples: usize,
}

impl TimingTracker {
    pub fn new(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
        }
    }

    pub fn record(&mut self, duration: Duration) {
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(duration);
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().min().copied().unwrap_or(Duration::ZERO)
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().max().copied().unwrap_or(Duration::ZERO)
    }

    pub fn percentile_95(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted: Vec<_> = self.samples.iter().copied().collect();
        sorted.sort();
        let idx = (sorted.len() as f32 * 0.95) as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Render-side statistics: how long a frame's work took and how often frames arrive
#[derive(Debug, Clone)]
pub struct FrameTimer {
    work: TimingTracker,
    intervals: TimingTracker,
    last_frame: Option<Instant>,
    frames: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub average_work: Duration,
    pub p95_work: Duration,
    pub fps: f32,
}

impl FrameTimer {
    pub fn new(window: usize) -> Self {
        Self {
            work: TimingTracker::new(window),
            intervals: TimingTracker::new(window),
            last_frame: None,
            frames: 0,
        }
    }

    /// Mark the start of a frame; returns the instant to pass to [`FrameTimer::end_frame`]
    pub fn begin_frame(&mut self) -> Instant {
        let now = Instant::now();
        if let Some(last) = self.last_frame.replace(now) {
            self.intervals.record(now - last);
        }
        now
    }

    pub fn end_frame(&mut self, started: Instant) {
        self.work.record(started.elapsed());
        self.frames += 1;
    }

    pub fn stats(&self) -> FrameStats {
        let interval = self.intervals.average();
        FrameStats {
            frames: self.frames,
            average_work: self.work.average(),
            p95_work: self.work.percentile_95(),
            fps: if interval.is_zero() { 0.0 } else { 1.0 / interval.as_secs_f32() },
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(120)
    }
}

#[derive(Debug)]
pub struct Stopwatch {
    start: Instant,
    splits: Vec<(String, Duration)>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            splits: Vec::new(),
        }
    }

    /// Record the elapsed time under `label`
    pub fn split(&mut self, label: impl Into<String>) {
        self.splits.push((label.into(), self.start.elapsed()));
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn splits(&self) -> &[(String, Duration)] {
        &self.splits
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Stage latencies of one chat turn
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PipelineMetrics {
    pub responder_ms: Option<u64>,

    /// Synthesis plus cue extraction for all messages, which run concurrently
    pub speech_ms: Option<u64>,

    pub messages: usize,
}

impl PipelineMetrics {
    pub fn total_ms(&self) -> Option<u64> {
        match (self.responder_ms, self.speech_ms) {
            (Some(responder), Some(speech)) => Some(responder + speech),
            (Some(responder), None) => Some(responder),
            _ => None,
        }
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ms) = self.responder_ms {
            parts.push(format!("Responder: {}ms", ms));
        }
        if let Some(ms) = self.speech_ms {
            parts.push(format!("Speech: {}ms", ms));
        }
        if let Some(ms) = self.total_ms() {
            parts.push(format!("Total: {}ms", ms));
        }
        parts.push(format!("Messages: {}", self.messages));
        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_tracker() {
        let mut tracker = TimingTracker::new(10);
        for i in 1..=5 {
            tracker.record(Duration::from_millis(i * 10));
        }
        assert_eq!(tracker.count(), 5);
        assert_eq!(tracker.min(), Duration::from_millis(10));
        assert_eq!(tracker.max(), Duration::from_millis(50));
        assert_eq!(tracker.average(), Duration::from_millis(30));
        assert_eq!(tracker.percentile_95(), Duration::from_millis(50));
    }

    #[test]
    fn test_timing_tracker_window() {
        let mut tracker = TimingTracker::new(3);
        for i in 1..=5 {
            tracker.record(Duration::from_millis(i * 10));
        }
        // Only the last 3 samples remain
        assert_eq!(tracker.count(), 3);
        assert_eq!(tracker.min(), Duration::from_millis(30));
    }

    #[test]
    fn test_frame_timer() {
        let mut timer = FrameTimer::new(8);
        assert_eq!(timer.stats(), FrameStats::default());
        for _ in 0..3 {
            let started = timer.begin_frame();
            std::thread::sleep(Duration::from_millis(5));
            timer.end_frame(started);
        }
        let stats = timer.stats();
        assert_eq!(stats.frames, 3);
        assert!(stats.average_work >= Duration::from_millis(5));
        assert!(stats.fps > 0.0 && stats.fps < 200.0);
    }

    #[test]
    fn test_stopwatch() {
        let mut sw = Stopwatch::start();
        std::thread::sleep(Duration::from_millis(10));
        sw.split("responder");
        assert!(sw.elapsed() >= Duration::from_millis(10));
        assert_eq!(sw.splits()[0].0, "responder");
    }

    #[test]
    fn test_pipeline_metrics() {
        let metrics = PipelineMetrics {
            responder_ms: Some(300),
            speech_ms: Some(700),
            messages: 2,
        };
        assert_eq!(metrics.total_ms(), Some(1000));
        assert_eq!(metrics.summary(), "Responder: 300ms | Speech: 700ms | Total: 1000ms | Messages: 2");
        assert_eq!(PipelineMetrics::default().total_ms(), None);
    }
}
