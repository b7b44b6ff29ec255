//! Audio sinks as seen by the lifecycle controller.

use crate::audio::{AudioClip, AudioRingBuffer, PcmAudio};
use crate::speech::{SpeechErrorKind, SpeechEvent};
use crate::{MouthpieceError, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone)]
enum ClockSource {
    Wall(Instant),
    Frames { played: Arc<AtomicU64>, sample_rate: u32 },
    Manual(Arc<AtomicU64>),
}

/// Playback position of the active utterance, readable from the render loop
#[derive(Debug, Clone)]
pub struct PlaybackClock(ClockSource);

impl PlaybackClock {
    /// Wall clock starting now
    pub fn started_now() -> Self {
        Self(ClockSource::Wall(Instant::now()))
    }

    /// Position derived from frames handed to an output device
    pub fn from_frames(played: Arc<AtomicU64>, sample_rate: u32) -> Self {
        Self(ClockSource::Frames {
            played,
            sample_rate: sample_rate.max(1),
        })
    }

    /// Externally driven position in microseconds, for replay and tests
    pub fn manual(position_us: Arc<AtomicU64>) -> Self {
        Self(ClockSource::Manual(position_us))
    }

    pub fn position(&self) -> Duration {
        match &self.0 {
            ClockSource::Wall(start) => start.elapsed(),
            ClockSource::Frames { played, sample_rate } => {
                Duration::from_secs_f64(played.load(Ordering::Relaxed) as f64 / *sample_rate as f64)
            }
            ClockSource::Manual(us) => Duration::from_micros(us.load(Ordering::Relaxed)),
        }
    }
}

/// Handle to one started playback
#[derive(Debug)]
pub struct PlaybackSession {
    pub clock: PlaybackClock,
    pub events: UnboundedReceiver<SpeechEvent>,
    /// Samples actually sent to the device, when the sink taps them
    pub tap: Option<AudioRingBuffer>,
    /// Decoded audio, when the sink decoded it
    pub pcm: Option<Arc<PcmAudio>>,
}

/// Something that can play an encoded clip and report when it is done
pub trait PlaybackSink: Send + Sync {
    /// Start playing. Replaces anything still playing.
    fn play(&self, clip: &AudioClip) -> Result<PlaybackSession>;

    /// Stop immediately; the session reports `Error(Interrupted)`
    fn halt(&self);
}

struct ActivePlayback {
    timer: JoinHandle<()>,
    events: UnboundedSender<SpeechEvent>,
}

/// Headless sink: decodes the WAV for its duration and reports `Ended` once
/// that much wall time has passed. No audio is produced.
#[derive(Default)]
pub struct ClockPlaybackSink {
    active: Mutex<Option<ActivePlayback>>,
}

impl ClockPlaybackSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackSink for ClockPlaybackSink {
    fn play(&self, clip: &AudioClip) -> Result<PlaybackSession> {
        let pcm = clip
            .decode()
            .map_err(|e| MouthpieceError::PlaybackError(format!("Cannot play clip: {}", e)))?;
        let pcm = Arc::new(pcm);
        let duration = Duration::from_secs_f64(pcm.duration_secs());
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| MouthpieceError::PlaybackError(format!("No async runtime: {}", e)))?;

        self.halt();

        let (events, rx) = unbounded_channel();
        let _ = events.send(SpeechEvent::Started);
        let done = events.clone();
        let timer = runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = done.send(SpeechEvent::Ended);
        });
        debug!("Clock playback started for {:?}", duration);

        *self.active.lock() = Some(ActivePlayback { timer, events });

        Ok(PlaybackSession {
            clock: PlaybackClock::started_now(),
            events: rx,
            tap: None,
            pcm: Some(pcm),
        })
    }

    fn halt(&self) {
        if let Some(active) = self.active.lock().take() {
            if !active.timer.is_finished() {
                active.timer.abort();
                let _ = active.events.send(SpeechEvent::Error(SpeechErrorKind::Interrupted));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::wav::encode_wav;

    fn clip(secs: f32) -> AudioClip {
        let samples = vec![0.1; (16000.0 * secs) as usize];
        AudioClip::new(encode_wav(&samples, 16000).unwrap())
    }

    #[test]
    fn test_manual_and_frame_clocks() {
        let us = Arc::new(AtomicU64::new(0));
        let clock = PlaybackClock::manual(us.clone());
        us.store(350_000, Ordering::Relaxed);
        assert_eq!(clock.position(), Duration::from_millis(350));

        let frames = Arc::new(AtomicU64::new(8000));
        assert_eq!(PlaybackClock::from_frames(frames, 16000).position(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_clock_sink_ends_after_duration() {
        let sink = ClockPlaybackSink::new();
        let mut session = sink.play(&clip(0.05)).unwrap();
        assert_eq!(session.events.recv().await, Some(SpeechEvent::Started));
        assert_eq!(session.events.recv().await, Some(SpeechEvent::Ended));
        assert!(session.pcm.is_some());
    }

    #[tokio::test]
    async fn test_halt_interrupts() {
        let sink = ClockPlaybackSink::new();
        let mut session = sink.play(&clip(5.0)).unwrap();
        assert_eq!(session.events.recv().await, Some(SpeechEvent::Started));
        sink.halt();
        assert_eq!(
            session.events.recv().await,
            Some(SpeechEvent::Error(SpeechErrorKind::Interrupted))
        );
    }

    #[tokio::test]
    async fn test_undecodable_clip_fails() {
        let sink = ClockPlaybackSink::new();
        assert!(sink.play(&AudioClip::new(b"ID3\x04\x00 not really".to_vec())).is_err());
    }
}
