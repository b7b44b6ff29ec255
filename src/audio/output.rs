//! Speaker playback through cpal.
//!
//! `cpal::Stream` is not `Send`, so each clip gets its own playback thread
//! that owns the stream until the clip ends or is halted.

use super::buffer::AudioRingBuffer;
use super::clip::AudioClip;
use super::resampler::resample_to;
use crate::lifecycle::{PlaybackClock, PlaybackSession, PlaybackSink};
use crate::speech::{SpeechErrorKind, SpeechEvent};
use crate::{MouthpieceError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, StreamConfig};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::{debug, error, info, warn};

/// Samples kept for the live analyzer, about a third of a second at 48 kHz
const TAP_CAPACITY: usize = 16384;

pub struct CpalPlaybackSink {
    device: Device,
    config: StreamConfig,
    stop: Mutex<Option<Arc<AtomicBool>>>,
}

impl CpalPlaybackSink {
    /// Sink on the default output device
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| MouthpieceError::AudioDeviceError("No output device available".into()))?;

        info!("Using output device: {}", device.name().unwrap_or_else(|_| "Unknown".to_string()));

        let config = device
            .default_output_config()
            .map_err(|e| MouthpieceError::AudioDeviceError(format!("Failed to get output config: {}", e)))?
            .into();

        Ok(Self {
            device,
            config,
            stop: Mutex::new(None),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    pub fn channels(&self) -> u16 {
        self.config.channels
    }
}

impl PlaybackSink for CpalPlaybackSink {
    fn play(&self, clip: &AudioClip) -> Result<PlaybackSession> {
        let pcm = clip
            .decode()
            .map_err(|e| MouthpieceError::PlaybackError(format!("Cannot play clip: {}", e)))?;
        let device_audio = resample_to(&pcm, self.sample_rate())?;

        self.halt();

        let stop = Arc::new(AtomicBool::new(false));
        let played = Arc::new(AtomicU64::new(0));
        let tap = AudioRingBuffer::new(TAP_CAPACITY);
        let (events, rx) = unbounded_channel();

        let stream_thread = StreamThread {
            device: self.device.clone(),
            config: self.config.clone(),
            samples: Arc::new(device_audio.samples),
            played: Arc::clone(&played),
            stop: Arc::clone(&stop),
            tap: tap.clone(),
            events,
        };
        thread::Builder::new()
            .name("mouthpiece-playback".into())
            .spawn(move || stream_thread.run())
            .map_err(|e| MouthpieceError::PlaybackError(format!("Failed to spawn playback thread: {}", e)))?;

        *self.stop.lock() = Some(stop);

        Ok(PlaybackSession {
            clock: PlaybackClock::from_frames(played, self.sample_rate()),
            events: rx,
            tap: Some(tap),
            pcm: Some(Arc::new(pcm)),
        })
    }

    fn halt(&self) {
        if let Some(stop) = self.stop.lock().take() {
            stop.store(true, Ordering::SeqCst);
        }
    }
}

struct StreamThread {
    device: Device,
    config: StreamConfig,
    samples: Arc<Vec<f32>>,
    played: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
    tap: AudioRingBuffer,
    events: UnboundedSender<SpeechEvent>,
}

impl StreamThread {
    fn run(self) {
        let channels = self.config.channels as usize;
        let total = self.samples.len() as u64;
        let samples = Arc::clone(&self.samples);
        let played = Arc::clone(&self.played);
        let stop = Arc::clone(&self.stop);
        let tap = self.tap.clone();

        let err_fn = |err| {
            error!("Audio output stream error: {}", err);
        };

        let stream = self.device.build_output_stream(
            &self.config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if stop.load(Ordering::Relaxed) {
                    data.fill(0.0);
                    return;
                }
                let start = played.load(Ordering::Relaxed) as usize;
                let frames = data.len() / channels;
                let end = (start + frames).min(samples.len());
                let chunk = &samples[start.min(end)..end];

                for (i, frame) in data.chunks_mut(channels).enumerate() {
                    let sample = chunk.get(i).copied().unwrap_or(0.0);
                    frame.fill(sample);
                }
                tap.push(chunk);
                played.store(end as u64, Ordering::Relaxed);
            },
            err_fn,
            None,
        );

        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Failed to build output stream: {}", e);
                let _ = self.events.send(SpeechEvent::Error(SpeechErrorKind::Device));
                return;
            }
        };
        if let Err(e) = stream.play() {
            warn!("Failed to start output stream: {}", e);
            let _ = self.events.send(SpeechEvent::Error(SpeechErrorKind::Device));
            return;
        }

        let _ = self.events.send(SpeechEvent::Started);
        debug!("Playing {} samples", total);

        loop {
            if self.stop.load(Ordering::SeqCst) {
                let _ = self.events.send(SpeechEvent::Error(SpeechErrorKind::Interrupted));
                break;
            }
            if self.played.load(Ordering::Relaxed) >= total {
                let _ = self.events.send(SpeechEvent::Ended);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        drop(stream);
        debug!("Playback thread finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::wav::encode_wav;

    #[test]
    fn test_sink_creation() {
        // No audio device in CI; only check what we can
        if let Ok(sink) = CpalPlaybackSink::new() {
            assert!(sink.sample_rate() > 0);
            assert!(sink.channels() > 0);
        }
    }

    #[tokio::test]
    async fn test_play_and_halt() {
        let Ok(sink) = CpalPlaybackSink::new() else {
            return;
        };
        let clip = AudioClip::new(encode_wav(&vec![0.0; 16000], 16000).unwrap());
        if let Ok(mut session) = sink.play(&clip) {
            sink.halt();
            let mut last = None;
            while let Some(event) = session.events.recv().await {
                last = Some(event);
            }
            assert!(matches!(last, Some(SpeechEvent::Error(_)) | Some(SpeechEvent::Ended)));
        }
    }
}
