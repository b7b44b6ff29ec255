//! FIFO utterance queue: `Queued -> Preparing -> Playing -> Completed`.
//!
//! Exactly one message plays at a time. Cue extraction and playback failures
//! degrade the message (envelope lipsync, text-only timing) instead of
//! dropping it.

use super::message::{ActiveUtterance, CompletionReason, LipsyncSource, PlaybackMessage};
use super::playback::{PlaybackClock, PlaybackSession, PlaybackSink};
use crate::audio::synthetic::{estimate_duration, EnvelopeConfig, SyntheticEnvelope};
use crate::lipsync::CueTimeline;
use crate::speech::SpeechEvent;
use crate::{MouthpieceError, Result};
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Upper bound on cue extraction before falling back to the envelope
    pub cue_timeout_ms: u64,

    /// Text-only messages complete after the estimated duration times this
    pub text_only_grace: f32,

    /// Animate the mouth from loudness when no cues are available.
    /// When off the mouth stays closed instead.
    pub envelope_fallback: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            cue_timeout_ms: 30_000,
            text_only_grace: 1.2,
            envelope_fallback: true,
        }
    }
}

impl LifecycleConfig {
    pub fn with_cue_timeout(mut self, timeout_ms: u64) -> Self {
        self.cue_timeout_ms = timeout_ms;
        self
    }

    pub fn with_envelope_fallback(mut self, enabled: bool) -> Self {
        self.envelope_fallback = enabled;
        self
    }

    pub fn cue_timeout(&self) -> Duration {
        Duration::from_millis(self.cue_timeout_ms)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.cue_timeout_ms == 0 {
            return Err("cue_timeout_ms must be positive".to_string());
        }
        if !(self.text_only_grace >= 1.0) {
            return Err("text_only_grace must be at least 1.0".to_string());
        }
        Ok(())
    }
}

/// Source of cue timelines for messages that arrive without one
#[async_trait]
pub trait CueProvider: Send + Sync {
    async fn cues_for(&self, message: &PlaybackMessage) -> Result<CueTimeline>;
}

#[derive(Debug, Clone)]
pub enum LifecycleCommand {
    Enqueue(PlaybackMessage),
    EnqueueMany(Vec<PlaybackMessage>),
    /// End the current message and move on to the next
    Skip,
    /// End the current message and drop everything queued
    Stop,
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    /// Appended to the queue; `position` is 1-based among waiting messages
    Queued { id: Uuid, position: usize },
    Preparing { id: Uuid },
    Playing(ActiveUtterance),
    Completed { id: Uuid, reason: CompletionReason },
    /// Nothing playing and nothing queued
    Idle,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Skip,
    Stop,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Shutdown,
}

type Subscribers = Arc<Mutex<Vec<Sender<LifecycleEvent>>>>;

/// Handle for feeding the controller and observing its events
#[derive(Clone)]
pub struct LifecycleHandle {
    command_tx: UnboundedSender<LifecycleCommand>,
    subscribers: Subscribers,
}

impl LifecycleHandle {
    pub fn send_command(&self, command: LifecycleCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|e| MouthpieceError::ChannelError(format!("Lifecycle controller is gone: {}", e)))
    }

    pub fn enqueue(&self, message: PlaybackMessage) -> Result<()> {
        self.send_command(LifecycleCommand::Enqueue(message))
    }

    pub fn enqueue_many(&self, messages: Vec<PlaybackMessage>) -> Result<()> {
        self.send_command(LifecycleCommand::EnqueueMany(messages))
    }

    pub fn skip(&self) -> Result<()> {
        self.send_command(LifecycleCommand::Skip)
    }

    pub fn stop(&self) -> Result<()> {
        self.send_command(LifecycleCommand::Stop)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send_command(LifecycleCommand::Shutdown)
    }

    /// New receiver that sees every event emitted from now on
    pub fn subscribe(&self) -> Receiver<LifecycleEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }
}

pub struct LifecycleController {
    config: LifecycleConfig,
    envelope: EnvelopeConfig,
    sink: Arc<dyn PlaybackSink>,
    cues: Option<Arc<dyn CueProvider>>,
    queue: VecDeque<PlaybackMessage>,
    command_rx: UnboundedReceiver<LifecycleCommand>,
    subscribers: Subscribers,
}

impl LifecycleController {
    pub fn new(
        config: LifecycleConfig,
        envelope: EnvelopeConfig,
        sink: Arc<dyn PlaybackSink>,
        cues: Option<Arc<dyn CueProvider>>,
    ) -> (Self, LifecycleHandle) {
        let (command_tx, command_rx) = unbounded_channel();
        let subscribers: Subscribers = Arc::new(Mutex::new(Vec::new()));

        let handle = LifecycleHandle {
            command_tx,
            subscribers: Arc::clone(&subscribers),
        };

        let controller = Self {
            config,
            envelope,
            sink,
            cues,
            queue: VecDeque::new(),
            command_rx,
            subscribers,
        };

        (controller, handle)
    }

    /// Run on the current tokio runtime
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        info!("Lifecycle controller started");

        loop {
            let Some(message) = self.queue.pop_front() else {
                match self.command_rx.recv().await {
                    Some(command) => {
                        if self.on_idle_command(command) == Flow::Shutdown {
                            break;
                        }
                        continue;
                    }
                    None => {
                        debug!("All lifecycle handles dropped");
                        break;
                    }
                }
            };

            if self.speak(message).await == Flow::Shutdown {
                break;
            }
            if self.queue.is_empty() {
                self.emit(LifecycleEvent::Idle);
            }
        }

        self.sink.halt();
        self.emit(LifecycleEvent::Shutdown);
        info!("Lifecycle controller stopped");
    }

    fn emit(&self, event: LifecycleEvent) {
        self.subscribers.lock().retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn push(&mut self, message: PlaybackMessage) {
        let id = message.id;
        self.queue.push_back(message);
        debug!("Queued message {} at position {}", id, self.queue.len());
        self.emit(LifecycleEvent::Queued {
            id,
            position: self.queue.len(),
        });
    }

    fn on_idle_command(&mut self, command: LifecycleCommand) -> Flow {
        match command {
            LifecycleCommand::Enqueue(message) => self.push(message),
            LifecycleCommand::EnqueueMany(messages) => messages.into_iter().for_each(|m| self.push(m)),
            LifecycleCommand::Skip | LifecycleCommand::Stop => debug!("Nothing playing"),
            LifecycleCommand::Shutdown => return Flow::Shutdown,
        }
        Flow::Continue
    }

    /// Commands arriving while a message is in flight
    fn on_busy_command(&mut self, command: LifecycleCommand) -> Option<Interrupt> {
        match command {
            LifecycleCommand::Enqueue(message) => {
                self.push(message);
                None
            }
            LifecycleCommand::EnqueueMany(messages) => {
                messages.into_iter().for_each(|m| self.push(m));
                None
            }
            LifecycleCommand::Skip => Some(Interrupt::Skip),
            LifecycleCommand::Stop => {
                self.queue.clear();
                Some(Interrupt::Stop)
            }
            LifecycleCommand::Shutdown => Some(Interrupt::Shutdown),
        }
    }

    fn interrupted(&mut self, id: Uuid, interrupt: Interrupt) -> Flow {
        self.sink.halt();
        let reason = match interrupt {
            Interrupt::Skip => CompletionReason::Skipped,
            Interrupt::Stop | Interrupt::Shutdown => CompletionReason::Stopped,
        };
        info!("Message {} ended early: {:?}", id, reason);
        self.emit(LifecycleEvent::Completed { id, reason });
        match interrupt {
            Interrupt::Shutdown => Flow::Shutdown,
            _ => Flow::Continue,
        }
    }

    async fn speak(&mut self, message: PlaybackMessage) -> Flow {
        let id = message.id;
        self.emit(LifecycleEvent::Preparing { id });

        let timeline = match self.acquire_cues(&message).await {
            Ok(timeline) => timeline,
            Err(interrupt) => return self.interrupted(id, interrupt),
        };

        let session = match &message.audio {
            Some(clip) if !clip.is_empty() => match self.sink.play(clip) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!("Playback failed for {}, speaking text only: {}", id, e);
                    None
                }
            },
            _ => None,
        };

        let lipsync = self.lipsync_source(&message, timeline, session.as_ref());
        let clock = session
            .as_ref()
            .map(|s| s.clock.clone())
            .unwrap_or_else(PlaybackClock::started_now);

        info!("Playing message {} with {} lipsync", id, lipsync.kind());
        self.emit(LifecycleEvent::Playing(ActiveUtterance {
            id,
            text: message.text.clone(),
            expression_id: message.expression_id.clone(),
            animation_id: message.animation_id.clone(),
            lipsync,
            clock,
        }));

        let outcome = match session {
            Some(session) => self.await_playback(session).await,
            None => self.await_text_only(&message.text).await,
        };

        match outcome {
            Ok(reason) => {
                debug!("Message {} completed: {:?}", id, reason);
                self.emit(LifecycleEvent::Completed { id, reason });
                Flow::Continue
            }
            Err(interrupt) => self.interrupted(id, interrupt),
        }
    }

    /// Cues shipped with the message, else from the provider under a timeout.
    /// `Ok(None)` means speak without cues.
    async fn acquire_cues(
        &mut self,
        message: &PlaybackMessage,
    ) -> std::result::Result<Option<Arc<CueTimeline>>, Interrupt> {
        if let Some(timeline) = message.cue_timeline.as_ref().filter(|t| !t.is_empty()) {
            return Ok(Some(Arc::clone(timeline)));
        }
        let Some(provider) = self.cues.clone() else {
            return Ok(None);
        };
        if !message.has_audio() {
            return Ok(None);
        }

        let timeout = self.config.cue_timeout();
        let fetch = tokio::time::timeout(timeout, provider.cues_for(message));
        tokio::pin!(fetch);

        loop {
            tokio::select! {
                result = &mut fetch => {
                    return Ok(match result {
                        Ok(Ok(timeline)) => {
                            debug!("Got {} cues for {}", timeline.len(), message.id);
                            Some(Arc::new(timeline))
                        }
                        Ok(Err(e)) => {
                            warn!("Cue extraction failed for {}: {}", message.id, e);
                            None
                        }
                        Err(_) => {
                            warn!("Cue extraction for {} timed out after {:?}", message.id, timeout);
                            None
                        }
                    });
                }
                command = self.command_rx.recv() => match command {
                    Some(command) => {
                        if let Some(interrupt) = self.on_busy_command(command) {
                            return Err(interrupt);
                        }
                    }
                    None => return Err(Interrupt::Shutdown),
                },
            }
        }
    }

    fn lipsync_source(
        &self,
        message: &PlaybackMessage,
        timeline: Option<Arc<CueTimeline>>,
        session: Option<&PlaybackSession>,
    ) -> LipsyncSource {
        if let Some(timeline) = timeline {
            return LipsyncSource::Timeline(timeline);
        }
        if !self.config.envelope_fallback {
            return LipsyncSource::Closed;
        }
        match session {
            Some(PlaybackSession { tap: Some(tap), .. }) => LipsyncSource::Tap(tap.clone()),
            Some(PlaybackSession { pcm: Some(pcm), .. }) => LipsyncSource::Clip(Arc::clone(pcm)),
            _ => LipsyncSource::Synthetic(SyntheticEnvelope::from_text(&message.text, &self.envelope)),
        }
    }

    async fn await_playback(
        &mut self,
        mut session: PlaybackSession,
    ) -> std::result::Result<CompletionReason, Interrupt> {
        loop {
            tokio::select! {
                event = session.events.recv() => match event {
                    Some(SpeechEvent::Started) => debug!("Playback started"),
                    Some(SpeechEvent::Ended) => return Ok(CompletionReason::Finished),
                    Some(SpeechEvent::Error(kind)) if kind.is_benign() => {
                        debug!("Playback interrupted");
                        return Ok(CompletionReason::Interrupted);
                    }
                    Some(SpeechEvent::Error(kind)) => {
                        warn!("Playback error: {:?}", kind);
                        return Ok(CompletionReason::Failed);
                    }
                    None => {
                        warn!("Playback sink went away without an end signal");
                        return Ok(CompletionReason::Failed);
                    }
                },
                command = self.command_rx.recv() => match command {
                    Some(command) => {
                        if let Some(interrupt) = self.on_busy_command(command) {
                            return Err(interrupt);
                        }
                    }
                    None => return Err(Interrupt::Shutdown),
                },
            }
        }
    }

    async fn await_text_only(&mut self, text: &str) -> std::result::Result<CompletionReason, Interrupt> {
        let estimate = estimate_duration(text, self.envelope.words_per_minute);
        let limit = estimate.mul_f32(self.config.text_only_grace.max(1.0));
        debug!("Text-only message, completing after {:?}", limit);

        let timer = tokio::time::sleep(limit);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                _ = &mut timer => return Ok(CompletionReason::Finished),
                command = self.command_rx.recv() => match command {
                    Some(command) => {
                        if let Some(interrupt) = self.on_busy_command(command) {
                            return Err(interrupt);
                        }
                    }
                    None => return Err(Interrupt::Shutdown),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::playback::ClockPlaybackSink;

    fn controller() -> (LifecycleController, LifecycleHandle) {
        LifecycleController::new(
            LifecycleConfig::default(),
            EnvelopeConfig::default(),
            Arc::new(ClockPlaybackSink::new()),
            None,
        )
    }

    #[test]
    fn test_config_validation() {
        assert!(LifecycleConfig::default().validate().is_ok());
        assert!(LifecycleConfig::default().with_cue_timeout(0).validate().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_text_only_message_completes() {
        let (controller, handle) = controller();
        let events = handle.subscribe();
        let task = controller.spawn();

        handle.enqueue(PlaybackMessage::new("")).unwrap();
        let mut seen = Vec::new();
        while let Ok(event) = events.recv_timeout(Duration::from_secs(2)) {
            let done = matches!(event, LifecycleEvent::Idle);
            seen.push(event);
            if done {
                break;
            }
        }
        assert!(matches!(seen[0], LifecycleEvent::Queued { position: 1, .. }));
        assert!(matches!(seen[1], LifecycleEvent::Preparing { .. }));
        match &seen[2] {
            LifecycleEvent::Playing(active) => assert_eq!(active.lipsync.kind(), "synthetic"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            seen[3],
            LifecycleEvent::Completed {
                reason: CompletionReason::Finished,
                ..
            }
        ));

        handle.shutdown().unwrap();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropping_handles_stops_controller() {
        let (controller, handle) = controller();
        let task = controller.spawn();
        drop(handle);
        tokio::time::timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    }
}
