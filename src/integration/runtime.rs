//! Wires the chat pipeline, lifecycle controller and render-side driver
//! into one runtime.
//!
//! ```text
//! text -> ChatService -> ChatResponse -> LifecycleController -> events -> AvatarDriver -> morph targets
//! ```

use crate::animation::{AvatarDriver, FrameBlender, MorphTargetSink};
use crate::chat::{ChatResponse, ChatService};
use crate::integration::config::{AvatarConfig, SynthesizerKind};
use crate::lifecycle::{
    ClockPlaybackSink, CueProvider, LifecycleController, LifecycleEvent, LifecycleHandle, PlaybackMessage,
    PlaybackSink,
};
use crate::lipsync::{FfmpegTranscoder, LipsyncService, RhubarbExtractor};
use crate::llm::{build_responder, LlmResponder};
use crate::speech::{HumSynthesizer, SpeechSynthesizer};
use crate::utils::FrameStats;
use crate::{MouthpieceError, Result};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Cloneable control surface of a running avatar
#[derive(Clone)]
pub struct RuntimeHandle {
    lifecycle: LifecycleHandle,
    chat: Arc<ChatService>,
}

impl RuntimeHandle {
    /// Speak `text` directly, bypassing the responder
    pub fn say(&self, text: impl Into<String>, expression_id: &str, animation_id: &str) -> Result<()> {
        let message = PlaybackMessage::new(text)
            .with_expression(expression_id)
            .with_animation(animation_id);
        self.lifecycle.enqueue(message)
    }

    /// Run one chat turn and queue every resulting message
    pub async fn submit_chat(&self, user_message: Option<&str>) -> Result<ChatResponse> {
        let response = self.chat.process_message(user_message).await;
        self.play_response(&response)?;
        Ok(response)
    }

    /// Queue an already produced response, e.g. one loaded from disk
    pub fn play_response(&self, response: &ChatResponse) -> Result<()> {
        self.lifecycle.enqueue_many(response.to_playback_messages())
    }

    pub fn skip(&self) -> Result<()> {
        self.lifecycle.skip()
    }

    pub fn stop(&self) -> Result<()> {
        self.lifecycle.stop()
    }

    pub fn shutdown(&self) -> Result<()> {
        self.lifecycle.shutdown()
    }

    pub fn subscribe(&self) -> Receiver<LifecycleEvent> {
        self.lifecycle.subscribe()
    }

    pub fn chat(&self) -> &ChatService {
        &self.chat
    }
}

/// Outcome of [`AvatarRuntime::play_until_idle`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackSummary {
    pub queued: usize,
    /// Utterances that reached `Playing`
    pub played: usize,
    pub frames: FrameStats,
}

pub struct AvatarRuntime {
    config: AvatarConfig,
    handle: RuntimeHandle,
    controller: JoinHandle<()>,
}

impl AvatarRuntime {
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &AvatarConfig {
        &self.config
    }

    /// A render-side driver subscribed to this runtime's lifecycle events
    pub fn driver(&self) -> AvatarDriver {
        let blender = FrameBlender::new(self.config.animation.clone());
        AvatarDriver::new(blender, self.config.analyzer.clone(), self.handle.subscribe())
    }

    /// Queue messages through `enqueue` and render them into `sink` at the
    /// configured rate until the queue drains, then shut down.
    ///
    /// The driver and the event receiver subscribe before `enqueue` runs, so
    /// no lifecycle event can be missed. `enqueue` returns how many messages
    /// it queued; zero returns immediately.
    pub async fn play_until_idle<F>(self, sink: &mut dyn MorphTargetSink, enqueue: F) -> Result<PlaybackSummary>
    where
        F: FnOnce(&RuntimeHandle) -> Result<usize>,
    {
        let events = self.handle.subscribe();
        let mut driver = self.driver();

        let queued = match enqueue(&self.handle) {
            Ok(queued) => queued,
            Err(e) => {
                self.shutdown().await?;
                return Err(e);
            }
        };

        let mut summary = PlaybackSummary {
            queued,
            ..Default::default()
        };
        if queued == 0 {
            debug!("Nothing queued");
            self.shutdown().await?;
            return Ok(summary);
        }

        let fps = self.config.fps.max(1);
        let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        let epoch = Instant::now();
        let mut next_log_ms = 0;

        loop {
            ticker.tick().await;
            let now_ms = epoch.elapsed().as_millis() as u64;
            let report = driver.frame(now_ms, sink);

            if now_ms >= next_log_ms {
                info!(
                    "t={:.1}s expression={} animation={} viseme={:?} ({:.2})",
                    now_ms as f64 / 1000.0,
                    driver.expression_id(),
                    driver.animation_id(),
                    report.active_viseme,
                    report.viseme_target
                );
                next_log_ms += 1000;
            }

            let mut done = false;
            while let Ok(event) = events.try_recv() {
                match event {
                    LifecycleEvent::Playing(_) => summary.played += 1,
                    LifecycleEvent::Idle | LifecycleEvent::Shutdown => done = true,
                    _ => {}
                }
            }
            if done || driver.is_shutdown() {
                break;
            }
        }

        summary.frames = driver.stats();
        info!("Rendered {} frames at {:.1} fps", summary.frames.frames, summary.frames.fps);
        self.shutdown().await?;
        Ok(summary)
    }

    /// Shut the controller down and wait for it to finish
    pub async fn shutdown(self) -> Result<()> {
        // A controller that already exited has dropped its receiver
        if let Err(e) = self.handle.shutdown() {
            warn!("Shutdown command not delivered: {}", e);
        }
        self.controller
            .await
            .map_err(|e| MouthpieceError::ChannelError(format!("Lifecycle controller panicked: {}", e)))
    }
}

/// Builder for an [`AvatarRuntime`]. Collaborators not supplied are derived
/// from the configuration.
#[derive(Default)]
pub struct AvatarRuntimeBuilder {
    config: AvatarConfig,
    sink: Option<Arc<dyn PlaybackSink>>,
    responder: Option<Arc<dyn LlmResponder>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    cue_provider: Option<Arc<dyn CueProvider>>,
}

impl AvatarRuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AvatarConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn PlaybackSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_responder(mut self, responder: Arc<dyn LlmResponder>) -> Self {
        self.responder = Some(responder);
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Cue source for messages that arrive with audio but no timeline
    pub fn with_cue_provider(mut self, provider: Arc<dyn CueProvider>) -> Self {
        self.cue_provider = Some(provider);
        self
    }

    /// Start the lifecycle controller on the current tokio runtime
    pub async fn build(self) -> Result<AvatarRuntime> {
        let config = self.config;
        config.validate().map_err(MouthpieceError::ConfigError)?;

        let responder = match self.responder {
            Some(responder) => responder,
            None => build_responder(&config.llm).await?,
        };

        let synthesizer = match self.synthesizer {
            Some(synthesizer) => Some(synthesizer),
            None => default_synthesizer(&config)?,
        };

        let lipsync = config.extract_cues.then(|| {
            Arc::new(
                LipsyncService::new(
                    Arc::new(FfmpegTranscoder::new(&config.paths.ffmpeg)),
                    Arc::new(RhubarbExtractor::new(&config.paths.rhubarb)),
                    &config.paths.audios_dir,
                )
                .with_timeout(config.lifecycle.cue_timeout()),
            )
        });

        let mut chat = ChatService::new(responder, &config.paths.audios_dir).with_voice(config.voice.clamped());
        if let Some(synthesizer) = synthesizer {
            chat = chat.with_synthesizer(synthesizer);
        }
        if let Some(lipsync) = &lipsync {
            chat = chat.with_lipsync(Arc::clone(lipsync));
        }

        let cue_provider = self
            .cue_provider
            .or_else(|| lipsync.map(|service| service as Arc<dyn CueProvider>));
        let sink = self.sink.unwrap_or_else(default_sink);

        let (controller, lifecycle) =
            LifecycleController::new(config.lifecycle.clone(), config.envelope.clone(), sink, cue_provider);
        let controller = controller.spawn();
        info!("Avatar runtime started");

        Ok(AvatarRuntime {
            handle: RuntimeHandle {
                lifecycle,
                chat: Arc::new(chat),
            },
            controller,
            config,
        })
    }
}

fn default_synthesizer(config: &AvatarConfig) -> Result<Option<Arc<dyn SpeechSynthesizer>>> {
    match config.synthesizer {
        SynthesizerKind::None => Ok(None),
        SynthesizerKind::Hum => Ok(Some(Arc::new(
            HumSynthesizer::default().with_envelope(config.envelope.clone()),
        ))),
        #[cfg(feature = "vits-tts")]
        SynthesizerKind::Vits => Ok(Some(Arc::new(crate::speech::VitsSynthesizer::new(
            config.vits.clone(),
        )?))),
        #[cfg(not(feature = "vits-tts"))]
        SynthesizerKind::Vits => Err(MouthpieceError::ConfigError(
            "the vits synthesizer requires the `vits-tts` feature".to_string(),
        )),
    }
}

#[cfg(feature = "audio-io")]
fn default_sink() -> Arc<dyn PlaybackSink> {
    match crate::audio::CpalPlaybackSink::new() {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            warn!("No audio output ({}), playing headless", e);
            Arc::new(ClockPlaybackSink::new())
        }
    }
}

#[cfg(not(feature = "audio-io"))]
fn default_sink() -> Arc<dyn PlaybackSink> {
    Arc::new(ClockPlaybackSink::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AvatarRig;
    use crate::lifecycle::{CompletionReason, IDLE_ANIMATION};
    use std::time::Duration;

    fn headless() -> AvatarRuntimeBuilder {
        let config = AvatarConfig::default()
            .with_synthesizer(SynthesizerKind::None)
            .with_cue_extraction(false);
        AvatarRuntimeBuilder::new()
            .with_config(config)
            .with_sink(Arc::new(ClockPlaybackSink::new()))
    }

    fn wait_for(events: &Receiver<LifecycleEvent>, pred: impl Fn(&LifecycleEvent) -> bool) -> LifecycleEvent {
        loop {
            let event = events.recv_timeout(Duration::from_secs(5)).expect("event before timeout");
            if pred(&event) {
                return event;
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_say_reaches_driver() {
        let runtime = headless().build().await.unwrap();
        let handle = runtime.handle();
        let mut driver = runtime.driver();
        let events = handle.subscribe();

        handle.say("Hi sweetie!", "smile", "Talking_1").unwrap();
        wait_for(&events, |e| matches!(e, LifecycleEvent::Playing(_)));

        let mut rig = AvatarRig::arkit_head();
        driver.frame(0, &mut rig);
        assert_eq!(driver.expression_id(), "smile");
        assert_eq!(driver.animation_id(), "Talking_1");

        handle.stop().unwrap();
        wait_for(&events, |e| matches!(e, LifecycleEvent::Idle));
        driver.frame(16, &mut rig);
        assert_eq!(driver.animation_id(), IDLE_ANIMATION);

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_submit_chat_queues_messages() {
        let runtime = headless().build().await.unwrap();
        let handle = runtime.handle();
        let events = handle.subscribe();

        let response = handle.submit_chat(Some("how are you")).await.unwrap();
        assert_eq!(response.messages.len(), 1);
        assert!(response.messages[0].audio.is_none());

        wait_for(&events, |e| matches!(e, LifecycleEvent::Playing(_)));
        handle.skip().unwrap();
        let completed = wait_for(&events, |e| matches!(e, LifecycleEvent::Completed { .. }));
        assert!(matches!(
            completed,
            LifecycleEvent::Completed {
                reason: CompletionReason::Skipped,
                ..
            }
        ));

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_play_until_idle_sees_every_utterance() {
        for _ in 0..5 {
            let runtime = headless().build().await.unwrap();
            let mut rig = AvatarRig::arkit_head();

            let summary = runtime
                .play_until_idle(&mut rig, |handle| {
                    handle.say("Hi sweetie!", "smile", "Talking_1")?;
                    // let the controller run ahead of the render loop
                    tokio::task::block_in_place(|| std::thread::sleep(Duration::from_millis(5)));
                    Ok(1)
                })
                .await
                .unwrap();

            assert_eq!(summary.played, 1);
            assert!(summary.frames.frames > 0);
            // the driver picked up the smile while the message played
            assert!(rig.weight("mouthSmileLeft").unwrap() > 0.1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_play_until_idle_with_nothing_queued() {
        let runtime = headless().build().await.unwrap();
        let mut rig = AvatarRig::arkit_head();
        let empty = ChatResponse::new(Vec::new());

        let summary = tokio::time::timeout(
            Duration::from_secs(5),
            runtime.play_until_idle(&mut rig, |handle| {
                handle.play_response(&empty)?;
                Ok(empty.messages.len())
            }),
        )
        .await
        .expect("returns without waiting for events")
        .unwrap();
        assert_eq!(summary, PlaybackSummary::default());
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let result = AvatarRuntimeBuilder::new()
            .with_config(AvatarConfig::default().with_fps(0))
            .build()
            .await;
        assert!(matches!(result, Err(MouthpieceError::ConfigError(_))));
    }
}
