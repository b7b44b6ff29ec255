//! Render-side consumer of lifecycle events.
//!
//! The driver owns the blender and, once per frame, turns the active
//! utterance's lipsync source into a [`LipsyncFrame`] at the current
//! playback position.

use super::blender::{FrameBlender, FrameInput, FrameReport, LipsyncFrame};
use super::sink::MorphTargetSink;
use crate::audio::{AnalyzerConfig, LiveAnalyzer};
use crate::lifecycle::{ActiveUtterance, LifecycleEvent, LipsyncSource, DEFAULT_EXPRESSION, IDLE_ANIMATION};
use crate::utils::{FrameStats, FrameTimer};
use crossbeam_channel::{Receiver, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

pub struct AvatarDriver {
    blender: FrameBlender,
    events: Receiver<LifecycleEvent>,
    analyzer: LiveAnalyzer,
    expression_id: String,
    animation_id: String,
    active: Option<ActiveUtterance>,
    timer: FrameTimer,
    last_report: FrameReport,
    shutdown: bool,
}

impl AvatarDriver {
    pub fn new(blender: FrameBlender, analyzer: AnalyzerConfig, events: Receiver<LifecycleEvent>) -> Self {
        Self {
            blender,
            events,
            analyzer: LiveAnalyzer::new(analyzer),
            expression_id: DEFAULT_EXPRESSION.to_string(),
            animation_id: IDLE_ANIMATION.to_string(),
            active: None,
            timer: FrameTimer::default(),
            last_report: FrameReport::default(),
            shutdown: false,
        }
    }

    pub fn blender(&self) -> &FrameBlender {
        &self.blender
    }

    /// For setup-mode control and manual winks
    pub fn blender_mut(&mut self) -> &mut FrameBlender {
        &mut self.blender
    }

    pub fn expression_id(&self) -> &str {
        &self.expression_id
    }

    /// Body animation the renderer should be playing
    pub fn animation_id(&self) -> &str {
        &self.animation_id
    }

    pub fn active(&self) -> Option<&ActiveUtterance> {
        self.active.as_ref()
    }

    pub fn last_report(&self) -> &FrameReport {
        &self.last_report
    }

    pub fn stats(&self) -> FrameStats {
        self.timer.stats()
    }

    /// True once the lifecycle controller has shut down or gone away
    pub fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    /// Apply pending lifecycle events, then blend one frame into `sink`
    pub fn frame(&mut self, now_ms: u64, sink: &mut dyn MorphTargetSink) -> FrameReport {
        let started = self.timer.begin_frame();
        self.drain_events();

        let lipsync = self.lipsync_frame();
        let report = self.blender.tick(
            &FrameInput {
                now_ms,
                expression_id: &self.expression_id,
                lipsync,
            },
            sink,
        );
        trace!("Frame {}ms: {:?}", now_ms, report.active_viseme);

        self.timer.end_frame(started);
        self.last_report = report.clone();
        report
    }

    fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.apply(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.shutdown {
                        debug!("Lifecycle event stream closed");
                    }
                    self.shutdown = true;
                    self.active = None;
                    break;
                }
            }
        }
    }

    fn apply(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Playing(utterance) => {
                debug!(
                    "Driving {} with {} lipsync, expression {}",
                    utterance.id,
                    utterance.lipsync.kind(),
                    utterance.expression_id
                );
                self.expression_id = utterance.expression_id.clone();
                self.animation_id = utterance.animation_id.clone();
                self.analyzer.reset();
                self.active = Some(utterance);
            }
            LifecycleEvent::Completed { id, reason } => {
                if self.active.as_ref().is_some_and(|a| a.id == id) {
                    debug!("Utterance {} completed: {:?}", id, reason);
                    self.active = None;
                }
            }
            LifecycleEvent::Idle => {
                self.active = None;
                self.expression_id = DEFAULT_EXPRESSION.to_string();
                self.animation_id = IDLE_ANIMATION.to_string();
            }
            LifecycleEvent::Shutdown => {
                info!("Avatar driver received shutdown");
                self.active = None;
                self.shutdown = true;
            }
            LifecycleEvent::Queued { .. } | LifecycleEvent::Preparing { .. } => {}
        }
    }

    fn lipsync_frame(&mut self) -> LipsyncFrame {
        let Some(active) = self.active.as_mut() else {
            return LipsyncFrame::Silent;
        };
        let position = active.clock.position();

        match &mut active.lipsync {
            LipsyncSource::Timeline(timeline) => timeline
                .code_at(position.as_secs_f64())
                .and_then(|code| self.blender.viseme_map().resolve_code(code))
                .map_or(LipsyncFrame::Silent, LipsyncFrame::Viseme),
            LipsyncSource::Clip(pcm) => LipsyncFrame::Openness(self.analyzer.analyze_clip(pcm, position).volume),
            LipsyncSource::Tap(tap) => {
                LipsyncFrame::Openness(self.analyzer.analyze_tap(tap, position.as_millis() as u64).volume)
            }
            LipsyncSource::Synthetic(envelope) => LipsyncFrame::Openness(envelope.sample_at(position).volume),
            LipsyncSource::Closed => LipsyncFrame::Silent,
        }
    }
}

impl std::fmt::Debug for AvatarDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarDriver")
            .field("expression_id", &self.expression_id)
            .field("animation_id", &self.animation_id)
            .field("active", &self.active.as_ref().map(|a| a.id))
            .field("shutdown", &self.shutdown)
            .finish()
    }
}

/// Tick `driver` at `fps` on a dedicated thread until `shutdown` is raised or
/// the lifecycle controller goes away. The thread hands back the driver and sink.
pub fn spawn_render_loop<S>(
    mut driver: AvatarDriver,
    mut sink: S,
    fps: u32,
    shutdown: Arc<AtomicBool>,
) -> JoinHandle<(AvatarDriver, S)>
where
    S: MorphTargetSink + Send + 'static,
{
    let frame_interval = Duration::from_secs_f64(1.0 / fps.max(1) as f64);

    std::thread::spawn(move || {
        info!("Render loop started at {} fps", fps.max(1));
        let epoch = Instant::now();

        while !shutdown.load(Ordering::Relaxed) && !driver.is_shutdown() {
            let frame_start = Instant::now();
            driver.frame(epoch.elapsed().as_millis() as u64, &mut sink);

            if let Some(remaining) = frame_interval.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        let stats = driver.stats();
        info!(
            "Render loop stopped after {} frames ({:.1} fps, p95 {:?})",
            stats.frames, stats.fps, stats.p95_work
        );
        (driver, sink)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::blender::AnimationConfig;
    use crate::animation::blink::BlinkConfig;
    use crate::animation::sink::AvatarRig;
    use crate::audio::{EnvelopeConfig, SyntheticEnvelope};
    use crate::lifecycle::{CompletionReason, PlaybackClock};
    use crate::lipsync::CueTimeline;
    use crossbeam_channel::{unbounded, Sender};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::AtomicU64;
    use uuid::Uuid;

    fn driver() -> (AvatarDriver, Sender<LifecycleEvent>) {
        let blink = BlinkConfig {
            min_interval_ms: 60_000,
            max_interval_ms: 60_000,
            ..Default::default()
        };
        let blender = FrameBlender::with_rng(AnimationConfig::default().with_blink(blink), StdRng::seed_from_u64(5));
        let (tx, rx) = unbounded();
        (AvatarDriver::new(blender, AnalyzerConfig::default(), rx), tx)
    }

    fn utterance(lipsync: LipsyncSource, position_us: &Arc<AtomicU64>) -> ActiveUtterance {
        ActiveUtterance {
            id: Uuid::new_v4(),
            text: "Hi sweetie!".into(),
            expression_id: "smile".into(),
            animation_id: "Talking_1".into(),
            lipsync,
            clock: PlaybackClock::manual(Arc::clone(position_us)),
        }
    }

    fn hi_sweetie() -> LipsyncSource {
        let timeline = CueTimeline::from_json(
            r#"{"mouthCues":[{"start":0,"end":0.2,"value":"A"},{"start":0.2,"end":0.5,"value":"B"},{"start":0.5,"end":0.8,"value":"C"}]}"#,
        )
        .unwrap();
        LipsyncSource::Timeline(Arc::new(timeline))
    }

    #[test]
    fn test_idle_by_default() {
        let (mut driver, _tx) = driver();
        let mut rig = AvatarRig::arkit_head();
        let report = driver.frame(0, &mut rig);
        assert_eq!(report.active_viseme, None);
        assert_eq!(driver.animation_id(), IDLE_ANIMATION);
        assert_eq!(driver.expression_id(), DEFAULT_EXPRESSION);
    }

    #[test]
    fn test_timeline_follows_clock() {
        let (mut driver, tx) = driver();
        let mut rig = AvatarRig::arkit_head();
        let position = Arc::new(AtomicU64::new(100_000));
        tx.send(LifecycleEvent::Playing(utterance(hi_sweetie(), &position))).unwrap();

        assert_eq!(driver.frame(0, &mut rig).active_viseme, Some("viseme_PP"));
        assert_eq!(driver.expression_id(), "smile");
        assert_eq!(driver.animation_id(), "Talking_1");

        position.store(350_000, Ordering::Relaxed);
        assert_eq!(driver.frame(16, &mut rig).active_viseme, Some("viseme_kk"));

        position.store(900_000, Ordering::Relaxed);
        assert_eq!(driver.frame(32, &mut rig).active_viseme, None);
    }

    #[test]
    fn test_completion_silences_then_idle_resets() {
        let (mut driver, tx) = driver();
        let mut rig = AvatarRig::arkit_head();
        let position = Arc::new(AtomicU64::new(100_000));
        let active = utterance(hi_sweetie(), &position);
        let id = active.id;
        tx.send(LifecycleEvent::Playing(active)).unwrap();
        driver.frame(0, &mut rig);

        tx.send(LifecycleEvent::Completed {
            id,
            reason: CompletionReason::Skipped,
        })
        .unwrap();
        let report = driver.frame(16, &mut rig);
        assert_eq!(report.active_viseme, None);
        // Expression holds until the queue drains
        assert_eq!(driver.expression_id(), "smile");
        // Mouth relaxes rather than snapping shut
        assert!(driver.blender().weights().get("viseme_PP") > 0.0);

        tx.send(LifecycleEvent::Idle).unwrap();
        driver.frame(32, &mut rig);
        assert_eq!(driver.expression_id(), DEFAULT_EXPRESSION);
        assert_eq!(driver.animation_id(), IDLE_ANIMATION);
    }

    #[test]
    fn test_synthetic_source_opens_mouth() {
        let (mut driver, tx) = driver();
        let mut rig = AvatarRig::arkit_head();
        let text = "one two three four five six seven eight nine ten";
        let envelope = SyntheticEnvelope::from_text_with_rng(text, &EnvelopeConfig::default(), StdRng::seed_from_u64(2));
        let position = Arc::new(AtomicU64::new(2_000_000));
        tx.send(LifecycleEvent::Playing(utterance(LipsyncSource::Synthetic(envelope), &position)))
            .unwrap();

        let mut opened = false;
        for frame in 0..20u64 {
            position.fetch_add(16_000, Ordering::Relaxed);
            let report = driver.frame(frame * 16, &mut rig);
            opened |= report.active_viseme == Some("viseme_aa");
        }
        assert!(opened);
        assert!(driver.blender().weights().get("viseme_aa") > 0.0);
    }

    #[test]
    fn test_closed_source_keeps_mouth_shut() {
        let (mut driver, tx) = driver();
        let mut rig = AvatarRig::arkit_head();
        let position = Arc::new(AtomicU64::new(0));
        tx.send(LifecycleEvent::Playing(utterance(LipsyncSource::Closed, &position))).unwrap();
        for frame in 0..10 {
            assert_eq!(driver.frame(frame * 16, &mut rig).active_viseme, None);
        }
        assert_eq!(driver.blender().weights().get("viseme_aa"), 0.0);
    }

    #[test]
    fn test_disconnect_marks_shutdown() {
        let (mut driver, tx) = driver();
        let mut rig = AvatarRig::arkit_head();
        drop(tx);
        driver.frame(0, &mut rig);
        assert!(driver.is_shutdown());
    }

    #[test]
    fn test_render_loop_stops_on_flag() {
        let (driver, _tx) = driver();
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = spawn_render_loop(driver, AvatarRig::arkit_head(), 120, Arc::clone(&shutdown));
        std::thread::sleep(Duration::from_millis(60));
        shutdown.store(true, Ordering::Relaxed);
        let (driver, _rig) = handle.join().unwrap();
        assert!(driver.stats().frames > 0);
    }
}
