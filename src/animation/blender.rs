//! Per-frame morph target blending.
//!
//! Three layers compete for every target the renderer exposes. Blink
//! targets belong to the blink/wink overlay, viseme targets to the lipsync
//! layer, everything else to the current expression. Each weight is smoothed
//! toward its layer's target with a per-layer speed.

use super::blink::{BlinkConfig, BlinkScheduler, EyeClosure, EYE_BLINK_LEFT, EYE_BLINK_RIGHT};
use super::sink::MorphTargetSink;
use super::weights::MorphWeightVector;
use crate::expression::{Expression, ExpressionCatalog};
use crate::viseme::{VisemeMap, VisemeMapping};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Smoothing speed for expression targets
    pub expression_speed: f32,

    /// Smoothing speed while a viseme target is rising
    pub viseme_on_speed: f32,

    /// Smoothing speed while a viseme target is relaxing
    pub viseme_off_speed: f32,

    /// Smoothing speed while an eye closes
    pub blink_on_speed: f32,

    /// Smoothing speed while an eye reopens
    pub blink_off_speed: f32,

    pub blink: BlinkConfig,

    /// Gain applied to envelope volume to get mouth openness
    pub lipsync_sensitivity: f32,

    /// Viseme target used for coarse open/close when only an envelope is available
    pub openness_target: String,

    pub viseme_mapping: VisemeMapping,

    /// Weights below this are left out of captured expressions
    pub capture_threshold: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            expression_speed: 0.1,
            viseme_on_speed: 0.2,
            viseme_off_speed: 0.1,
            blink_on_speed: 0.5,
            blink_off_speed: 0.1,
            blink: BlinkConfig::default(),
            lipsync_sensitivity: 2.0,
            openness_target: "viseme_aa".to_string(),
            viseme_mapping: VisemeMapping::Primary,
            capture_threshold: 0.01,
        }
    }
}

impl AnimationConfig {
    pub fn with_viseme_mapping(mut self, mapping: VisemeMapping) -> Self {
        self.viseme_mapping = mapping;
        self
    }

    pub fn with_lipsync_sensitivity(mut self, sensitivity: f32) -> Self {
        self.lipsync_sensitivity = sensitivity;
        self
    }

    pub fn with_blink(mut self, blink: BlinkConfig) -> Self {
        self.blink = blink;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        let speeds = [
            ("expression_speed", self.expression_speed),
            ("viseme_on_speed", self.viseme_on_speed),
            ("viseme_off_speed", self.viseme_off_speed),
            ("blink_on_speed", self.blink_on_speed),
            ("blink_off_speed", self.blink_off_speed),
        ];
        for (name, speed) in speeds {
            if !(speed > 0.0 && speed <= 1.0) {
                return Err(format!("{} must be in (0, 1], got {}", name, speed));
            }
        }
        if self.lipsync_sensitivity < 0.0 {
            return Err("lipsync_sensitivity must not be negative".to_string());
        }
        let map = VisemeMap::new(self.viseme_mapping);
        if !map.controlled_targets().contains(&self.openness_target.as_str()) {
            return Err(format!(
                "openness_target {} is not a viseme target",
                self.openness_target
            ));
        }
        self.blink.validate()
    }
}

/// What the lipsync layer asks for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LipsyncFrame {
    /// Mouth at rest; every viseme target relaxes
    Silent,
    /// One resolved viseme target driven fully open
    Viseme(&'static str),
    /// Coarse openness from envelope volume
    Openness(f32),
}

#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Monotonic frame time, drives the blink scheduler
    pub now_ms: u64,
    pub expression_id: &'a str,
    pub lipsync: LipsyncFrame,
}

/// Summary of one frame, for logging and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub active_viseme: Option<&'static str>,
    /// Target weight handed to the active viseme
    pub viseme_target: f32,
    pub eyes: EyeClosure,
    pub setup_mode: bool,
    pub targets_written: usize,
}

enum Layer {
    Blink(bool),
    Viseme,
    Expression,
}

pub struct FrameBlender {
    config: AnimationConfig,
    catalog: &'static ExpressionCatalog,
    viseme_map: VisemeMap,
    viseme_targets: HashSet<&'static str>,
    weights: MorphWeightVector,
    blink: BlinkScheduler,
    setup_mode: bool,
}

impl FrameBlender {
    pub fn new(config: AnimationConfig) -> Self {
        let blink = BlinkScheduler::new(config.blink.clone());
        Self::with_parts(config, ExpressionCatalog::builtin(), blink)
    }

    /// Blender with a deterministic blink schedule
    pub fn with_rng(config: AnimationConfig, rng: StdRng) -> Self {
        let blink = BlinkScheduler::with_rng(config.blink.clone(), rng);
        Self::with_parts(config, ExpressionCatalog::builtin(), blink)
    }

    pub fn with_catalog(mut self, catalog: &'static ExpressionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    fn with_parts(config: AnimationConfig, catalog: &'static ExpressionCatalog, blink: BlinkScheduler) -> Self {
        let viseme_map = VisemeMap::new(config.viseme_mapping);
        let viseme_targets = viseme_map.controlled_targets().into_iter().collect();
        Self {
            config,
            catalog,
            viseme_map,
            viseme_targets,
            weights: MorphWeightVector::new(),
            blink,
            setup_mode: false,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'static ExpressionCatalog {
        self.catalog
    }

    pub fn viseme_map(&self) -> VisemeMap {
        self.viseme_map
    }

    pub fn weights(&self) -> &MorphWeightVector {
        &self.weights
    }

    pub fn is_viseme_target(&self, name: &str) -> bool {
        self.viseme_targets.contains(name)
    }

    pub fn setup_mode(&self) -> bool {
        self.setup_mode
    }

    /// Enter or leave calibration. Leaving restarts the blink schedule.
    pub fn set_setup_mode(&mut self, enabled: bool, now_ms: u64) {
        if self.setup_mode == enabled {
            return;
        }
        debug!("Setup mode {}", if enabled { "enabled" } else { "disabled" });
        self.setup_mode = enabled;
        if !enabled {
            self.blink.reschedule(now_ms);
        }
    }

    /// Hand-tune one target. Only honored in setup mode.
    pub fn set_manual_weight(&mut self, sink: &mut dyn MorphTargetSink, target: &str, weight: f32) -> bool {
        if !self.setup_mode {
            return false;
        }
        self.weights.set(target, weight);
        sink.set_weight(target, self.weights.get(target));
        true
    }

    pub fn wink_left(&mut self, now_ms: u64) {
        self.blink.wink_left(now_ms);
    }

    pub fn wink_right(&mut self, now_ms: u64) {
        self.blink.wink_right(now_ms);
    }

    /// Snapshot of the current face as a reusable expression
    pub fn capture_expression(&self) -> Expression {
        Expression::capture(self.weights.iter(), self.config.capture_threshold)
    }

    /// Resolve a lipsync frame to the viseme target it drives and that target's goal
    fn lipsync_target(&self, lipsync: LipsyncFrame) -> Option<(&'static str, f32)> {
        match lipsync {
            LipsyncFrame::Silent => None,
            LipsyncFrame::Viseme(target) if self.viseme_targets.contains(target) => Some((target, 1.0)),
            LipsyncFrame::Viseme(target) => {
                trace!("Viseme target {} is not controlled by the active map", target);
                None
            }
            LipsyncFrame::Openness(volume) => {
                let openness = (volume * self.config.lipsync_sensitivity).clamp(0.0, 1.0);
                let target = self.viseme_targets.get(self.config.openness_target.as_str()).copied()?;
                (openness > 0.0).then_some((target, openness))
            }
        }
    }

    /// Advance one frame and write every known target into the sink
    pub fn tick(&mut self, input: &FrameInput<'_>, sink: &mut dyn MorphTargetSink) -> FrameReport {
        if self.setup_mode {
            return FrameReport {
                setup_mode: true,
                ..Default::default()
            };
        }

        let eyes = self.blink.update(input.now_ms);
        let expression = self.catalog.lookup(input.expression_id);
        let active = self.lipsync_target(input.lipsync);

        let mut written = 0;
        for name in sink.target_names() {
            let layer = if name == EYE_BLINK_LEFT {
                Layer::Blink(eyes.left)
            } else if name == EYE_BLINK_RIGHT {
                Layer::Blink(eyes.right)
            } else if self.viseme_targets.contains(name.as_str()) {
                Layer::Viseme
            } else {
                Layer::Expression
            };

            let current = self.weights.get(&name);
            let (goal, speed) = match layer {
                Layer::Blink(closed) => {
                    let goal = if closed { 1.0 } else { 0.0 };
                    let speed = if goal > current {
                        self.config.blink_on_speed
                    } else {
                        self.config.blink_off_speed
                    };
                    (goal, speed)
                }
                Layer::Viseme => {
                    let goal = match active {
                        Some((target, weight)) if target == name => weight,
                        _ => 0.0,
                    };
                    let speed = if goal > 0.0 {
                        self.config.viseme_on_speed
                    } else {
                        self.config.viseme_off_speed
                    };
                    (goal, speed)
                }
                Layer::Expression => (expression.weight(&name), self.config.expression_speed),
            };

            let weight = self.weights.approach(&name, goal, speed);
            sink.set_weight(&name, weight);
            written += 1;
        }

        FrameReport {
            active_viseme: active.map(|(target, _)| target),
            viseme_target: active.map(|(_, weight)| weight).unwrap_or(0.0),
            eyes,
            setup_mode: false,
            targets_written: written,
        }
    }
}

impl std::fmt::Debug for FrameBlender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBlender")
            .field("config", &self.config)
            .field("viseme_map", &self.viseme_map)
            .field("setup_mode", &self.setup_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::sink::{AvatarRig, MeshMorphTargets};
    use rand::SeedableRng;

    fn blender() -> FrameBlender {
        // Push the first autonomous blink far out so it never interferes
        let blink = BlinkConfig {
            min_interval_ms: 60_000,
            max_interval_ms: 60_000,
            ..Default::default()
        };
        FrameBlender::with_rng(AnimationConfig::default().with_blink(blink), StdRng::seed_from_u64(1))
    }

    fn frame(now_ms: u64, expression_id: &str, lipsync: LipsyncFrame) -> FrameInput<'_> {
        FrameInput {
            now_ms,
            expression_id,
            lipsync,
        }
    }

    #[test]
    fn test_expression_converges_at_expression_speed() {
        let mut blender = blender();
        let mut rig = AvatarRig::arkit_head();
        let smile = ExpressionCatalog::builtin().lookup("smile").clone();
        let (target, goal) = smile.iter().next().map(|(k, v)| (k.to_string(), v)).unwrap();

        blender.tick(&frame(0, "smile", LipsyncFrame::Silent), &mut rig);
        assert!((rig.weight(&target).unwrap() - goal * 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_viseme_drives_single_target() {
        let mut blender = blender();
        let mut rig = AvatarRig::arkit_head();
        let report = blender.tick(&frame(0, "default", LipsyncFrame::Viseme("viseme_PP")), &mut rig);
        assert_eq!(report.active_viseme, Some("viseme_PP"));
        assert!((rig.weight("viseme_PP").unwrap() - 0.2).abs() < 1e-6);
        for target in blender.viseme_map().controlled_targets() {
            if target != "viseme_PP" {
                assert_eq!(rig.weight(target), Some(0.0), "{}", target);
            }
        }
    }

    #[test]
    fn test_switching_viseme_relaxes_previous_at_off_speed() {
        let mut blender = blender();
        let mut rig = AvatarRig::arkit_head();
        for i in 0..30 {
            blender.tick(&frame(i * 16, "default", LipsyncFrame::Viseme("viseme_PP")), &mut rig);
        }
        let before = rig.weight("viseme_PP").unwrap();
        blender.tick(&frame(500, "default", LipsyncFrame::Viseme("viseme_aa")), &mut rig);
        assert!((rig.weight("viseme_PP").unwrap() - before * 0.9).abs() < 1e-6);
        assert!((rig.weight("viseme_aa").unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_openness_from_volume() {
        let mut blender = blender();
        let mut rig = AvatarRig::arkit_head();
        let report = blender.tick(&frame(0, "default", LipsyncFrame::Openness(0.3)), &mut rig);
        assert_eq!(report.active_viseme, Some("viseme_aa"));
        assert!((report.viseme_target - 0.6).abs() < 1e-6);

        let loud = blender.tick(&frame(16, "default", LipsyncFrame::Openness(0.9)), &mut rig);
        assert_eq!(loud.viseme_target, 1.0);

        let quiet = blender.tick(&frame(32, "default", LipsyncFrame::Openness(0.0)), &mut rig);
        assert_eq!(quiet.active_viseme, None);
    }

    #[test]
    fn test_blink_overlay_and_winks() {
        let mut blender = blender();
        let mut rig = AvatarRig::arkit_head();
        blender.wink_left(0);
        let report = blender.tick(&frame(0, "default", LipsyncFrame::Silent), &mut rig);
        assert!(report.eyes.left && !report.eyes.right);
        assert_eq!(rig.weight(EYE_BLINK_LEFT), Some(0.5));
        assert_eq!(rig.weight(EYE_BLINK_RIGHT), Some(0.0));

        // Reopening uses the slow speed
        blender.tick(&frame(400, "default", LipsyncFrame::Silent), &mut rig);
        assert!((rig.weight(EYE_BLINK_LEFT).unwrap() - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_blink_targets_ignore_expression() {
        let mut blender = blender();
        let mut rig = AvatarRig::arkit_head();
        // "wink" closes one eye in the catalog, but the overlay owns the eyes
        for i in 0..20 {
            blender.tick(&frame(i * 16, "wink", LipsyncFrame::Silent), &mut rig);
        }
        assert_eq!(rig.weight(EYE_BLINK_LEFT), Some(0.0));
        assert_eq!(rig.weight(EYE_BLINK_RIGHT), Some(0.0));
    }

    #[test]
    fn test_setup_mode_suspends_blending() {
        let mut blender = blender();
        let mut rig = AvatarRig::arkit_head();
        assert!(!blender.set_manual_weight(&mut rig, "jawOpen", 0.5));

        blender.set_setup_mode(true, 0);
        assert!(blender.set_manual_weight(&mut rig, "jawOpen", 0.5));
        let report = blender.tick(&frame(16, "smile", LipsyncFrame::Viseme("viseme_aa")), &mut rig);
        assert!(report.setup_mode);
        assert_eq!(report.targets_written, 0);
        assert_eq!(rig.weight("jawOpen"), Some(0.5));
        assert_eq!(rig.weight("viseme_aa"), Some(0.0));

        let captured = blender.capture_expression();
        assert_eq!(captured.weight("jawOpen"), 0.5);

        blender.set_setup_mode(false, 32);
        assert!(!blender.setup_mode());
    }

    #[test]
    fn test_missing_targets_are_skipped() {
        let mut blender = blender();
        let mut mesh = MeshMorphTargets::new("box", ["jawOpen"]);
        let report = blender.tick(&frame(0, "smile", LipsyncFrame::Viseme("viseme_aa")), &mut mesh);
        assert_eq!(report.targets_written, 1);
        assert_eq!(mesh.weight("viseme_aa"), None);
    }

    #[test]
    fn test_config_validation() {
        assert!(AnimationConfig::default().validate().is_ok());
        let bad = AnimationConfig {
            openness_target: "jawOpen".to_string(),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = AnimationConfig {
            expression_speed: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
