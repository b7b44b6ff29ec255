//! Per-frame face animation: weight smoothing, blink overlay, layer blending
//! and the driver that feeds them from the lifecycle controller.

pub mod blender;
pub mod blink;
pub mod driver;
pub mod sink;
pub mod weights;

pub use blender::{AnimationConfig, FrameBlender, FrameInput, FrameReport, LipsyncFrame};
pub use blink::{BlinkConfig, BlinkScheduler, EyeClosure, EYE_BLINK_LEFT, EYE_BLINK_RIGHT};
pub use driver::{spawn_render_loop, AvatarDriver};
pub use sink::{AvatarRig, MeshMorphTargets, MorphTargetSink, ARKIT_WITH_VISEMES};
pub use weights::{lerp, MorphWeightVector};
