//! Integration layer: configuration and runtime wiring

pub mod config;
pub mod runtime;

pub use config::{AvatarConfig, PathsConfig, SynthesizerKind};
pub use runtime::{AvatarRuntime, AvatarRuntimeBuilder, PlaybackSummary, RuntimeHandle};
