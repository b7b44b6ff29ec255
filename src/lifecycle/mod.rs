//! Message lifecycle: the utterance queue, playback sinks and the events the
//! render side follows.

pub mod controller;
pub mod message;
pub mod playback;

pub use controller::{
    CueProvider, LifecycleCommand, LifecycleConfig, LifecycleController, LifecycleEvent, LifecycleHandle,
};
pub use message::{
    ActiveUtterance, CompletionReason, LipsyncSource, PlaybackMessage, DEFAULT_ANIMATION,
    DEFAULT_EXPRESSION, IDLE_ANIMATION,
};
pub use playback::{ClockPlaybackSink, PlaybackClock, PlaybackSession, PlaybackSink};
