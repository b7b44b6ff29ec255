//! Viseme cue timelines and the external tools that produce them.

pub mod extractor;
mod process;
pub mod service;
pub mod timeline;
pub mod transcoder;

pub use extractor::{PhonemeExtractor, Recognizer, RhubarbExtractor};
pub use service::LipsyncService;
pub use timeline::{CueTimeline, MouthCue, TimelineMetadata};
pub use transcoder::{AudioTranscoder, FfmpegTranscoder};
