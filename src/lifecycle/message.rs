use super::playback::PlaybackClock;
use crate::audio::{AudioClip, AudioRingBuffer, PcmAudio, SyntheticEnvelope};
use crate::lipsync::CueTimeline;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_EXPRESSION: &str = "default";
pub const DEFAULT_ANIMATION: &str = "Talking_0";
pub const IDLE_ANIMATION: &str = "Idle";

/// One utterance waiting to be spoken
#[derive(Debug, Clone)]
pub struct PlaybackMessage {
    pub id: Uuid,
    pub text: String,
    pub expression_id: String,
    pub animation_id: String,
    pub audio: Option<AudioClip>,
    pub cue_timeline: Option<Arc<CueTimeline>>,
}

impl PlaybackMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            expression_id: DEFAULT_EXPRESSION.to_string(),
            animation_id: DEFAULT_ANIMATION.to_string(),
            audio: None,
            cue_timeline: None,
        }
    }

    pub fn with_expression(mut self, expression_id: impl Into<String>) -> Self {
        self.expression_id = expression_id.into();
        self
    }

    pub fn with_animation(mut self, animation_id: impl Into<String>) -> Self {
        self.animation_id = animation_id.into();
        self
    }

    pub fn with_audio(mut self, audio: AudioClip) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_cues(mut self, timeline: CueTimeline) -> Self {
        self.cue_timeline = Some(Arc::new(timeline));
        self
    }

    pub fn has_audio(&self) -> bool {
        self.audio.as_ref().is_some_and(|a| !a.is_empty())
    }

    pub fn has_cues(&self) -> bool {
        self.cue_timeline.as_ref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// Audio or the text-only timer ran out
    Finished,
    /// The sink reported an interruption; treated like a normal finish
    Interrupted,
    /// Skipped by the user, queue continues
    Skipped,
    /// Stopped by the user, queue cleared
    Stopped,
    /// The sink failed mid-playback
    Failed,
}

impl CompletionReason {
    pub fn is_natural(self) -> bool {
        matches!(self, CompletionReason::Finished | CompletionReason::Interrupted)
    }
}

/// Where the mouth gets its motion from during one utterance
#[derive(Debug, Clone)]
pub enum LipsyncSource {
    /// Discrete viseme cues
    Timeline(Arc<CueTimeline>),
    /// Samples the device has played, drained per frame
    Tap(AudioRingBuffer),
    /// Decoded audio windowed at the playback position
    Clip(Arc<PcmAudio>),
    /// Text-derived loudness curve
    Synthetic(SyntheticEnvelope),
    /// Mouth stays at rest
    Closed,
}

impl LipsyncSource {
    pub fn kind(&self) -> &'static str {
        match self {
            LipsyncSource::Timeline(_) => "timeline",
            LipsyncSource::Tap(_) => "tap",
            LipsyncSource::Clip(_) => "clip",
            LipsyncSource::Synthetic(_) => "synthetic",
            LipsyncSource::Closed => "closed",
        }
    }

    pub fn is_envelope(&self) -> bool {
        matches!(self, LipsyncSource::Tap(_) | LipsyncSource::Clip(_) | LipsyncSource::Synthetic(_))
    }
}

/// Everything the render side needs about the message now playing
#[derive(Debug, Clone)]
pub struct ActiveUtterance {
    pub id: Uuid,
    pub text: String,
    pub expression_id: String,
    pub animation_id: String,
    pub lipsync: LipsyncSource,
    pub clock: PlaybackClock,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lipsync::MouthCue;

    #[test]
    fn test_message_builder() {
        let msg = PlaybackMessage::new("Hi sweetie!")
            .with_expression("smile")
            .with_animation("Talking_1");
        assert_eq!(msg.expression_id, "smile");
        assert_eq!(msg.animation_id, "Talking_1");
        assert!(!msg.has_audio());
        assert!(!msg.has_cues());

        let msg = msg.with_cues(CueTimeline::new(vec![MouthCue::new(0.0, 0.2, "A")]));
        assert!(msg.has_cues());
        assert!(!msg.clone().with_audio(AudioClip::new(Vec::new())).has_audio());
    }

    #[test]
    fn test_default_message() {
        let msg = PlaybackMessage::new("hello");
        assert_eq!(msg.expression_id, DEFAULT_EXPRESSION);
        assert_eq!(msg.animation_id, DEFAULT_ANIMATION);
        assert_ne!(msg.id, PlaybackMessage::new("hello").id);
    }

    #[test]
    fn test_completion_reasons() {
        assert!(CompletionReason::Interrupted.is_natural());
        assert!(!CompletionReason::Skipped.is_natural());
        assert_eq!(LipsyncSource::Closed.kind(), "closed");
        assert!(!LipsyncSource::Closed.is_envelope());
    }
}
