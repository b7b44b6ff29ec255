//! Chat turn payload as exchanged with the transport layer.

use crate::audio::AudioClip;
use crate::lifecycle::PlaybackMessage;
use crate::lipsync::CueTimeline;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// Most messages a single chat turn may carry
pub const MAX_MESSAGES: usize = 3;

/// Expressions a responder may ask for. Anything else reads as `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum FacialExpression {
    Smile,
    Sad,
    Angry,
    Surprised,
    FunnyFace,
    #[default]
    Default,
}

impl FacialExpression {
    pub const ALL: [FacialExpression; 6] = [
        FacialExpression::Smile,
        FacialExpression::Sad,
        FacialExpression::Angry,
        FacialExpression::Surprised,
        FacialExpression::FunnyFace,
        FacialExpression::Default,
    ];

    /// Catalog id of the expression
    pub fn as_str(self) -> &'static str {
        match self {
            FacialExpression::Smile => "smile",
            FacialExpression::Sad => "sad",
            FacialExpression::Angry => "angry",
            FacialExpression::Surprised => "surprised",
            FacialExpression::FunnyFace => "funnyFace",
            FacialExpression::Default => "default",
        }
    }

    pub fn parse_lenient(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == value.trim())
            .unwrap_or_default()
    }
}

impl From<String> for FacialExpression {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl Serialize for FacialExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for FacialExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body animation clips of the avatar rig. Anything else reads as `Talking_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Animation {
    #[default]
    Talking0,
    Talking1,
    Talking2,
    Crying,
    Laughing,
    Rumba,
    Idle,
    Terrified,
    Angry,
}

impl Animation {
    pub const ALL: [Animation; 9] = [
        Animation::Talking0,
        Animation::Talking1,
        Animation::Talking2,
        Animation::Crying,
        Animation::Laughing,
        Animation::Rumba,
        Animation::Idle,
        Animation::Terrified,
        Animation::Angry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Animation::Talking0 => "Talking_0",
            Animation::Talking1 => "Talking_1",
            Animation::Talking2 => "Talking_2",
            Animation::Crying => "Crying",
            Animation::Laughing => "Laughing",
            Animation::Rumba => "Rumba",
            Animation::Idle => "Idle",
            Animation::Terrified => "Terrified",
            Animation::Angry => "Angry",
        }
    }

    pub fn parse_lenient(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == value.trim())
            .unwrap_or_default()
    }
}

impl From<String> for Animation {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl Serialize for Animation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One spoken message of a chat turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub text: String,
    #[serde(default)]
    pub facial_expression: FacialExpression,
    #[serde(default)]
    pub animation: Animation,
    /// Base64 encoded audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lipsync: Option<CueTimeline>,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, facial_expression: FacialExpression, animation: Animation) -> Self {
        Self {
            text: text.into(),
            facial_expression,
            animation,
            audio: None,
            lipsync: None,
        }
    }

    pub fn with_audio_bytes(mut self, bytes: &[u8]) -> Self {
        self.audio = Some(STANDARD.encode(bytes));
        self
    }

    pub fn with_lipsync(mut self, timeline: CueTimeline) -> Self {
        self.lipsync = Some(timeline);
        self
    }

    /// Decoded audio; invalid base64 counts as no audio
    pub fn audio_clip(&self) -> Option<AudioClip> {
        let encoded = self.audio.as_deref()?;
        match STANDARD.decode(encoded.trim()) {
            Ok(bytes) if !bytes.is_empty() => Some(AudioClip::new(bytes)),
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring undecodable audio payload: {}", e);
                None
            }
        }
    }

    pub fn to_playback_message(&self) -> PlaybackMessage {
        let mut message = PlaybackMessage::new(self.text.clone())
            .with_expression(self.facial_expression.as_str())
            .with_animation(self.animation.as_str());
        if let Some(clip) = self.audio_clip() {
            message = message.with_audio(clip);
        }
        if let Some(timeline) = &self.lipsync {
            message = message.with_cues(timeline.clone());
        }
        message
    }
}

/// A full chat turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
}

impl ChatResponse {
    pub fn new(mut messages: Vec<ChatMessage>) -> Self {
        messages.truncate(MAX_MESSAGES);
        Self { messages }
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        let response: ChatResponse = serde_json::from_str(json)?;
        Ok(Self::new(response.messages))
    }

    pub fn to_playback_messages(&self) -> Vec<PlaybackMessage> {
        self.messages.iter().map(ChatMessage::to_playback_message).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::wav::encode_wav;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wire_names() {
        let msg = ChatMessage::new("Hey dear...", FacialExpression::FunnyFace, Animation::Talking1);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "Hey dear...", "facialExpression": "funnyFace", "animation": "Talking_1"})
        );
    }

    #[test]
    fn test_unknown_enum_values_default() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"text":"hi","facialExpression":"ecstatic","animation":"Moonwalk"}"#).unwrap();
        assert_eq!(msg.facial_expression, FacialExpression::Default);
        assert_eq!(msg.animation, Animation::Talking0);

        let msg: ChatMessage = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(msg.facial_expression, FacialExpression::Default);
    }

    #[test]
    fn test_to_playback_message() {
        let wav = encode_wav(&[0.1; 160], 16000).unwrap();
        let timeline = CueTimeline::from_json(r#"{"mouthCues":[{"start":0,"end":0.2,"value":"A"}]}"#).unwrap();
        let msg = ChatMessage::new("Hi sweetie!", FacialExpression::Smile, Animation::Talking2)
            .with_audio_bytes(&wav)
            .with_lipsync(timeline);

        let playback = msg.to_playback_message();
        assert_eq!(playback.text, "Hi sweetie!");
        assert_eq!(playback.expression_id, "smile");
        assert_eq!(playback.animation_id, "Talking_2");
        assert!(playback.has_audio());
        assert!(playback.has_cues());
    }

    #[test]
    fn test_invalid_base64_is_no_audio() {
        let mut msg = ChatMessage::new("x", FacialExpression::Sad, Animation::Crying);
        msg.audio = Some("%%% not base64 %%%".into());
        assert!(msg.audio_clip().is_none());
        assert!(!msg.to_playback_message().has_audio());
    }

    #[test]
    fn test_response_caps_messages() {
        let msgs = vec![ChatMessage::new("a", FacialExpression::Default, Animation::Idle); 5];
        assert_eq!(ChatResponse::new(msgs).messages.len(), MAX_MESSAGES);
    }
}
