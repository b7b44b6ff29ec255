//! One chat turn: reply generation, speech and cues for every message.

use super::history::{ChatHistory, ChatTurn};
use super::types::{Animation, ChatMessage, ChatResponse, FacialExpression};
use crate::audio::AudioClip;
use crate::lipsync::{CueTimeline, LipsyncService};
use crate::llm::{build_prompt, parse_reply, responder_failure_reply, LlmResponder};
use crate::speech::{clean_text_for_speech, SpeechSynthesizer, VoiceConfig};
use crate::utils::{PipelineMetrics, Stopwatch};
use crate::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::future::join_all;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const APOLOGY_TEXT: &str = "Oh no! Something went wrong on my end. Can you try again?";

/// Messages greeting the user when the turn carries no text
pub fn intro_messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::new("Hey dear... How was your day?", FacialExpression::Smile, Animation::Talking1),
        ChatMessage::new(
            "I missed you so much... Please don't go for so long!",
            FacialExpression::Sad,
            Animation::Crying,
        ),
    ]
}

pub fn apology_reply() -> ChatMessage {
    ChatMessage::new(APOLOGY_TEXT, FacialExpression::Sad, Animation::Crying)
}

/// Read a file and encode it as standard base64
pub async fn audio_file_to_base64(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(STANDARD.encode(bytes))
}

pub struct ChatService {
    responder: Arc<dyn LlmResponder>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    lipsync: Option<Arc<LipsyncService>>,
    voice: VoiceConfig,
    audios_dir: PathBuf,
    history: ChatHistory,
    last_metrics: Mutex<PipelineMetrics>,
}

impl ChatService {
    pub fn new(responder: Arc<dyn LlmResponder>, audios_dir: impl Into<PathBuf>) -> Self {
        Self {
            responder,
            synthesizer: None,
            lipsync: None,
            voice: VoiceConfig::default(),
            audios_dir: audios_dir.into(),
            history: ChatHistory::new(),
            last_metrics: Mutex::new(PipelineMetrics::default()),
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    pub fn with_lipsync(mut self, lipsync: Arc<LipsyncService>) -> Self {
        self.lipsync = Some(lipsync);
        self
    }

    pub fn with_voice(mut self, voice: VoiceConfig) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_history(mut self, history: ChatHistory) -> Self {
        self.history = history;
        self
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Stage timings of the most recent answered turn
    pub fn last_metrics(&self) -> PipelineMetrics {
        self.last_metrics.lock().clone()
    }

    /// Produce the reply for one user turn. Never fails: every error
    /// degrades to fewer attachments or a fixed apology.
    pub async fn process_message(&self, user_message: Option<&str>) -> ChatResponse {
        let text = user_message.map(str::trim).filter(|t| !t.is_empty());

        let messages = match text {
            None => self.intro().await,
            Some(text) => {
                self.history.add(ChatTurn::user(text));
                match self.reply(text).await {
                    Ok(messages) => messages,
                    Err(e) => {
                        error!("Chat turn failed: {}", e);
                        vec![apology_reply()]
                    }
                }
            }
        };

        self.history.record_reply(&messages);
        ChatResponse::new(messages)
    }

    async fn reply(&self, text: &str) -> Result<Vec<ChatMessage>> {
        if self.synthesizer.is_some() {
            tokio::fs::create_dir_all(&self.audios_dir).await?;
        }
        let mut stopwatch = Stopwatch::start();

        let messages = match self.responder.generate(&build_prompt(text)).await {
            Ok(raw) => parse_reply(&raw),
            Err(e) => {
                warn!("Responder failed: {}", e);
                vec![responder_failure_reply()]
            }
        };
        stopwatch.split("responder");
        info!("Responder produced {} message(s)", messages.len());

        let turn = Uuid::new_v4().simple().to_string();
        let enriched = messages
            .into_iter()
            .enumerate()
            .map(|(index, message)| self.attach_speech(format!("message_{}_{}", turn, index), message));
        let messages = join_all(enriched).await;
        stopwatch.split("speech");

        let responder_ms = stopwatch.splits()[0].1.as_millis() as u64;
        let metrics = PipelineMetrics {
            responder_ms: Some(responder_ms),
            speech_ms: Some(stopwatch.elapsed_ms().saturating_sub(responder_ms)),
            messages: messages.len(),
        };
        debug!("Chat turn timings: {}", metrics.summary());
        *self.last_metrics.lock() = metrics;
        Ok(messages)
    }

    /// Add audio and cues to a message; on any failure the message goes out as text only
    async fn attach_speech(&self, name: String, message: ChatMessage) -> ChatMessage {
        let Some(synthesizer) = &self.synthesizer else {
            return message;
        };

        let clip = match synthesizer.synthesize(&clean_text_for_speech(&message.text), &self.voice).await {
            Ok(clip) if !clip.is_empty() => clip,
            Ok(_) => {
                warn!("Synthesizer returned no audio for {}", name);
                return message;
            }
            Err(e) => {
                warn!("Speech synthesis failed for {}: {}", name, e);
                return message;
            }
        };

        let message = message.with_audio_bytes(clip.bytes());
        match self.cues_for(&name, &clip).await {
            Some(timeline) => message.with_lipsync(timeline),
            None => message,
        }
    }

    async fn cues_for(&self, name: &str, clip: &AudioClip) -> Option<CueTimeline> {
        let lipsync = self.lipsync.as_ref()?;
        match lipsync.generate_for_clip(name, clip).await {
            Ok(timeline) => Some(timeline),
            Err(e) => {
                warn!("Lip sync failed for {}: {}", name, e);
                None
            }
        }
    }

    async fn intro(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::new();
        for (index, message) in intro_messages().into_iter().enumerate() {
            let wav = self.audios_dir.join(format!("intro_{}.wav", index));
            let json = self.audios_dir.join(format!("intro_{}.json", index));
            messages.push(self.with_prerendered(message, &wav, &json).await);
        }
        messages
    }

    async fn with_prerendered(&self, message: ChatMessage, wav: &Path, json: &Path) -> ChatMessage {
        let message = match audio_file_to_base64(wav).await {
            Ok(audio) => ChatMessage {
                audio: Some(audio),
                ..message
            },
            Err(e) => {
                debug!("No intro audio at {:?}: {}", wav, e);
                return message;
            }
        };

        match tokio::fs::read_to_string(json).await {
            Ok(text) => match CueTimeline::from_json(&text) {
                Ok(timeline) => message.with_lipsync(timeline),
                Err(e) => {
                    warn!("Ignoring malformed intro cues {:?}: {}", json, e);
                    message
                }
            },
            Err(e) => {
                debug!("No intro cues at {:?}: {}", json, e);
                message
            }
        }
    }
}
