//! Local VITS synthesis with sherpa-rs

use super::synthesizer::{clean_text_for_speech, SpeechSynthesizer};
use super::voice::VoiceConfig;
use crate::audio::wav::encode_wav;
use crate::audio::AudioClip;
use crate::{MouthpieceError, Result};
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Sender};
use serde::{Deserialize, Serialize};
use sherpa_rs::tts::{VitsTts, VitsTtsConfig};
use std::path::Path;
use std::thread;
use tokio::sync::oneshot;
use tracing::{debug, info};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VitsConfig {
    /// Path to the ONNX model file
    pub model_path: String,

    /// Path to the tokens file
    pub tokens_path: String,

    /// Optional for some models
    pub lexicon_path: Option<String>,

    /// espeak-ng data directory
    pub data_dir: Option<String>,

    pub speaker_id: i32,
}

impl VitsConfig {
    pub fn new(model_path: impl Into<String>, tokens_path: impl Into<String>) -> Self {
        Self {
            model_path: model_path.into(),
            tokens_path: tokens_path.into(),
            ..Default::default()
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<String>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }
}

struct Request {
    text: String,
    speed: f32,
    gain: f32,
    reply: oneshot::Sender<Result<AudioClip>>,
}

/// VITS engine owned by a worker thread; requests are served in order
pub struct VitsSynthesizer {
    requests: Sender<Request>,
}

impl VitsSynthesizer {
    pub fn new(config: VitsConfig) -> Result<Self> {
        if config.model_path.is_empty() {
            return Err(MouthpieceError::ConfigError("Model path is required".into()));
        }
        if config.tokens_path.is_empty() {
            return Err(MouthpieceError::ConfigError("Tokens path is required".into()));
        }
        for path in [&config.model_path, &config.tokens_path] {
            if !Path::new(path).exists() {
                return Err(MouthpieceError::ModelLoadError(format!("Not found: {}", path)));
            }
        }

        let (requests, request_rx) = unbounded::<Request>();
        thread::Builder::new()
            .name("mouthpiece-vits".into())
            .spawn(move || {
                info!("Loading VITS TTS model from: {}", config.model_path);
                let vits_config = VitsTtsConfig {
                    model: config.model_path.clone(),
                    tokens: config.tokens_path.clone(),
                    lexicon: config.lexicon_path.clone().unwrap_or_default(),
                    data_dir: config.data_dir.clone().unwrap_or_default(),
                    ..Default::default()
                };
                let mut tts = VitsTts::new(vits_config);
                info!("TTS engine initialized successfully");

                while let Ok(request) = request_rx.recv() {
                    let result = render(&mut tts, config.speaker_id, &request);
                    let _ = request.reply.send(result);
                }
                debug!("VITS worker shutting down");
            })
            .map_err(|e| MouthpieceError::ModelLoadError(format!("Failed to spawn TTS worker: {}", e)))?;

        Ok(Self { requests })
    }
}

fn render(tts: &mut VitsTts, speaker_id: i32, request: &Request) -> Result<AudioClip> {
    if request.text.is_empty() {
        return Ok(AudioClip::new(encode_wav(&[], 16000)?));
    }
    debug!("Synthesizing: {}", request.text);
    let audio = tts
        .create(&request.text, speaker_id, request.speed)
        .map_err(|e| MouthpieceError::SpeechError(format!("Synthesis failed: {}", e)))?;
    let samples: Vec<f32> = audio.samples.iter().map(|s| s * request.gain).collect();
    Ok(AudioClip::new(encode_wav(&samples, audio.sample_rate as u32)?))
}

#[async_trait]
impl SpeechSynthesizer for VitsSynthesizer {
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<AudioClip> {
        let voice = voice.clamped();
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request {
                text: clean_text_for_speech(text),
                speed: voice.rate,
                gain: voice.volume,
                reply,
            })
            .map_err(|_| MouthpieceError::ChannelError("TTS worker is gone".into()))?;
        response
            .await
            .map_err(|_| MouthpieceError::SpeechError("TTS worker dropped the request".into()))?
    }
}
