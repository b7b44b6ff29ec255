//! Configuration for the whole avatar runtime
//!
//! Loaded from TOML, then overridden from the environment.

use crate::animation::AnimationConfig;
use crate::audio::{AnalyzerConfig, EnvelopeConfig};
use crate::lifecycle::LifecycleConfig;
use crate::llm::LLMConfig;
#[cfg(feature = "vits-tts")]
use crate::speech::VitsConfig;
use crate::speech::VoiceConfig;
use crate::{MouthpieceError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where generated audio, cue JSON and intro clips live
    pub audios_dir: PathBuf,

    pub rhubarb: PathBuf,

    pub ffmpeg: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            audios_dir: PathBuf::from("./audios"),
            rhubarb: PathBuf::from("./bin/rhubarb"),
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }
}

/// Which engine turns reply text into audio
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesizerKind {
    /// Replies are text-only
    None,
    /// Placeholder tone shaped like speech
    #[default]
    Hum,
    /// Local VITS model (requires the `vits-tts` feature)
    Vits,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    pub animation: AnimationConfig,
    pub envelope: EnvelopeConfig,
    pub analyzer: AnalyzerConfig,
    pub lifecycle: LifecycleConfig,
    pub paths: PathsConfig,
    pub voice: VoiceConfig,
    pub llm: LLMConfig,
    pub synthesizer: SynthesizerKind,
    #[cfg(feature = "vits-tts")]
    pub vits: VitsConfig,

    /// Render loop rate
    pub fps: u32,

    /// Extract cues with the external tools when speech is synthesized
    pub extract_cues: bool,
}

impl AvatarConfig {
    /// Parse a TOML file and apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| MouthpieceError::IOError(format!("Failed to read {}: {}", path.display(), e)))?;
        let mut config = Self::from_toml(&content)
            .map_err(|e| MouthpieceError::ConfigError(format!("{}: {}", path.display(), e)))?;
        config.apply_env();
        config.validate().map_err(MouthpieceError::ConfigError)?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MouthpieceError::ConfigError(e.to_string()))
    }

    pub fn with_paths(mut self, paths: PathsConfig) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: SynthesizerKind) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_cue_extraction(mut self, enabled: bool) -> Self {
        self.extract_cues = enabled;
        self
    }

    /// Override from process environment variables
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Override from any key lookup; unparseable numbers are ignored
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("AUDIOS_DIR") {
            self.paths.audios_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("RHUBARB_PATH") {
            self.paths.rhubarb = PathBuf::from(path);
        }
        if let Some(path) = lookup("FFMPEG_PATH") {
            self.paths.ffmpeg = PathBuf::from(path);
        }
        if let Some(voice) = lookup("DEFAULT_VOICE_ID") {
            self.voice.voice_id = voice;
        }
        if let Some(model) = lookup("TTS_MODEL") {
            self.voice.model_id = model;
        }
        parse_into(&lookup, "TTS_STABILITY", &mut self.voice.stability);
        parse_into(&lookup, "TTS_SIMILARITY_BOOST", &mut self.voice.similarity_boost);
        parse_into(&lookup, "TTS_STYLE", &mut self.voice.style);
        parse_into(&lookup, "LIPSYNC_TIMEOUT_MS", &mut self.lifecycle.cue_timeout_ms);
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.animation.validate().map_err(|e| format!("animation: {}", e))?;
        self.envelope.validate().map_err(|e| format!("envelope: {}", e))?;
        self.analyzer.validate().map_err(|e| format!("analyzer: {}", e))?;
        self.lifecycle.validate().map_err(|e| format!("lifecycle: {}", e))?;
        self.voice.validate().map_err(|e| format!("voice: {}", e))?;
        self.llm.validate().map_err(|e| format!("llm: {}", e))?;
        if self.fps == 0 || self.fps > 240 {
            return Err(format!("fps must be in 1..=240, got {}", self.fps));
        }
        #[cfg(not(feature = "vits-tts"))]
        if self.synthesizer == SynthesizerKind::Vits {
            return Err("the vits synthesizer requires the `vits-tts` feature".to_string());
        }
        Ok(())
    }
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            envelope: EnvelopeConfig::default(),
            analyzer: AnalyzerConfig::default(),
            lifecycle: LifecycleConfig::default(),
            paths: PathsConfig::default(),
            voice: VoiceConfig::default(),
            llm: LLMConfig::default(),
            synthesizer: SynthesizerKind::default(),
            #[cfg(feature = "vits-tts")]
            vits: VitsConfig::default(),
            fps: 60,
            extract_cues: true,
        }
    }
}

fn parse_into<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => {
            debug!("{} overridden from environment", key);
            *slot = value;
        }
        Err(_) => warn!("Ignoring unparseable {}={:?}", key, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viseme::VisemeMapping;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AvatarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.paths.audios_dir, PathBuf::from("./audios"));
        assert_eq!(config.lifecycle.cue_timeout_ms, 30_000);
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn test_partial_toml() {
        let config = AvatarConfig::from_toml(
            r#"
            fps = 30

            [animation]
            viseme_mapping = "alternate"
            lipsync_sensitivity = 1.5

            [paths]
            rhubarb = "/opt/rhubarb/rhubarb"
            "#,
        )
        .unwrap();
        assert_eq!(config.fps, 30);
        assert_eq!(config.animation.viseme_mapping, VisemeMapping::Alternate);
        assert_eq!(config.animation.expression_speed, 0.1);
        assert_eq!(config.paths.rhubarb, PathBuf::from("/opt/rhubarb/rhubarb"));
        assert_eq!(config.paths.ffmpeg, PathBuf::from("ffmpeg"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AvatarConfig::default().with_fps(24);
        let parsed = AvatarConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.fps, 24);
        assert_eq!(parsed.voice, config.voice);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("AUDIOS_DIR", "/tmp/audios"),
            ("DEFAULT_VOICE_ID", "voice-42"),
            ("TTS_STABILITY", "0.25"),
            ("TTS_STYLE", "loud"),
            ("LIPSYNC_TIMEOUT_MS", "5000"),
        ]);
        let mut config = AvatarConfig::default();
        config.apply_env_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.paths.audios_dir, PathBuf::from("/tmp/audios"));
        assert_eq!(config.voice.voice_id, "voice-42");
        assert_eq!(config.voice.stability, 0.25);
        // unparseable value keeps the default
        assert_eq!(config.voice.style, 0.2);
        assert_eq!(config.lifecycle.cue_timeout_ms, 5000);
    }

    #[test]
    fn test_validation_names_section() {
        let mut config = AvatarConfig::default();
        config.animation.expression_speed = 0.0;
        assert!(config.validate().unwrap_err().starts_with("animation:"));

        let config = AvatarConfig::default().with_fps(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.toml");
        std::fs::write(&path, "extract_cues = false\n").unwrap();
        let config = AvatarConfig::load(&path).unwrap();
        assert!(!config.extract_cues);

        std::fs::write(&path, "fps = \"fast\"\n").unwrap();
        assert!(matches!(AvatarConfig::load(&path), Err(MouthpieceError::ConfigError(_))));
        assert!(AvatarConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
