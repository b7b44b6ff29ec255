use super::process::{run_tool, stderr_text};
use super::timeline::CueTimeline;
use crate::{MouthpieceError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Derives a cue timeline from a waveform file
#[async_trait]
pub trait PhonemeExtractor: Send + Sync {
    /// Analyze `wav` and leave the serialized timeline at `output_json`
    async fn extract(&self, wav: &Path, output_json: &Path) -> Result<CueTimeline>;
}

/// Rhubarb speech recognizer backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recognizer {
    /// Language independent, works for any voice
    #[default]
    Phonetic,
    /// English dictionary based
    PocketSphinx,
}

impl Recognizer {
    pub fn as_arg(self) -> &'static str {
        match self {
            Recognizer::Phonetic => "phonetic",
            Recognizer::PocketSphinx => "pocketSphinx",
        }
    }
}

/// Runs `rhubarb -f json -o <out> <wav> -r <recognizer>`
#[derive(Debug, Clone)]
pub struct RhubarbExtractor {
    binary: PathBuf,
    recognizer: Recognizer,
}

impl RhubarbExtractor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            recognizer: Recognizer::default(),
        }
    }

    pub fn with_recognizer(mut self, recognizer: Recognizer) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl PhonemeExtractor for RhubarbExtractor {
    async fn extract(&self, wav: &Path, output_json: &Path) -> Result<CueTimeline> {
        debug!("Running Rhubarb on {:?}", wav);

        let output = run_tool(
            &self.binary,
            [
                OsStr::new("-f"),
                OsStr::new("json"),
                OsStr::new("-o"),
                output_json.as_os_str(),
                wav.as_os_str(),
                OsStr::new("-r"),
                OsStr::new(self.recognizer.as_arg()),
            ],
        )
        .await
        .map_err(|e| MouthpieceError::LipsyncError(format!("Failed to run {:?}: {}", self.binary, e)))?;

        let stderr = stderr_text(&output);
        if !output.status.success() {
            error!("Rhubarb execution failed: {}", stderr);
            return Err(MouthpieceError::LipsyncError(format!(
                "rhubarb exited with {}: {}",
                output.status, stderr
            )));
        }
        // Rhubarb reports progress on stderr; only the rest is worth a warning
        for line in stderr.lines().filter(|l| !l.is_empty() && !l.contains("Info:")) {
            warn!("Rhubarb stderr: {}", line);
        }

        let json = tokio::fs::read_to_string(output_json)
            .await
            .map_err(|e| MouthpieceError::LipsyncError(format!("Failed to read lipsync data: {}", e)))?;
        let timeline = CueTimeline::from_json(&json)?;
        debug!("Rhubarb produced {} cues", timeline.len());
        Ok(timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_lipsync_error() {
        let extractor = RhubarbExtractor::new("/definitely/not/rhubarb");
        let err = extractor
            .extract(Path::new("/tmp/a.wav"), Path::new("/tmp/a.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, MouthpieceError::LipsyncError(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_recognizer_args() {
        assert_eq!(Recognizer::default().as_arg(), "phonetic");
        assert_eq!(Recognizer::PocketSphinx.as_arg(), "pocketSphinx");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_parses_tool_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("rhubarb");
        let script = r#"#!/bin/sh
echo "Info: progress 100%" >&2
cat > "$4" <<'JSON'
{"metadata":{"soundFile":"x.wav","duration":0.7},"mouthCues":[{"start":0.0,"end":0.2,"value":"A"},{"start":0.2,"end":0.5,"value":"D"},{"start":0.5,"end":0.7,"value":"X"}]}
JSON
"#;
        std::fs::write(&fake, script).unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let out = dir.path().join("x.json");
        let timeline = RhubarbExtractor::new(&fake)
            .extract(&dir.path().join("x.wav"), &out)
            .await
            .unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.duration(), 0.7);
        assert!(out.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_fails() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("rhubarb");
        std::fs::write(&fake, "#!/bin/sh\necho 'Error: bad wav' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = RhubarbExtractor::new(&fake)
            .extract(&dir.path().join("x.wav"), &dir.path().join("x.json"))
            .await;
        assert!(result.is_err());
    }
}
