use super::process::{run_tool, stderr_text};
use crate::{MouthpieceError, Result};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Turns a compressed audio artifact into a WAV the phoneme extractor can read
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn to_wav(&self, input: &Path) -> Result<PathBuf>;
}

pub fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
}

/// `ffmpeg -y -i <in> <in-stem>.wav`, next to the input
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn to_wav(&self, input: &Path) -> Result<PathBuf> {
        if is_wav(input) {
            return Ok(input.to_path_buf());
        }

        let output = input.with_extension("wav");
        debug!("Converting {:?} to WAV", input);

        let result = run_tool(
            &self.binary,
            [OsStr::new("-y"), OsStr::new("-i"), input.as_os_str(), output.as_os_str()],
        )
        .await
        .map_err(|e| MouthpieceError::TranscodeError(format!("Failed to run {:?}: {}", self.binary, e)))?;

        if !result.status.success() {
            let stderr = stderr_text(&result);
            error!("FFmpeg conversion failed: {}", stderr);
            return Err(MouthpieceError::TranscodeError(format!(
                "ffmpeg exited with {}: {}",
                result.status, stderr
            )));
        }

        debug!("Conversion to WAV completed: {:?}", output);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wav_passthrough() {
        let transcoder = FfmpegTranscoder::new("/definitely/not/ffmpeg");
        let path = Path::new("/tmp/intro_0.WAV");
        assert_eq!(transcoder.to_wav(path).await.unwrap(), path);
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let transcoder = FfmpegTranscoder::new("/definitely/not/ffmpeg");
        let err = transcoder.to_wav(Path::new("/tmp/message_0.mp3")).await.unwrap_err();
        assert!(matches!(err, MouthpieceError::TranscodeError(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_converts_next_to_input() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("ffmpeg");
        // Copies the input to the last argument
        std::fs::write(&fake, "#!/bin/sh\ncp \"$3\" \"$4\"\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let input = dir.path().join("message_1.mp3");
        std::fs::write(&input, b"ID3").unwrap();

        let wav = FfmpegTranscoder::new(&fake).to_wav(&input).await.unwrap();
        assert_eq!(wav, dir.path().join("message_1.wav"));
        assert!(wav.exists());
    }
}
