//! Transcode, then extract, under one deadline.

use super::extractor::PhonemeExtractor;
use super::timeline::CueTimeline;
use super::transcoder::AudioTranscoder;
use crate::audio::AudioClip;
use crate::lifecycle::{CueProvider, PlaybackMessage};
use crate::{MouthpieceError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

pub struct LipsyncService {
    transcoder: Arc<dyn AudioTranscoder>,
    extractor: Arc<dyn PhonemeExtractor>,
    audios_dir: PathBuf,
    timeout: Duration,
}

impl LipsyncService {
    pub fn new(
        transcoder: Arc<dyn AudioTranscoder>,
        extractor: Arc<dyn PhonemeExtractor>,
        audios_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            transcoder,
            extractor,
            audios_dir: audios_dir.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn audios_dir(&self) -> &Path {
        &self.audios_dir
    }

    /// Cue timeline for an audio file; the JSON lands in the audios dir as `<stem>.json`
    pub async fn generate(&self, audio_path: &Path) -> Result<CueTimeline> {
        let stem = audio_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audio");
        let output_json = self.audios_dir.join(format!("{}.json", stem));
        self.generate_into(audio_path, &output_json).await
    }

    async fn generate_into(&self, audio_path: &Path, output_json: &Path) -> Result<CueTimeline> {
        debug!("Starting lipsync generation for: {:?}", audio_path);
        tokio::fs::metadata(audio_path)
            .await
            .map_err(|e| MouthpieceError::LipsyncError(format!("Audio file {:?} not readable: {}", audio_path, e)))?;

        let work = async {
            let wav = self.transcoder.to_wav(audio_path).await?;
            self.extractor.extract(&wav, output_json).await
        };

        match tokio::time::timeout(self.timeout, work).await {
            Ok(Ok(timeline)) => {
                debug!("Lipsync generation completed: {:?}", output_json);
                Ok(timeline)
            }
            Ok(Err(e)) => {
                error!("Lipsync generation failed: {}", e);
                Err(e)
            }
            Err(_) => Err(MouthpieceError::Timeout(format!(
                "lipsync for {:?} exceeded {:?}",
                audio_path, self.timeout
            ))),
        }
    }

    /// Generate cues for an in-memory clip.
    ///
    /// The clip, its transcoded WAV and the extractor JSON live in a scratch
    /// directory under the audios dir that is removed before returning.
    pub async fn generate_for_clip(&self, name: &str, clip: &AudioClip) -> Result<CueTimeline> {
        tokio::fs::create_dir_all(&self.audios_dir).await?;
        let scratch = tempfile::Builder::new()
            .prefix(&format!("{}-", name))
            .tempdir_in(&self.audios_dir)?;

        let path = scratch.path().join(format!("{}.{}", name, clip.format().extension()));
        tokio::fs::write(&path, clip.bytes()).await?;
        let output_json = scratch.path().join(format!("{}.json", name));
        let result = self.generate_into(&path, &output_json).await;

        if let Err(e) = scratch.close() {
            warn!("Could not remove lipsync scratch files for {}: {}", name, e);
        }
        result
    }
}

#[async_trait]
impl CueProvider for LipsyncService {
    async fn cues_for(&self, message: &PlaybackMessage) -> Result<CueTimeline> {
        let clip = message
            .audio
            .as_ref()
            .ok_or_else(|| MouthpieceError::LipsyncError("message has no audio".into()))?;
        self.generate_for_clip(&format!("message_{}", message.id.simple()), clip)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::wav::encode_wav;
    use crate::lipsync::MouthCue;

    struct Passthrough;

    #[async_trait]
    impl AudioTranscoder for Passthrough {
        async fn to_wav(&self, input: &Path) -> Result<PathBuf> {
            Ok(input.to_path_buf())
        }
    }

    struct Fixed;

    #[async_trait]
    impl PhonemeExtractor for Fixed {
        async fn extract(&self, _wav: &Path, output_json: &Path) -> Result<CueTimeline> {
            let timeline = CueTimeline::new(vec![MouthCue::new(0.0, 0.2, "A")]);
            tokio::fs::write(output_json, timeline.to_json()?).await?;
            Ok(timeline)
        }
    }

    struct Stuck;

    #[async_trait]
    impl PhonemeExtractor for Stuck {
        async fn extract(&self, _wav: &Path, _output_json: &Path) -> Result<CueTimeline> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(CueTimeline::default())
        }
    }

    fn clip() -> AudioClip {
        AudioClip::new(encode_wav(&[0.0; 1600], 16000).unwrap())
    }

    #[tokio::test]
    async fn test_cues_for_message_leaves_no_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let audios = dir.path().join("audios");
        let service = LipsyncService::new(Arc::new(Passthrough), Arc::new(Fixed), &audios);

        for _ in 0..3 {
            let message = PlaybackMessage::new("Hi").with_audio(clip());
            let timeline = service.cues_for(&message).await.unwrap();
            assert_eq!(timeline.len(), 1);
        }
        assert_eq!(std::fs::read_dir(&audios).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_generate_keeps_json_beside_audios() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("greeting.wav");
        std::fs::write(&input, clip().bytes()).unwrap();
        let service = LipsyncService::new(Arc::new(Passthrough), Arc::new(Fixed), dir.path());

        service.generate(&input).await.unwrap();
        assert!(dir.path().join("greeting.json").exists());
    }

    #[tokio::test]
    async fn test_missing_audio_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = LipsyncService::new(Arc::new(Passthrough), Arc::new(Fixed), dir.path());
        assert!(service.generate(&dir.path().join("nope.wav")).await.is_err());
        assert!(service.cues_for(&PlaybackMessage::new("text only")).await.is_err());
    }

    #[tokio::test]
    async fn test_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let service = LipsyncService::new(Arc::new(Passthrough), Arc::new(Stuck), dir.path())
            .with_timeout(Duration::from_millis(50));
        let err = service.generate_for_clip("slow", &clip()).await.unwrap_err();
        assert!(matches!(err, MouthpieceError::Timeout(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
