//! Encoded audio artifacts as delivered by the speech synthesizer.

use super::wav::{decode_wav, PcmAudio};
use crate::{MouthpieceError, Result};
use std::path::Path;
use std::sync::Arc;

/// Container format of an encoded clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Unknown,
}

impl AudioFormat {
    /// Sniff the container from its leading bytes
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
            AudioFormat::Wav
        } else if bytes.starts_with(b"ID3") || (bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0) {
            AudioFormat::Mp3
        } else {
            AudioFormat::Unknown
        }
    }

    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("wav") => AudioFormat::Wav,
            Some("mp3") => AudioFormat::Mp3,
            _ => AudioFormat::Unknown,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Unknown => "bin",
        }
    }
}

/// Immutable encoded audio, cheap to clone between the lifecycle and sinks
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    bytes: Arc<[u8]>,
    format: AudioFormat,
}

impl AudioClip {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let format = AudioFormat::detect(&bytes);
        Self { bytes, format }
    }

    pub fn with_format(bytes: impl Into<Arc<[u8]>>, format: AudioFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| MouthpieceError::IOError(format!("Failed to read {:?}: {}", path, e)))?;
        let detected = AudioFormat::detect(&bytes);
        let format = if detected == AudioFormat::Unknown {
            AudioFormat::from_path(path)
        } else {
            detected
        };
        Ok(Self::with_format(bytes, format))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode to mono PCM. Only WAV is decoded in-process.
    pub fn decode(&self) -> Result<PcmAudio> {
        match self.format {
            AudioFormat::Wav => decode_wav(self.bytes()),
            other => Err(MouthpieceError::AudioProcessingError(format!(
                "Cannot decode {:?} audio in-process",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::wav::encode_wav;

    #[test]
    fn test_detect_formats() {
        let wav = encode_wav(&[0.0; 16], 16000).unwrap();
        assert_eq!(AudioFormat::detect(&wav), AudioFormat::Wav);
        assert_eq!(AudioFormat::detect(b"ID3\x04\x00"), AudioFormat::Mp3);
        assert_eq!(AudioFormat::detect(&[0xFF, 0xFB, 0x90]), AudioFormat::Mp3);
        assert_eq!(AudioFormat::detect(b"hello"), AudioFormat::Unknown);
    }

    #[test]
    fn test_decode_wav_clip() {
        let wav = encode_wav(&vec![0.25; 8000], 16000).unwrap();
        let clip = AudioClip::new(wav);
        let pcm = clip.decode().unwrap();
        assert_eq!(pcm.sample_rate, 16000);
        assert!((pcm.duration_secs() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mp3_is_not_decoded() {
        let clip = AudioClip::new(b"ID3garbage".to_vec());
        assert!(clip.decode().is_err());
    }
}
