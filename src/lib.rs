pub mod animation;
pub mod audio;
pub mod chat;
pub mod expression;
pub mod integration;
pub mod lifecycle;
pub mod lipsync;
pub mod llm;
pub mod speech;
pub mod utils;
pub mod viseme;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MouthpieceError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Model load error: {0}")]
    ModelLoadError(String),

    #[error("Speech synthesis error: {0}")]
    SpeechError(String),

    #[error("Lip sync error: {0}")]
    LipsyncError(String),

    #[error("Transcode error: {0}")]
    TranscodeError(String),

    #[error("Responder error: {0}")]
    ResponderError(String),

    #[error("Playback error: {0}")]
    PlaybackError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

impl From<std::io::Error> for MouthpieceError {
    fn from(e: std::io::Error) -> Self {
        MouthpieceError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for MouthpieceError {
    fn from(e: serde_json::Error) -> Self {
        MouthpieceError::ParseError(e.to_string())
    }
}

impl MouthpieceError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware and model problems need the operator
            MouthpieceError::AudioDeviceError(_) => false,
            MouthpieceError::ModelLoadError(_) => false,
            // Collaborator failures degrade to text-only or envelope speech
            MouthpieceError::SpeechError(_) => true,
            MouthpieceError::LipsyncError(_) => true,
            MouthpieceError::TranscodeError(_) => true,
            MouthpieceError::ResponderError(_) => true,
            MouthpieceError::PlaybackError(_) => true,
            MouthpieceError::IOError(_) => false,
            MouthpieceError::AudioProcessingError(_) => true,
            MouthpieceError::ConfigError(_) => false,
            MouthpieceError::ChannelError(_) => false,
            MouthpieceError::ParseError(_) => true,
            MouthpieceError::Timeout(_) => true,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            MouthpieceError::AudioDeviceError(_) => {
                "Audio device error. Please check your speakers.".to_string()
            }
            MouthpieceError::ModelLoadError(_) => {
                "Failed to load a speech or language model. Please verify model files are present."
                    .to_string()
            }
            MouthpieceError::SpeechError(_) => {
                "Speech synthesis failed. The reply will be shown without audio.".to_string()
            }
            MouthpieceError::LipsyncError(_) => {
                "Lip sync data unavailable. Mouth movement will follow the audio level.".to_string()
            }
            MouthpieceError::TranscodeError(_) => {
                "Audio conversion failed. Mouth movement will follow the audio level.".to_string()
            }
            MouthpieceError::ResponderError(_) => {
                "Reply generation failed. Please try again.".to_string()
            }
            MouthpieceError::PlaybackError(_) => {
                "Audio playback failed. The reply will be shown without audio.".to_string()
            }
            MouthpieceError::IOError(_) => "File system error occurred.".to_string(),
            MouthpieceError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            MouthpieceError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            MouthpieceError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            MouthpieceError::ParseError(_) => {
                "Received data could not be understood.".to_string()
            }
            MouthpieceError::Timeout(_) => "An operation took too long.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MouthpieceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_errors_are_recoverable() {
        assert!(MouthpieceError::LipsyncError("rhubarb missing".into()).is_recoverable());
        assert!(MouthpieceError::Timeout("cues".into()).is_recoverable());
        assert!(!MouthpieceError::ConfigError("bad".into()).is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: MouthpieceError = io.into();
        assert!(matches!(err, MouthpieceError::IOError(_)));
        assert_eq!(err.user_message(), "File system error occurred.");
    }
}
