//! Responder configuration

use serde::{Deserialize, Serialize};

/// Which responder answers chat turns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderKind {
    /// Canned keyword replies, no model needed
    #[default]
    Demo,
    /// Local model via mistral.rs (requires the `local-llm` feature)
    Local,
}

/// Quantization type for model weights
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantizationType {
    /// No quantization (full precision)
    None,
    /// 4-bit quantization (Q4K)
    #[default]
    Q4K,
    /// 8-bit quantization (Q8_0)
    Q8_0,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    pub responder: ResponderKind,

    /// Model identifier (HuggingFace model ID or local path)
    pub model_id: String,

    pub quantization: QuantizationType,

    /// Temperature for sampling (0.0 = deterministic, 1.0+ = creative)
    pub temperature: f32,

    /// Maximum tokens to generate per response
    pub max_tokens: usize,

    /// Enable logging of inference details
    pub enable_logging: bool,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            responder: ResponderKind::Demo,
            model_id: "microsoft/Phi-3.5-mini-instruct".to_string(),
            quantization: QuantizationType::Q4K,
            temperature: 0.7,
            max_tokens: 1024,
            enable_logging: false,
        }
    }
}

impl LLMConfig {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            ..Default::default()
        }
    }

    pub fn with_responder(mut self, responder: ResponderKind) -> Self {
        self.responder = responder;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.responder == ResponderKind::Local && self.model_id.trim().is_empty() {
            return Err("model_id is required for the local responder".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature must be in [0, 2], got {}", self.temperature));
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LLMConfig::default();
        assert_eq!(config.responder, ResponderKind::Demo);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(LLMConfig::default().with_temperature(3.0).validate().is_err());
        assert!(LLMConfig::new("").with_responder(ResponderKind::Local).validate().is_err());
        assert!(LLMConfig::new("").validate().is_ok());
    }
}
