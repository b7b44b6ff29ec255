//! Local model responder using mistral.rs

use super::config::{LLMConfig, QuantizationType};
use super::responder::LlmResponder;
use crate::{MouthpieceError, Result};
use async_trait::async_trait;
use mistralrs::{IsqType, TextMessageRole, TextMessages, TextModelBuilder};
use std::sync::Arc;
use tracing::{debug, info};

pub struct LocalResponder {
    config: LLMConfig,
    model: Arc<mistralrs::Model>,
}

impl LocalResponder {
    pub async fn new(config: LLMConfig) -> Result<Self> {
        info!("Loading responder model: {}", config.model_id);

        let mut builder = TextModelBuilder::new(&config.model_id);
        match config.quantization {
            QuantizationType::None => {}
            QuantizationType::Q4K => builder = builder.with_isq(IsqType::Q4K),
            QuantizationType::Q8_0 => builder = builder.with_isq(IsqType::Q8_0),
        }
        if config.enable_logging {
            builder = builder.with_logging();
        }

        let model = builder
            .build()
            .await
            .map_err(|e| MouthpieceError::ModelLoadError(format!("Failed to load LLM model: {}", e)))?;

        info!("Responder model ready");
        Ok(Self {
            config,
            model: Arc::new(model),
        })
    }

    pub fn config(&self) -> &LLMConfig {
        &self.config
    }
}

#[async_trait]
impl LlmResponder for LocalResponder {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let messages = TextMessages::new().add_message(TextMessageRole::User, prompt);

        let response = self
            .model
            .send_chat_request(messages)
            .await
            .map_err(|e| MouthpieceError::ResponderError(format!("Chat request failed: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!(
            "Generated reply: {} tokens @ {:.1} tok/s",
            response.usage.completion_tokens, response.usage.avg_compl_tok_per_sec
        );
        Ok(content)
    }
}
