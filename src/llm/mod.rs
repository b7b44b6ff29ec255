//! Reply generation: prompt building, responders and reply parsing

pub mod config;
#[cfg(feature = "local-llm")]
pub mod local;
pub mod parser;
pub mod prompts;
pub mod responder;

pub use config::{LLMConfig, QuantizationType, ResponderKind};
#[cfg(feature = "local-llm")]
pub use local::LocalResponder;
pub use parser::{parse_reply, responder_failure_reply, strip_code_fences, unparseable_reply};
pub use prompts::{build_prompt, SYSTEM_PROMPT};
pub use responder::{DemoResponder, LlmResponder};

use crate::Result;
use std::sync::Arc;

/// Responder selected by `config`
pub async fn build_responder(config: &LLMConfig) -> Result<Arc<dyn LlmResponder>> {
    match config.responder {
        ResponderKind::Demo => Ok(Arc::new(DemoResponder)),
        #[cfg(feature = "local-llm")]
        ResponderKind::Local => Ok(Arc::new(LocalResponder::new(config.clone()).await?)),
        #[cfg(not(feature = "local-llm"))]
        ResponderKind::Local => Err(crate::MouthpieceError::ConfigError(
            "local responder requires the `local-llm` feature".to_string(),
        )),
    }
}
