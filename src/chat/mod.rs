//! Chat turn payloads and the pipeline that produces them

pub mod history;
pub mod service;
pub mod types;

pub use history::{ChatHistory, ChatTurn, Speaker};
pub use service::{apology_reply, audio_file_to_base64, intro_messages, ChatService};
pub use types::{Animation, ChatMessage, ChatResponse, FacialExpression, MAX_MESSAGES};
