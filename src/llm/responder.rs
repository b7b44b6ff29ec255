use super::prompts::user_message_of;
use crate::chat::types::{Animation, ChatMessage, FacialExpression};
use crate::Result;
use async_trait::async_trait;

/// Prompt in, raw reply text out. The reply is expected to be the JSON
/// message list described by the system prompt, but callers must not rely on it.
#[async_trait]
pub trait LlmResponder: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Keyword-matched canned replies, for running without a model
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoResponder;

impl DemoResponder {
    pub fn reply_for(user_message: &str) -> ChatMessage {
        let lower = user_message.to_lowercase();
        let has_word = |w: &str| lower.split(|c: char| !c.is_alphanumeric()).any(|t| t == w);

        let (text, expression, animation) = if has_word("hello") || has_word("hi") {
            (
                "Hello! I'm your AI avatar. It's great to meet you! How can I help you today?",
                FacialExpression::Smile,
                Animation::Talking1,
            )
        } else if lower.contains("how are you") {
            (
                "I'm doing wonderfully! Thank you for asking. I can speak, express emotions, and even sync my lips with my speech!",
                FacialExpression::Smile,
                Animation::Laughing,
            )
        } else if lower.contains("what can you do") {
            (
                "I can have conversations, express emotions through facial expressions, and sync my lips with speech in real time!",
                FacialExpression::Surprised,
                Animation::Talking2,
            )
        } else if lower.contains("emotion") || lower.contains("expression") {
            (
                "Yes! Watch how my face changes as I speak. My mouth moves, my eyes express emotion, and my whole face responds.",
                FacialExpression::FunnyFace,
                Animation::Talking0,
            )
        } else if lower.contains("lip sync") {
            (
                "My lip sync is one of my coolest features. As I speak, my mouth movements follow the audio.",
                FacialExpression::Smile,
                Animation::Talking1,
            )
        } else if has_word("test") || has_word("demo") {
            (
                "Perfect! I'm demonstrating my speech, facial expressions, and lip sync right now.",
                FacialExpression::Smile,
                Animation::Rumba,
            )
        } else {
            (
                "That's an interesting question! I'm here to chat and show what a talking avatar can do. What would you like to know?",
                FacialExpression::Default,
                Animation::Talking0,
            )
        };

        ChatMessage::new(text, expression, animation)
    }
}

#[async_trait]
impl LlmResponder for DemoResponder {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let reply = Self::reply_for(user_message_of(prompt));
        Ok(serde_json::to_string(&vec![reply])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::parser::parse_reply;
    use crate::llm::prompts::build_prompt;

    #[tokio::test]
    async fn test_demo_reply_parses() {
        let raw = DemoResponder.generate(&build_prompt("Hi there")).await.unwrap();
        let messages = parse_reply(&raw);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].facial_expression, FacialExpression::Smile);
    }

    #[test]
    fn test_keywords() {
        // "this" must not count as a greeting
        assert_eq!(DemoResponder::reply_for("is this a lip sync demo").animation, Animation::Talking1);
        assert_eq!(DemoResponder::reply_for("How are you?").animation, Animation::Laughing);
        assert_eq!(DemoResponder::reply_for("weather").facial_expression, FacialExpression::Default);
    }
}
