use super::types::ChatMessage;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Avatar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub speaker: Speaker,
    pub text: String,
    /// Expression id for avatar turns
    pub expression: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: Speaker::User,
            text: text.into(),
            expression: None,
            timestamp: Utc::now(),
        }
    }

    pub fn avatar(message: &ChatMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker: Speaker::Avatar,
            text: message.text.clone(),
            expression: Some(message.facial_expression.as_str().to_string()),
            timestamp: Utc::now(),
        }
    }
}

/// Shared record of the conversation
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    turns: Arc<RwLock<Vec<ChatTurn>>>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, turn: ChatTurn) {
        self.turns.write().push(turn);
    }

    pub fn record_reply(&self, messages: &[ChatMessage]) {
        let mut turns = self.turns.write();
        turns.extend(messages.iter().map(ChatTurn::avatar));
    }

    pub fn get_all(&self) -> Vec<ChatTurn> {
        self.turns.read().clone()
    }

    /// The most recent `count` turns, oldest first
    pub fn recent(&self, count: usize) -> Vec<ChatTurn> {
        let turns = self.turns.read();
        turns[turns.len().saturating_sub(count)..].to_vec()
    }

    pub fn clear(&self) {
        self.turns.write().clear();
    }

    pub fn len(&self) -> usize {
        self.turns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::{Animation, FacialExpression};

    #[test]
    fn test_record_and_recent() {
        let history = ChatHistory::new();
        history.add(ChatTurn::user("hello"));
        history.record_reply(&[
            ChatMessage::new("Hi!", FacialExpression::Smile, Animation::Talking1),
            ChatMessage::new("Missed you", FacialExpression::Sad, Animation::Crying),
        ]);

        assert_eq!(history.len(), 3);
        let recent = history.recent(2);
        assert_eq!(recent[0].text, "Hi!");
        assert_eq!(recent[0].expression.as_deref(), Some("smile"));
        assert_eq!(recent[1].speaker, Speaker::Avatar);
        assert_eq!(history.recent(10).len(), 3);
    }

    #[test]
    fn test_clones_share_turns() {
        let history = ChatHistory::new();
        let view = history.clone();
        history.add(ChatTurn::user("a"));
        assert_eq!(view.len(), 1);
        view.clear();
        assert!(history.is_empty());
    }
}
