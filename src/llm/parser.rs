//! Tolerant parsing of responder output into chat messages.

use crate::chat::types::{Animation, ChatMessage, FacialExpression, MAX_MESSAGES};
use crate::Result;
use serde_json::Value;
use tracing::{debug, warn};

pub const THINKING_TEXT: &str = "I'm thinking...";
pub const UNPARSEABLE_TEXT: &str = "I'm having trouble processing that. Could you try rephrasing?";
pub const RESPONDER_FAILURE_TEXT: &str =
    "Sorry sweetie, I'm having trouble understanding right now. Let me try again!";

/// Reply used when the responder's output cannot be understood
pub fn unparseable_reply() -> ChatMessage {
    ChatMessage::new(UNPARSEABLE_TEXT, FacialExpression::Default, Animation::Talking0)
}

/// Reply used when the responder itself failed
pub fn responder_failure_reply() -> ChatMessage {
    ChatMessage::new(RESPONDER_FAILURE_TEXT, FacialExpression::Sad, Animation::Talking0)
}

/// Remove markdown code fences around a JSON payload
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json").or_else(|| text.strip_prefix("```")) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parse raw responder text. Never fails: anything unusable becomes the
/// fixed "trouble processing" message.
pub fn parse_reply(raw: &str) -> Vec<ChatMessage> {
    match try_parse_reply(raw) {
        Ok(messages) if !messages.is_empty() => messages,
        Ok(_) => {
            warn!("Responder returned no messages");
            vec![unparseable_reply()]
        }
        Err(e) => {
            warn!("Failed to parse responder output: {}", e);
            vec![unparseable_reply()]
        }
    }
}

pub fn try_parse_reply(raw: &str) -> Result<Vec<ChatMessage>> {
    let value: Value = serde_json::from_str(strip_code_fences(raw))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("messages") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                map.insert("messages".into(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        other => vec![other],
    };

    Ok(items
        .iter()
        .take(MAX_MESSAGES)
        .enumerate()
        .map(|(index, item)| message_from_value(index, item))
        .collect())
}

fn message_from_value(index: usize, item: &Value) -> ChatMessage {
    if let Value::String(text) = item {
        return ChatMessage::new(text.clone(), FacialExpression::Default, Animation::Talking0);
    }

    let field = |name: &str| item.get(name).and_then(Value::as_str).filter(|s| !s.trim().is_empty());
    let text = field("text");
    let expression = field("facialExpression");
    let animation = field("animation");

    if text.is_none() || expression.is_none() || animation.is_none() {
        debug!("Message {} missing required properties: {}", index, item);
    }

    ChatMessage::new(
        text.unwrap_or(THINKING_TEXT),
        expression.map(FacialExpression::parse_lenient).unwrap_or_default(),
        animation.map(Animation::parse_lenient).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fenced_array() {
        let raw = "```json\n[{\"text\":\"Hi sweetie!\",\"facialExpression\":\"smile\",\"animation\":\"Talking_1\"}]\n```";
        let messages = parse_reply(raw);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "Hi sweetie!");
        assert_eq!(messages[0].facial_expression, FacialExpression::Smile);
        assert_eq!(messages[0].animation, Animation::Talking1);
    }

    #[test]
    fn test_object_shapes() {
        let wrapped = r#"{"messages":[{"text":"a","facialExpression":"sad","animation":"Crying"},{"text":"b","facialExpression":"angry","animation":"Angry"}]}"#;
        assert_eq!(parse_reply(wrapped).len(), 2);

        let single = r#"{"text":"solo","facialExpression":"surprised","animation":"Terrified"}"#;
        let messages = parse_reply(single);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].animation, Animation::Terrified);
    }

    #[test]
    fn test_caps_at_three() {
        let raw = r#"[{"text":"1"},{"text":"2"},{"text":"3"},{"text":"4"}]"#;
        let messages = parse_reply(raw);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].text, "3");
    }

    #[test]
    fn test_missing_and_unknown_fields() {
        let raw = r#"[{"facialExpression":"ecstatic_overload"},{"text":"ok","animation":"Breakdance"}]"#;
        let messages = parse_reply(raw);
        assert_eq!(messages[0].text, THINKING_TEXT);
        assert_eq!(messages[0].facial_expression, FacialExpression::Default);
        assert_eq!(messages[0].animation, Animation::Talking0);
        assert_eq!(messages[1].animation, Animation::Talking0);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(parse_reply("I am not JSON"), vec![unparseable_reply()]);
        assert_eq!(parse_reply("[]"), vec![unparseable_reply()]);
    }
}
