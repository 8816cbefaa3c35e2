//! Conversation transcripts as exchanged with clients.
//!
//! The server never stores a transcript. Clients send the whole history with every
//! request and get back the same history with one user turn and one assistant turn
//! appended.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Content;

/// Speaker of a turn, in the client-facing vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Role name Gemini expects for this speaker.
    pub fn upstream_role(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}

/// One message of a conversation.
///
/// Fields other than `role` and `content` belong to the client and are sent back
/// exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            extra: Map::new(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            extra: Map::new(),
        }
    }
}

/// Convert client turns into Gemini `contents`, keeping their order.
pub fn to_upstream_format(turns: &[Turn]) -> Vec<Content> {
    turns
        .iter()
        .map(|turn| Content::text(turn.role.upstream_role(), turn.content.clone()))
        .collect()
}

/// Return `turns` followed by the user message and the assistant reply.
pub fn append_exchange(turns: &[Turn], user_text: &str, assistant_text: &str) -> Vec<Turn> {
    let mut updated = Vec::with_capacity(turns.len() + 2);
    updated.extend_from_slice(turns);
    updated.push(Turn::user(user_text));
    updated.push(Turn::assistant(assistant_text));
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Part;

    fn sample_history() -> Vec<Turn> {
        vec![
            Turn::user("I want to make Omelette."),
            Turn::assistant("Whisk two eggs with a splash of milk."),
            Turn::user("Can I add cheese?"),
        ]
    }

    #[test]
    fn test_roles_map_to_gemini_names() {
        let contents = to_upstream_format(&sample_history());
        let roles: Vec<_> = contents.iter().map(|c| c.role.as_deref()).collect();
        assert_eq!(roles, vec![Some("user"), Some("model"), Some("user")]);
    }

    #[test]
    fn test_upstream_format_wraps_text_in_single_part() {
        let contents = to_upstream_format(&[Turn::assistant("Use butter.")]);
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].parts, vec![Part::text("Use butter.".to_string())]);
    }

    #[test]
    fn test_empty_history_maps_to_no_contents() {
        assert!(to_upstream_format(&[]).is_empty());
    }

    #[test]
    fn test_append_exchange_keeps_prefix() {
        let history = sample_history();
        let updated = append_exchange(&history, "And chives?", "Yes, chop them finely.");

        assert_eq!(updated.len(), history.len() + 2);
        assert_eq!(&updated[..history.len()], history.as_slice());
        assert_eq!(updated[3], Turn::user("And chives?"));
        assert_eq!(updated[4], Turn::assistant("Yes, chop them finely."));
    }

    #[test]
    fn test_append_exchange_on_empty_history() {
        let updated = append_exchange(&[], "question", "answer");
        assert_eq!(updated, vec![Turn::user("question"), Turn::assistant("answer")]);
    }

    #[test]
    fn test_turn_wire_shape() {
        let json = serde_json::to_value(Turn::assistant("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "hi"}));

        let parsed: Turn = serde_json::from_str(r#"{"role":"user","content":"hello"}"#).unwrap();
        assert_eq!(parsed, Turn::user("hello"));

        assert!(serde_json::from_str::<Turn>(r#"{"role":"model","content":"x"}"#).is_err());
    }

    #[test]
    fn test_client_fields_survive_append() {
        let history: Vec<Turn> = serde_json::from_value(serde_json::json!([
            {"role": "user", "content": "a", "id": 1},
            {"role": "assistant", "content": "b", "id": 2, "sentAt": "2024-05-01T10:00:00Z"}
        ]))
        .unwrap();

        let updated = append_exchange(&history, "c", "d");
        let json = serde_json::to_value(&updated).unwrap();
        assert_eq!(json[0], serde_json::json!({"role": "user", "content": "a", "id": 1}));
        assert_eq!(
            json[1],
            serde_json::json!({"role": "assistant", "content": "b", "id": 2, "sentAt": "2024-05-01T10:00:00Z"})
        );
        assert_eq!(json[2], serde_json::json!({"role": "user", "content": "c"}));
    }

    #[test]
    fn test_extra_fields_stay_out_of_upstream_contents() {
        let turn: Turn =
            serde_json::from_str(r#"{"role":"assistant","content":"b","id":2}"#).unwrap();
        assert_eq!(to_upstream_format(&[turn]), vec![Content::text("model", "b")]);
    }
}
