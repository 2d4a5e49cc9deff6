use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Provider-neutral chat message.
///
/// Serialized with a `role` tag to match the common chat request shape:
/// "system" | "user" | "assistant" | "tool"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: UserContent,
    },
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    /// Result of a tool invocation, correlated by `tool_call_id`.
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Message::User {
            content: UserContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Message::Assistant {
            content: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Message::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }
}

/// User content may be a plain string or a list of parts (for multimodal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A single user content part.
///
/// Example: `{ "type": "image", "media_type": "image/png", "data": "<base64>" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },
    Image {
        /// MIME type such as `image/png`; the subtype becomes Nova's `format`.
        media_type: String,
        /// Base64-encoded image bytes.
        data: String,
    },
}

impl ContentPart {
    /// Build an image part from raw bytes.
    pub fn image(media_type: impl Into<String>, bytes: &[u8]) -> Self {
        use base64::Engine as _;
        ContentPart::Image {
            media_type: media_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// Tool call requested by the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Tool definition offered to the model.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// JSON Schema object describing the tool input.
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
}

/// Ordered conversation handed to the contract for normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBag {
    messages: Vec<Message>,
}

impl MessageBag {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// System message contents, in order of appearance.
    pub fn system_contents(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(|m| match m {
            Message::System { content } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Every message except the system ones.
    pub fn without_system(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|m| !matches!(m, Message::System { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True when any user message carries an image part.
    pub fn has_images(&self) -> bool {
        self.messages.iter().any(|m| match m {
            Message::User {
                content: UserContent::Parts(parts),
            } => parts
                .iter()
                .any(|p| matches!(p, ContentPart::Image { .. })),
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_role_tagged_messages() {
        let bag: MessageBag = serde_json::from_value(json!([
            {"role": "system", "content": "Be brief."},
            {"role": "user", "content": "Hi"},
            {"role": "user", "content": [
                {"type": "text", "text": "What is this?"},
                {"type": "image", "media_type": "image/jpeg", "data": "AAAA"}
            ]},
            {"role": "assistant", "tool_calls": [
                {"id": "t1", "name": "clock", "arguments": {}}
            ]},
            {"role": "tool", "tool_call_id": "t1", "content": "12:00"}
        ]))
        .unwrap();

        assert_eq!(bag.messages().len(), 5);
        assert_eq!(bag.system_contents().collect::<Vec<_>>(), vec!["Be brief."]);
        assert_eq!(bag.without_system().count(), 4);
        assert!(bag.has_images());
        assert!(!MessageBag::new(vec![Message::user("Hi")]).has_images());
        assert!(matches!(
            &bag.messages()[2],
            Message::User { content: UserContent::Parts(parts) } if parts.len() == 2
        ));
    }

    #[test]
    fn image_part_encodes_bytes() {
        let part = ContentPart::image("image/png", b"png");
        assert_eq!(
            part,
            ContentPart::Image {
                media_type: "image/png".into(),
                data: "cG5n".into()
            }
        );
    }
}
