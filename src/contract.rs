use crate::models::message::{ContentPart, Message, MessageBag, Tool, ToolCall, UserContent};
use serde_json::{json, Map, Value};

/// Normalize a message bag into the Nova message payload.
///
/// Mapping highlights:
/// - system messages: collected into top-level `system: [{ "text": ... }]`, omitted when absent.
/// - user: `content` becomes a list of `{ "text" }` / `{ "image" }` blocks.
/// - assistant: text block, followed by one `toolUse` block per tool call.
/// - tool: sent back as a `user` message carrying a `toolResult` block.
pub fn to_nova_payload(bag: &MessageBag) -> Map<String, Value> {
    let mut payload = Map::new();

    let system: Vec<Value> = bag
        .system_contents()
        .map(|text| json!({ "text": text }))
        .collect();
    if !system.is_empty() {
        payload.insert("system".to_string(), Value::Array(system));
    }

    let messages: Vec<Value> = bag.without_system().filter_map(map_message).collect();
    payload.insert("messages".to_string(), Value::Array(messages));

    payload
}

/// Map a single non-system message; system messages yield `None`.
pub fn map_message(m: &Message) -> Option<Value> {
    match m {
        Message::System { .. } => None,
        Message::User { content } => Some(json!({
            "role": "user",
            "content": map_user_content(content),
        })),
        Message::Assistant {
            content,
            tool_calls,
        } => {
            let mut blocks = Vec::new();
            if let Some(text) = content.as_deref() {
                if !text.is_empty() || tool_calls.is_empty() {
                    blocks.push(json!({ "text": text }));
                }
            } else if tool_calls.is_empty() {
                blocks.push(json!({ "text": "" }));
            }
            blocks.extend(tool_calls.iter().map(map_tool_use));
            Some(json!({ "role": "assistant", "content": blocks }))
        }
        Message::Tool {
            tool_call_id,
            content,
        } => Some(json!({
            "role": "user",
            "content": [{
                "toolResult": {
                    "toolUseId": tool_call_id,
                    "content": [map_tool_result_content(content)],
                }
            }],
        })),
    }
}

/// Map tool definitions into Nova `toolSpec` entries, preserving order.
pub fn map_tools(tools: &[Tool]) -> Vec<Value> {
    tools.iter().map(map_tool).collect()
}

pub fn map_tool(t: &Tool) -> Value {
    let mut spec = Map::new();
    spec.insert("name".into(), Value::String(t.name.clone()));
    if let Some(description) = &t.description {
        spec.insert("description".into(), Value::String(description.clone()));
    }
    let schema = t
        .parameters
        .clone()
        .unwrap_or_else(|| Value::Object(Map::new()));
    spec.insert("inputSchema".into(), json!({ "json": schema }));
    json!({ "toolSpec": spec })
}

fn map_user_content(content: &UserContent) -> Vec<Value> {
    match content {
        UserContent::Text(text) => vec![json!({ "text": text })],
        UserContent::Parts(parts) => parts.iter().map(map_part).collect(),
    }
}

fn map_part(part: &ContentPart) -> Value {
    match part {
        ContentPart::Text { text } => json!({ "text": text }),
        ContentPart::Image { media_type, data } => json!({
            "image": {
                "format": image_format(media_type),
                "source": { "bytes": data },
            }
        }),
    }
}

fn map_tool_use(call: &ToolCall) -> Value {
    // Nova rejects a null or missing input; send an empty object instead.
    let input = match &call.arguments {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    };
    json!({
        "toolUse": {
            "toolUseId": call.id,
            "name": call.name,
            "input": input,
        }
    })
}

/// Structured tool output goes out as a `json` block, anything else as `text`.
fn map_tool_result_content(content: &str) -> Value {
    match serde_json::from_str::<Value>(content) {
        Ok(v @ (Value::Object(_) | Value::Array(_))) => json!({ "json": v }),
        _ => json!({ "text": content }),
    }
}

fn image_format(media_type: &str) -> &str {
    let subtype = media_type
        .rsplit_once('/')
        .map(|(_, sub)| sub)
        .unwrap_or(media_type);
    match subtype {
        "jpg" => "jpeg",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_format_uses_mime_subtype() {
        assert_eq!(image_format("image/png"), "png");
        assert_eq!(image_format("image/jpg"), "jpeg");
        assert_eq!(image_format("webp"), "webp");
    }

    #[test]
    fn tool_result_content_detects_json() {
        assert_eq!(
            map_tool_result_content(r#"{"temp":21}"#),
            json!({ "json": { "temp": 21 } })
        );
        assert_eq!(map_tool_result_content("21"), json!({ "text": "21" }));
        assert_eq!(map_tool_result_content("sunny"), json!({ "text": "sunny" }));
    }

    #[test]
    fn null_tool_arguments_become_empty_object() {
        let call = ToolCall {
            id: "t1".into(),
            name: "clock".into(),
            arguments: Value::Null,
        };
        assert_eq!(map_tool_use(&call)["toolUse"]["input"], json!({}));
    }
}
