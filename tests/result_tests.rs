use bedrock_nova::result::{ToolUse, Usage};
use bedrock_nova::{Error, InvokeModelResponse, ModelResult, NovaResultConverter, RawBedrockResult};
use serde_json::json;

fn raw(body: serde_json::Value) -> RawBedrockResult {
    RawBedrockResult::new(InvokeModelResponse::ok(body.to_string()))
}

#[test]
fn converts_text_response() {
    let converted = NovaResultConverter
        .convert(&raw(json!({
            "output": {"message": {"role": "assistant", "content": [{"text": "Hello there"}]}},
            "stopReason": "end_turn",
            "usage": {"inputTokens": 5, "outputTokens": 2, "totalTokens": 7}
        })))
        .unwrap();

    assert_eq!(
        converted.result,
        ModelResult::Text {
            text: "Hello there".into()
        }
    );
    assert_eq!(converted.stop_reason.as_deref(), Some("end_turn"));
    assert_eq!(
        converted.usage,
        Some(Usage {
            input_tokens: 5,
            output_tokens: 2,
            total_tokens: 7
        })
    );
}

#[test]
fn converts_tool_use_response_in_order() {
    let converted = NovaResultConverter
        .convert(&raw(json!({
            "output": {"message": {"role": "assistant", "content": [
                {"text": "Let me check."},
                {"toolUse": {"toolUseId": "a", "name": "weather", "input": {"city": "Oslo"}}},
                {"toolUse": {"toolUseId": "b", "name": "clock", "input": {}}}
            ]}},
            "stopReason": "tool_use"
        })))
        .unwrap();

    assert_eq!(
        converted.result,
        ModelResult::ToolCalls {
            tool_calls: vec![
                ToolUse {
                    id: "a".into(),
                    name: "weather".into(),
                    input: json!({"city": "Oslo"})
                },
                ToolUse {
                    id: "b".into(),
                    name: "clock".into(),
                    input: json!({})
                },
            ]
        }
    );
    assert!(converted.usage.is_none());
}

#[test]
fn missing_output_is_empty_response() {
    let err = NovaResultConverter.convert(&raw(json!({"stopReason": "end_turn"}))).unwrap_err();
    assert!(matches!(err, Error::EmptyResponse));
    assert_eq!(err.to_string(), "Response does not contain any content.");
}

#[test]
fn empty_content_is_missing_content() {
    let err = NovaResultConverter
        .convert(&raw(json!({"output": {"message": {"content": []}}})))
        .unwrap_err();
    assert!(matches!(err, Error::MissingContent));
}

#[test]
fn converted_result_serializes_with_type_tag() {
    let converted = NovaResultConverter
        .convert(&raw(json!({"output": {"message": {"content": [{"text": "hi"}]}}})))
        .unwrap();
    assert_eq!(
        serde_json::to_value(&converted).unwrap(),
        json!({"result": {"type": "text", "text": "hi"}})
    );
}
