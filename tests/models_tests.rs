//! Data model tests

use chatbatch::config::EndpointSpec;
use chatbatch::models::openai::*;
use chatbatch::services::build_payload;

#[test]
fn test_request_payload_round_trip() {
    let endpoint = EndpointSpec::new("https://api.openai.com/v1/chat/completions", "gpt-4o-mini");
    let messages = vec![
        ChatMessage::new("system", "You are a helpful assistant."),
        ChatMessage::new("user", "Say this is a test!"),
    ];

    let payload = build_payload(&endpoint, &messages, 0.7);
    let json = serde_json::to_string(&payload).unwrap();
    let decoded: ChatCompletionRequest = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, payload);
    assert_eq!(decoded.model, "gpt-4o-mini");
    assert_eq!(decoded.messages, messages);
    assert_eq!(decoded.temperature, 0.7);
}

#[test]
fn test_request_wire_shape() {
    let request = ChatCompletionRequest {
        model: "gpt-4o".to_string(),
        messages: vec![ChatMessage::new("user", "hi")],
        temperature: 1.0,
    };

    let value = serde_json::to_value(&request).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(value["messages"][0]["role"], "user");
    assert_eq!(value["temperature"], 1.0);
}

#[test]
fn test_response_ignores_extra_fields() {
    let json = r#"{
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Hello there!", "refusal": null},
            "logprobs": null,
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
    }"#;

    let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.choices.len(), 1);
    assert_eq!(response.first_content(), Some("Hello there!"));
}

#[test]
fn test_response_without_choices() {
    let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
    assert!(response.choices.is_empty());
    assert_eq!(response.first_content(), None);
}

#[test]
fn test_request_message_missing_fields_default() {
    let message: ChatMessage = serde_json::from_str(r#"{"role": "user", "content": null}"#).unwrap();
    assert_eq!(message.role, "user");
    assert_eq!(message.content, "");
}

#[test]
fn test_reply_without_content_has_no_first_content() {
    let response: ChatCompletionResponse =
        serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap();
    let message = response.choices[0].message.as_ref().unwrap();
    assert_eq!(message.role.as_deref(), Some("assistant"));
    assert_eq!(message.content, None);
    assert_eq!(response.first_content(), None);
}
