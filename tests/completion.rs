use httpmock::prelude::*;
use serde_json::json;

use persona_gateway::{ChatMessage, CompletionClient};

fn client_for(server: &MockServer) -> CompletionClient {
    CompletionClient::with_endpoint(
        server.url("/v1/chat/completions"),
        "sk-test".to_string(),
        "gpt-3.5-turbo".to_string(),
    )
}

#[tokio::test]
async fn complete_sends_bearer_token_and_model() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test")
                .header("content-type", "application/json")
                .json_body_partial(r#"{"model": "gpt-3.5-turbo"}"#);
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "  hello there  "}}]
            }));
        })
        .await;

    let reply = client_for(&server)
        .complete(&[ChatMessage::system("sys"), ChatMessage::user("hi")])
        .await
        .unwrap();

    assert_eq!(reply, "hello there");
    mock.assert_async().await;
}

#[tokio::test]
async fn complete_forwards_composed_messages_in_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions").json_body_partial(
                r#"{"messages": [
                    {"role": "system", "content": "persona prompt"},
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello!"}
                ]}"#,
            );
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "ok"}}]
            }));
        })
        .await;

    let messages = vec![
        ChatMessage::system("persona prompt"),
        ChatMessage::user("hi"),
        ChatMessage::assistant("hello!"),
    ];
    client_for(&server).complete(&messages).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn complete_surfaces_upstream_error_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401)
                .json_body(json!({"error": {"message": "bad key"}}));
        })
        .await;

    let err = client_for(&server)
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();

    let text = err.to_string();
    assert!(text.contains("401"), "missing status in: {text}");
    assert!(text.contains("bad key"), "missing body detail in: {text}");
}

#[tokio::test]
async fn complete_rejects_malformed_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).body("this is not json");
        })
        .await;

    let err = client_for(&server)
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("malformed"));
}

#[tokio::test]
async fn complete_rejects_empty_choices() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let err = client_for(&server)
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no reply text"));
}
