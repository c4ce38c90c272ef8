use mockito::Matcher;
use openai_api::{run_completion, CompletionConfig, OpenAIHandler};
use serde_json::json;
use text_completion::{ChatMessage, CompletionError, RequestHandler};

const PATH: &str = "/v1/chat/completions";

fn handler(server: &mockito::Server) -> OpenAIHandler {
    OpenAIHandler::new(
        "test-key",
        CompletionConfig {
            endpoint: format!("{}{}", server.url(), PATH),
            ..CompletionConfig::default()
        },
    )
}

fn conversation() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are Sarah"),
        ChatMessage::user("Start conversation"),
    ]
}

#[tokio::test]
async fn test_success_is_passed_through() {
    let mut server = mockito::Server::new_async().await;
    let upstream_body = json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi it's Sarah"}}],
    });
    let mock = server
        .mock("POST", PATH)
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "model": "gpt-3.5-turbo",
            "temperature": 0.7,
            "messages": [
                {"role": "system", "content": "You are Sarah"},
                {"role": "user", "content": "Start conversation"},
            ],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(upstream_body.to_string())
        .create_async()
        .await;

    let reply = run_completion(&handler(&server), &conversation())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, upstream_body);
}

#[tokio::test]
async fn test_rate_limit_keeps_status_and_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(429)
        .with_body(r#"{"error":{"message":"Rate limit reached for gpt-3.5-turbo","type":"requests"}}"#)
        .create_async()
        .await;

    let err = run_completion(&handler(&server), &conversation())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(429));
    assert_eq!(
        err.upstream_message(),
        Some("Rate limit reached for gpt-3.5-turbo")
    );
}

#[tokio::test]
async fn test_error_without_json_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let err = run_completion(&handler(&server), &conversation())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.upstream_message(), None);
}

#[tokio::test]
async fn test_success_with_invalid_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = run_completion(&handler(&server), &conversation())
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::InvalidResponse(_)), "{:?}", err);
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let handler = OpenAIHandler::new(
        "test-key",
        CompletionConfig {
            endpoint: "http://127.0.0.1:1/v1/chat/completions".to_string(),
            ..CompletionConfig::default()
        },
    );

    let err = run_completion(&handler, &conversation()).await.unwrap_err();

    assert!(matches!(err, CompletionError::Transport(_)), "{:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_request_handler_answers_through_channel() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let (tx, rx) = tokio::sync::oneshot::channel();
    handler(&server).chat_completion(conversation(), tx);
    let reply = rx.await.unwrap().unwrap();

    assert_eq!(reply.body, json!({"choices": []}));
}
