//! Tests for `OpenAiClient` against a local HTTP listener.
//!
//! The listener answers every request with one canned response and counts
//! how many requests reached it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use stovetop_core::ai::{
    AiClient, AiConfig, AiError, ChatMessage, ChatRequest, OpenAiClient, DEFAULT_MODEL,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const SERVER_ERROR_BODY: &str =
    r#"{"error":{"message":"The server had an error","type":"server_error","param":null,"code":null}}"#;

const INVALID_KEY_BODY: &str = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#;

const COMPLETION_BODY: &str = r#"{
    "id": "chatcmpl-1",
    "object": "chat.completion",
    "created": 1700000000,
    "model": "gpt-3.5-turbo-1106",
    "choices": [{
        "index": 0,
        "message": {"role": "assistant", "content": "{\"title\": \"Stew\"}"},
        "finish_reason": "stop"
    }],
    "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
}"#;

/// Serve `status_line` and `body` to every request; returns the API base URL
/// and the request counter.
async fn serve(status_line: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let counter = counter.clone();
            tokio::spawn(async move {
                read_request(&mut socket).await;
                counter.fetch_add(1, Ordering::SeqCst);
                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}/v1", addr), hits)
}

/// Read one request: headers, then `content-length` bytes of body.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn client(base_url: String) -> OpenAiClient {
    OpenAiClient::new(AiConfig {
        api_key: "sk-test".to_string(),
        model: DEFAULT_MODEL.to_string(),
        base_url,
    })
}

fn request() -> ChatRequest {
    ChatRequest {
        messages: vec![ChatMessage::user("beef, potato")],
        temperature: Some(0.5),
        json_response: true,
    }
}

async fn complete_once(client: &OpenAiClient) -> Result<String, AiError> {
    tokio::time::timeout(
        Duration::from_secs(5),
        client.complete("generate_recipe", request()),
    )
    .await
    .expect("completion did not finish within 5s")
    .map(|response| response.content)
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let (base_url, hits) = serve("500 Internal Server Error", SERVER_ERROR_BODY).await;

    let err = complete_once(&client(base_url)).await.unwrap_err();

    assert!(matches!(err, AiError::Api { .. }), "got {:?}", err);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rate_limit_is_not_retried() {
    let (base_url, hits) = serve(
        "429 Too Many Requests",
        r#"{"error":{"message":"Rate limit reached","type":"requests","param":null,"code":"rate_limit_exceeded"}}"#,
    )
    .await;

    let err = complete_once(&client(base_url)).await.unwrap_err();

    assert_eq!(err.code(), Some("rate_limit_exceeded"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn auth_failure_keeps_the_api_error_code() {
    let (base_url, hits) = serve("401 Unauthorized", INVALID_KEY_BODY).await;

    let err = complete_once(&client(base_url)).await.unwrap_err();

    assert_eq!(err.code(), Some("invalid_api_key"));
    let display = err.to_string();
    assert!(display.contains("Incorrect API key provided"), "{}", display);
    assert!(display.contains("invalid_api_key"), "{}", display);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn completion_content_is_returned() {
    let (base_url, hits) = serve("200 OK", COMPLETION_BODY).await;

    let content = complete_once(&client(base_url)).await.unwrap();

    assert_eq!(content, r#"{"title": "Stew"}"#);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
