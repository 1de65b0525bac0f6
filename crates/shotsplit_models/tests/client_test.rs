//! Client tests against a one-shot local HTTP responder.

use serde_json::json;
use shotsplit_error::{CollaboratorErrorKind, FailureCategory, ShotsplitErrorKind};
use shotsplit_interface::PatchCollaborator;
use shotsplit_models::{ChatCompletionsClient, CollaboratorConfig};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serve one canned response; the handle yields the raw request.
async fn serve_once(status: u16, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (format!("http://{}/v1", addr), handle)
}

fn envelope(content: &str) -> String {
    json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

fn client(base_url: &str) -> ChatCompletionsClient {
    let config = CollaboratorConfig::new("sk-local")
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5));
    ChatCompletionsClient::new(config).unwrap()
}

#[tokio::test]
async fn test_returns_parsed_object() {
    let (url, server) = serve_once(200, envelope(r#"{"ops": []}"#)).await;

    let value = client(&url).submit("系统", "用户").await.unwrap();
    assert_eq!(value, json!({"ops": []}));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v1/chat/completions"));
    assert!(request.to_lowercase().contains("authorization: bearer sk-local"));
    assert!(request.contains("\"response_format\""));
    assert!(request.contains("用户"));
}

#[tokio::test]
async fn test_unwraps_code_fence() {
    let (url, server) = serve_once(200, envelope("```json\n{\"ops\": []}\n```")).await;

    let value = client(&url).submit("s", "u").await.unwrap();
    assert_eq!(value["ops"], json!([]));
    server.await.unwrap();
}

#[tokio::test]
async fn test_error_status_is_transport_failure_with_truncated_body() {
    let (url, server) = serve_once(503, "x".repeat(1500)).await;

    let err = client(&url).submit("s", "u").await.unwrap_err();
    assert_eq!(err.category(), FailureCategory::Transport);
    let message = err.to_string();
    assert!(message.contains("HTTP 503"));
    assert!(message.contains("...(truncated)"));
    assert!(!message.contains(&"x".repeat(1001)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_missing_content_is_envelope_error() {
    let (url, server) = serve_once(200, json!({"choices": []}).to_string()).await;

    let err = client(&url).submit("s", "u").await.unwrap_err();
    assert!(matches!(
        err.kind(),
        ShotsplitErrorKind::Collaborator(e) if matches!(e.kind, CollaboratorErrorKind::Envelope(_))
    ));
    assert!(err.to_string().contains("unexpected response shape"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_non_object_content_is_content_error() {
    let (url, server) = serve_once(200, envelope("[1, 2, 3]")).await;

    let err = client(&url).submit("s", "u").await.unwrap_err();
    assert!(matches!(
        err.kind(),
        ShotsplitErrorKind::Collaborator(e) if matches!(e.kind, CollaboratorErrorKind::Content { .. })
    ));
    assert_eq!(err.category(), FailureCategory::Transport);
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/v1", addr))
        .submit("s", "u")
        .await
        .unwrap_err();
    assert_eq!(err.category(), FailureCategory::Transport);
}
