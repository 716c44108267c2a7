#![cfg(feature = "http")]

use serde_json::{Value, json};
use taxis::prelude::*;
use taxis::{ClientConfig, Error, HttpTransport, SearchClient, SearchTransport};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// One request as it arrived on the socket.
struct Received {
    head: String,
    body: Vec<u8>,
}

impl Received {
    fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

async fn read_request(socket: &mut TcpStream) -> Received {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request head ended");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let mut received = Received {
        head: String::from_utf8(buf[..head_end].to_vec()).unwrap(),
        body: buf[head_end..].to_vec(),
    };
    let length: usize = received
        .header("content-length")
        .map(|v| v.parse().unwrap())
        .unwrap_or(0);
    while received.body.len() < length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request body ended");
        received.body.extend_from_slice(&chunk[..n]);
    }
    received
}

/// Answers one connection per canned `(status, body)` pair, in order, and
/// hands back every request it read.
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<Received>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut received = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            received.push(read_request(&mut socket).await);

            let response = format!(
                "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
        received
    });

    (base_url, handle)
}

#[tokio::test]
async fn test_http_not_found_then_success() {
    let (base_url, server) = serve(vec![
        (404, r#"{"detail":"Not Found"}"#),
        (200, r#"[{"id":1,"username":"john"}]"#),
    ])
    .await;
    let config = ClientConfig::new(base_url.as_str()).with_bearer_token("test-token");
    let client = SearchClient::http(config).unwrap();
    assert_eq!(client.config().base_url, base_url);

    let err = client
        .search_with_query("/missing", &create_query())
        .await
        .unwrap_err();
    match err {
        Error::Transport { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, r#"{"detail":"Not Found"}"#);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let mut composer = quick_search("john", &["username"]);
    composer.include("profile");
    let result = client
        .search_with_query("/test/users", &composer)
        .await
        .unwrap();
    assert_eq!(result, json!([{"id": 1, "username": "john"}]));

    let received = server.await.unwrap();
    assert_eq!(received.len(), 2);
    assert!(received[0].request_line().starts_with("POST /missing "));

    let search = &received[1];
    assert!(search.request_line().starts_with("POST /test/users "));
    assert_eq!(search.header("accept"), Some("application/json"));
    assert_eq!(search.header("content-type"), Some("application/json"));
    assert_eq!(search.header("authorization"), Some("Bearer test-token"));
    assert_eq!(search.json(), composer.build().to_json().unwrap());
}

#[tokio::test]
async fn test_http_without_token_sends_no_authorization() {
    let (base_url, server) = serve(vec![(200, "[]")]).await;
    let transport = HttpTransport::from_client(reqwest::Client::new());

    let response = transport
        .post_json(
            &format!("{}/test/users", base_url),
            &json!({"limit": 5}),
            None,
        )
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"[]".to_vec());

    let received = server.await.unwrap();
    assert_eq!(received[0].header("authorization"), None);
    assert_eq!(received[0].json(), json!({"limit": 5}));
}

#[tokio::test]
async fn test_http_connection_refused_is_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = SearchClient::http(ClientConfig::new(base_url)).unwrap();
    let err = client
        .search_with_query("/test/users", &create_query())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Request(_)));
    assert_eq!(err.status(), None);
}
