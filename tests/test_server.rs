use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use staticd::config::DriverKind;
use staticd::pages::PageStore;
use staticd::router::ROUTED_PAGES;
use staticd::server::driver::Driver;
use staticd::server::listener::Listener;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const INDEX_BODY: &str = "<html>index</html>";
const PAGE2_BODY: &str = "<html>page2</html>";
const NOT_FOUND_BODY: &str = "<html>404</html>";

async fn start_server(kind: DriverKind, workers: usize) -> (SocketAddr, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_BODY).unwrap();
    std::fs::write(dir.path().join("page2.html"), PAGE2_BODY).unwrap();
    std::fs::write(dir.path().join("404.html"), NOT_FOUND_BODY).unwrap();

    let pages = Arc::new(PageStore::new(dir.path()));
    pages.preload(ROUTED_PAGES).await.unwrap();

    let listener = Listener::bind("127.0.0.1:0", 100).unwrap();
    let addr = listener.local_addr().unwrap();

    let driver = Driver::new(kind, workers, pages);
    tokio::spawn(async move {
        let _ = listener.run(driver).await;
    });

    (addr, dir)
}

async fn send_request(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_get_index_event_driver() {
    let (addr, _dir) = start_server(DriverKind::Event, 0).await;

    let response = send_request(addr, b"GET / HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Type: text/html; charset=UTF-8\r\n"));
    assert!(response.ends_with(INDEX_BODY));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_get_index_pool_driver() {
    let (addr, _dir) = start_server(DriverKind::Pool, 4).await;

    let response = send_request(addr, b"GET /index.html HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.ends_with(INDEX_BODY));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_get_unknown_path_is_404() {
    let (addr, _dir) = start_server(DriverKind::Event, 0).await;

    let response = send_request(addr, b"GET /nope HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(response.ends_with(NOT_FOUND_BODY));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_empty_request_is_400_json() {
    let (addr, _dir) = start_server(DriverKind::Event, 0).await;

    // Client closes its write half without sending a byte.
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    let response = String::from_utf8_lossy(&response);

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("Content-Type: application/json\r\n"));

    let body_start = response.find("\r\n\r\n").unwrap() + 4;
    let parsed: serde_json::Value = serde_json::from_str(&response[body_start..]).unwrap();
    assert!(parsed.get("error").is_some());
    assert!(parsed.get("message").is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_event_driver() {
    concurrent_clients(DriverKind::Event, 0).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_pool_driver() {
    concurrent_clients(DriverKind::Pool, 4).await;
}

async fn concurrent_clients(kind: DriverKind, workers: usize) {
    let (addr, _dir) = start_server(kind, workers).await;

    let mut handles = Vec::new();
    for i in 0..12 {
        handles.push(tokio::spawn(async move {
            let (request, expected_status, expected_body): (&[u8], &str, &str) = match i % 3 {
                0 => (b"GET / HTTP/1.1\r\n\r\n", "200 OK", INDEX_BODY),
                1 => (b"GET /page2 HTTP/1.1\r\n\r\n", "200 OK", PAGE2_BODY),
                _ => (b"GET /missing HTTP/1.1\r\n\r\n", "404 Not Found", NOT_FOUND_BODY),
            };

            let response = send_request(addr, request).await;
            assert!(response.starts_with(&format!("HTTP/1.1 {}\r\n", expected_status)));
            assert!(response.ends_with(expected_body));
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_malformed_client_does_not_affect_others() {
    let (addr, _dir) = start_server(DriverKind::Event, 0).await;

    let garbage = tokio::spawn(async move {
        let response = send_request(addr, b"\x00\x01\x02garbage\r\n\r\n").await;
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    });

    let response = send_request(addr, b"GET / HTTP/1.1\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));

    garbage.await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stalled_client_does_not_block_pool() {
    let (addr, _dir) = start_server(DriverKind::Pool, 2).await;

    // Occupies one worker slot indefinitely: connects but never sends.
    let stalled = TcpStream::connect(addr).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    for _ in 0..3 {
        let response = send_request(addr, b"GET / HTTP/1.1\r\n\r\n").await;
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    }

    drop(stalled);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_response_content_length_matches_body() {
    let (addr, _dir) = start_server(DriverKind::Event, 0).await;

    let response = send_request(addr, b"GET /page2.html HTTP/1.1\r\n\r\n").await;

    let header_end = response.find("\r\n\r\n").unwrap();
    let body = &response[header_end + 4..];

    let content_length: usize = response
        .lines()
        .find_map(|l| l.strip_prefix("Content-Length: "))
        .unwrap()
        .trim()
        .parse()
        .unwrap();

    assert_eq!(content_length, body.len());
    assert_eq!(body, PAGE2_BODY);
}
