//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Request lines observed by a mock middletier, e.g.
/// `POST /middletier/rss/user/alice?url=http://example.com/feed.xml HTTP/1.1`.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Start a mock middletier that answers every request with the given JSON
/// body and records the request line of everything it sees.
pub async fn start_mock_middletier(addr: SocketAddr, body: &'static str) -> RequestLog {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let listener = TcpListener::bind(addr).await.unwrap();
    let accept_log = log.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let log = accept_log.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]).into_owned();
                        if let Some(line) = head.lines().next() {
                            log.lock().unwrap().push(line.to_string());
                        }

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    log
}
