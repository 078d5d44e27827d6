//! End-to-end tests: edge server in front of a mock middletier.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use rss_edge::config::EdgeConfig;
use rss_edge::http::HttpServer;

mod common;

const MULTI_FEED: &str = r#"{"subscriptions":[{"title":"Example Feed","url":"http://example.com/feed.xml","items":[{"title":"First post","description":"hello","link":"http://example.com/1"}]}],"user":"someone-else"}"#;

const SINGLE_FEED: &str = r#"{"subscriptions":{"title":"Lone Feed","url":"http://example.com/lone.xml","items":[]},"user":"someone-else"}"#;

/// Start the edge server on `listen`, proxying to `middletier`.
async fn start_edge(listen: SocketAddr, middletier: SocketAddr) {
    let mut config = EdgeConfig::default();
    config.listener.bind_address = listen.to_string();
    config.middletier.address = middletier.to_string();

    let listener = tokio::net::TcpListener::bind(listen).await.unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
}

/// Client with redirects disabled so the 302s stay observable.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_view_renders_downstream_feeds() {
    let middletier_addr: SocketAddr = "127.0.0.1:29181".parse().unwrap();
    let edge_addr: SocketAddr = "127.0.0.1:29182".parse().unwrap();
    let log = common::start_mock_middletier(middletier_addr, MULTI_FEED).await;
    start_edge(edge_addr, middletier_addr).await;

    let res = client()
        .get(format!("http://{}/jsp/rss.jsp?username=alice", edge_addr))
        .send()
        .await
        .expect("Edge unreachable");
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.text().await.unwrap();
    assert!(body.contains("Example Feed"));
    assert!(body.contains("First post"));
    assert!(body.contains("alice"), "page should carry the request user");
    assert!(!body.contains("someone-else"), "payload user must be ignored");

    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(
        seen[0].starts_with("GET /middletier/rss/user/alice "),
        "unexpected request line: {}",
        seen[0]
    );
}

#[tokio::test]
async fn test_view_wraps_single_feed_payload() {
    let middletier_addr: SocketAddr = "127.0.0.1:29281".parse().unwrap();
    let edge_addr: SocketAddr = "127.0.0.1:29282".parse().unwrap();
    common::start_mock_middletier(middletier_addr, SINGLE_FEED).await;
    start_edge(edge_addr, middletier_addr).await;

    let res = client()
        .get(format!("http://{}/jsp/rss.jsp?username=bob", edge_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.text().await.unwrap();
    assert!(body.contains("Lone Feed"));
}

#[tokio::test]
async fn test_add_proxies_post_and_redirects() {
    let middletier_addr: SocketAddr = "127.0.0.1:29381".parse().unwrap();
    let edge_addr: SocketAddr = "127.0.0.1:29382".parse().unwrap();
    let log = common::start_mock_middletier(middletier_addr, "{}").await;
    start_edge(edge_addr, middletier_addr).await;

    let res = client()
        .get(format!(
            "http://{}/jsp/rss.jsp?username=alice&url=http://example.com/feed.xml",
            edge_addr
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers().get("location").unwrap(),
        "/jsp/rss.jsp?username=alice"
    );

    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(
        seen[0].starts_with("POST /middletier/rss/user/alice?url=http://example.com/feed.xml "),
        "unexpected request line: {}",
        seen[0]
    );
}

#[tokio::test]
async fn test_delete_wins_when_both_parameters_present() {
    let middletier_addr: SocketAddr = "127.0.0.1:29481".parse().unwrap();
    let edge_addr: SocketAddr = "127.0.0.1:29482".parse().unwrap();
    let log = common::start_mock_middletier(middletier_addr, "{}").await;
    start_edge(edge_addr, middletier_addr).await;

    let res = client()
        .get(format!(
            "http://{}/jsp/rss.jsp?username=alice&url=http://a/feed.xml&delFeedUrl=http://b/feed.xml",
            edge_addr
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);

    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(
        seen[0].starts_with("DELETE /middletier/rss/user/alice?url=http://b/feed.xml "),
        "unexpected request line: {}",
        seen[0]
    );
}

#[tokio::test]
async fn test_missing_username_defaults() {
    let middletier_addr: SocketAddr = "127.0.0.1:29581".parse().unwrap();
    let edge_addr: SocketAddr = "127.0.0.1:29582".parse().unwrap();
    let log = common::start_mock_middletier(middletier_addr, MULTI_FEED).await;
    start_edge(edge_addr, middletier_addr).await;

    let res = client()
        .get(format!("http://{}/jsp/rss.jsp", edge_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let seen = log.lock().unwrap();
    assert!(
        seen[0].starts_with("GET /middletier/rss/user/default "),
        "unexpected request line: {}",
        seen[0]
    );
}

#[tokio::test]
async fn test_add_redirects_even_when_middletier_is_down() {
    // Nothing is listening on the middletier port.
    let middletier_addr: SocketAddr = "127.0.0.1:29681".parse().unwrap();
    let edge_addr: SocketAddr = "127.0.0.1:29682".parse().unwrap();
    start_edge(edge_addr, middletier_addr).await;

    let res = client()
        .get(format!(
            "http://{}/jsp/rss.jsp?username=alice&url=http://example.com/feed.xml",
            edge_addr
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers().get("location").unwrap(),
        "/jsp/rss.jsp?username=alice"
    );
}

#[tokio::test]
async fn test_mutations_report_error_when_request_construction_fails() {
    // A middletier address the URL parser rejects: every outbound URL fails
    // to construct, before anything is sent.
    let edge_addr: SocketAddr = "127.0.0.1:30082".parse().unwrap();
    let mut config = EdgeConfig::default();
    config.listener.bind_address = edge_addr.to_string();
    config.middletier.address = "127.0.0.1:notaport".to_string();

    let listener = tokio::net::TcpListener::bind(edge_addr).await.unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Add: explicit error, not a redirect.
    let res = client()
        .get(format!(
            "http://{}/jsp/rss.jsp?username=alice&url=http://example.com/feed.xml",
            edge_addr
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(
        body.contains("invalid middletier request URL"),
        "unexpected error body: {}",
        body
    );

    // Delete: same contract.
    let res = client()
        .get(format!(
            "http://{}/jsp/rss.jsp?username=alice&delFeedUrl=http://example.com/feed.xml",
            edge_addr
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_view_reports_error_when_middletier_is_down() {
    let middletier_addr: SocketAddr = "127.0.0.1:29781".parse().unwrap();
    let edge_addr: SocketAddr = "127.0.0.1:29782".parse().unwrap();
    start_edge(edge_addr, middletier_addr).await;

    let res = client()
        .get(format!("http://{}/jsp/rss.jsp?username=alice", edge_addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(!body.is_empty(), "error body should carry the message text");
}

#[tokio::test]
async fn test_view_tolerates_malformed_payload() {
    let middletier_addr: SocketAddr = "127.0.0.1:29881".parse().unwrap();
    let edge_addr: SocketAddr = "127.0.0.1:29882".parse().unwrap();
    common::start_mock_middletier(middletier_addr, "definitely not json").await;
    start_edge(edge_addr, middletier_addr).await;

    let res = client()
        .get(format!("http://{}/jsp/rss.jsp?username=alice", edge_addr))
        .send()
        .await
        .unwrap();

    // Still a page, just with no feeds on it.
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("alice"));
}

#[tokio::test]
async fn test_healthcheck_serves_static_page() {
    let middletier_addr: SocketAddr = "127.0.0.1:29981".parse().unwrap();
    let edge_addr: SocketAddr = "127.0.0.1:29982".parse().unwrap();
    start_edge(edge_addr, middletier_addr).await;

    let res = client()
        .get(format!("http://{}/healthcheck", edge_addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Healthcheck page"));
}
