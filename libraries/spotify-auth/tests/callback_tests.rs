//! Loopback listener tests over real sockets.

use spotify_auth::CallbackListener;
use spotify_core::SpotifyError;
use std::time::Duration;

fn callback_url(listener: &CallbackListener, query: &str) -> String {
    format!("http://{}/callback?{}", listener.local_addr(), query)
}

#[tokio::test]
async fn test_code_is_delivered() {
    let mut listener = CallbackListener::start(0, "nonce").await.unwrap();

    let response = reqwest::get(callback_url(&listener, "code=AQB123&state=nonce"))
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(response.text().await.unwrap().contains("Authorization Successful"));

    let code = listener.await_result(Duration::from_secs(5)).await.unwrap();
    assert_eq!(code, "AQB123");
    listener.stop().await;
}

#[tokio::test]
async fn test_incomplete_callback_does_not_resolve() {
    let mut listener = CallbackListener::start(0, "nonce").await.unwrap();

    let response = reqwest::get(callback_url(&listener, "state=nonce")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    reqwest::get(callback_url(&listener, "code=late&state=nonce"))
        .await
        .unwrap();
    assert_eq!(
        listener.await_result(Duration::from_secs(5)).await.unwrap(),
        "late"
    );
    listener.stop().await;
}

#[tokio::test]
async fn test_state_mismatch() {
    let mut listener = CallbackListener::start(0, "nonce").await.unwrap();

    reqwest::get(callback_url(&listener, "code=stolen&state=other"))
        .await
        .unwrap();

    let err = listener.await_result(Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, SpotifyError::StateMismatch));
    listener.stop().await;
}

#[tokio::test]
async fn test_requests_after_resolution_are_harmless() {
    let mut listener = CallbackListener::start(0, "nonce").await.unwrap();

    reqwest::get(callback_url(&listener, "code=first&state=nonce"))
        .await
        .unwrap();
    let second = reqwest::get(callback_url(&listener, "code=second&state=nonce"))
        .await
        .unwrap();
    assert!(second.status().is_success());

    assert_eq!(
        listener.await_result(Duration::from_secs(5)).await.unwrap(),
        "first"
    );
    listener.stop().await;
}

#[tokio::test]
async fn test_timeout() {
    let mut listener = CallbackListener::start(0, "nonce").await.unwrap();

    let err = listener
        .await_result(Duration::from_millis(100))
        .await
        .unwrap_err();
    assert!(matches!(err, SpotifyError::AuthorizationTimeout { .. }));
    assert!(err.is_authentication());
    listener.stop().await;
}

#[tokio::test]
async fn test_stop_releases_port() {
    let listener = CallbackListener::start(0, "nonce").await.unwrap();
    let addr = listener.local_addr();
    listener.stop().await;

    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    let rebound = CallbackListener::start(addr.port(), "again").await.unwrap();
    rebound.stop().await;
}

#[tokio::test]
async fn test_ipv6_loopback_is_served_on_the_same_port() {
    // Hosts without IPv6 loopback only get the IPv4 listener.
    if std::net::TcpListener::bind("[::1]:0").is_err() {
        return;
    }

    let mut listener = CallbackListener::start(0, "nonce").await.unwrap();
    let ipv6_addr = listener
        .ipv6_addr()
        .expect("IPv6 loopback is available on this host");
    assert_eq!(ipv6_addr.port(), listener.local_addr().port());

    let response = reqwest::get(format!(
        "http://{}/callback?code=AQB6&state=nonce",
        ipv6_addr
    ))
    .await
    .unwrap();
    assert!(response.status().is_success());

    assert_eq!(
        listener.await_result(Duration::from_secs(5)).await.unwrap(),
        "AQB6"
    );
    listener.stop().await;
    assert!(tokio::net::TcpStream::connect(ipv6_addr).await.is_err());
}
