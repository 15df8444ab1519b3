//! One-shot loopback listener for the authorization redirect.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use spotify_core::{Result, SpotifyError};
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Path the authorization server redirects to.
pub const CALLBACK_PATH: &str = "/callback";

/// How long [`CallbackListener::stop`] waits for in-flight requests.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

const SUCCESS_PAGE: &str = "<!DOCTYPE html>
<html>
<head><title>Authorization Successful</title></head>
<body>
<h1>Authorization Successful</h1>
<p>You can close this window and return to the application.</p>
</body>
</html>";

const FAILURE_PAGE: &str = "<!DOCTYPE html>
<html>
<head><title>Authorization Failed</title></head>
<body>
<h1>Authorization Failed</h1>
<p>Please return to the application and try again.</p>
</body>
</html>";

type ResultSender = oneshot::Sender<Result<String>>;

#[derive(Clone)]
struct CallbackState {
    expected_state: Arc<str>,
    sender: Arc<Mutex<Option<ResultSender>>>,
}

impl CallbackState {
    /// Deliver the first outcome; later ones are dropped.
    async fn resolve(&self, outcome: Result<String>) {
        match self.sender.lock().await.take() {
            Some(sender) => {
                let _ = sender.send(outcome);
            }
            None => debug!("Callback already resolved, ignoring request"),
        }
    }
}

async fn handle_callback(
    State(state): State<CallbackState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    // The state check comes first: nothing else in an unverified callback is trusted.
    if params.get("state").map(String::as_str) != Some(&*state.expected_state) {
        warn!("Callback state does not match the authorization request");
        state.resolve(Err(SpotifyError::StateMismatch)).await;
        return Html(FAILURE_PAGE).into_response();
    }

    if let Some(error) = params.get("error") {
        warn!(error = %error, "Authorization server returned an error");
        state
            .resolve(Err(SpotifyError::AuthorizationDenied(error.clone())))
            .await;
        return Html(FAILURE_PAGE).into_response();
    }

    match params.get("code").filter(|code| !code.is_empty()) {
        Some(code) => {
            info!("Authorization code received");
            state.resolve(Ok(code.clone())).await;
            Html(SUCCESS_PAGE).into_response()
        }
        None => (StatusCode::BAD_REQUEST, "No authorization code received").into_response(),
    }
}

/// Serve `app` on `listener` until `shutdown` flips or its sender is dropped.
async fn serve_until(listener: TcpListener, app: Router, mut shutdown: watch::Receiver<bool>) {
    let signal = async move {
        let _ = shutdown.changed().await;
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await
    {
        warn!(error = %e, "Callback listener stopped with an error");
    }
}

/// Loopback HTTP listener that waits for exactly one authorization outcome.
///
/// The redirect URI names `localhost`, which browsers may resolve to either
/// loopback family, so the listener binds `127.0.0.1` and, where IPv6 is
/// available, `[::1]` on the same port.
///
/// Dropping the listener aborts the server task; [`CallbackListener::stop`]
/// shuts it down gracefully and waits until the port is released.
pub struct CallbackListener {
    local_addr: SocketAddr,
    ipv6_addr: Option<SocketAddr>,
    result: Option<oneshot::Receiver<Result<String>>>,
    shutdown: Option<watch::Sender<bool>>,
    server: Option<JoinHandle<()>>,
}

impl CallbackListener {
    /// Bind `127.0.0.1:port` (and `[::1]` on the same port when possible) and
    /// start serving [`CALLBACK_PATH`].
    ///
    /// Port `0` picks a free port; see [`CallbackListener::local_addr`].
    pub async fn start(port: u16, expected_state: impl Into<String>) -> Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port)).await.map_err(|e| {
            SpotifyError::authentication(format!(
                "Failed to bind callback listener on port {}: {}",
                port, e
            ))
        })?;
        let local_addr = listener.local_addr().map_err(|e| {
            SpotifyError::authentication(format!("Callback listener has no local address: {}", e))
        })?;

        let port = local_addr.port();
        let ipv6_listener = match TcpListener::bind((Ipv6Addr::LOCALHOST, port)).await {
            Ok(listener) => Some(listener),
            Err(e) => {
                debug!(port, error = %e, "IPv6 loopback unavailable");
                None
            }
        };
        let ipv6_addr = ipv6_listener
            .as_ref()
            .and_then(|listener| listener.local_addr().ok());

        let (result_tx, result_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let state = CallbackState {
            expected_state: Arc::from(expected_state.into()),
            sender: Arc::new(Mutex::new(Some(result_tx))),
        };
        let app = Router::new()
            .route(CALLBACK_PATH, get(handle_callback))
            .with_state(state);

        let server = tokio::spawn(async move {
            match ipv6_listener {
                Some(ipv6_listener) => {
                    tokio::join!(
                        serve_until(listener, app.clone(), shutdown_rx.clone()),
                        serve_until(ipv6_listener, app, shutdown_rx),
                    );
                }
                None => serve_until(listener, app, shutdown_rx).await,
            }
        });

        debug!(addr = %local_addr, ipv6 = ipv6_addr.is_some(), "Callback listener started");

        Ok(Self {
            local_addr,
            ipv6_addr,
            result: Some(result_rx),
            shutdown: Some(shutdown_tx),
            server: Some(server),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The `[::1]` address also being served, if IPv6 loopback was available.
    pub fn ipv6_addr(&self) -> Option<SocketAddr> {
        self.ipv6_addr
    }

    /// Wait for the callback outcome: the authorization code on success.
    ///
    /// Fails with [`SpotifyError::AuthorizationTimeout`] when nothing
    /// conclusive arrives within `timeout`. The outcome can be awaited once.
    pub async fn await_result(&mut self, timeout: Duration) -> Result<String> {
        let receiver = self
            .result
            .take()
            .ok_or_else(|| SpotifyError::authentication("Callback result already consumed"))?;

        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(SpotifyError::authentication(
                "Callback listener closed before a result arrived",
            )),
            Err(_) => {
                warn!(seconds = timeout.as_secs(), "Timed out waiting for authorization");
                Err(SpotifyError::AuthorizationTimeout {
                    seconds: timeout.as_secs(),
                })
            }
        }
    }

    /// Shut the server down and wait until the port is free again.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        if let Some(mut server) = self.server.take() {
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await.is_err() {
                warn!("Callback listener did not stop in time, aborting");
                server.abort();
                let _ = server.await;
            }
        }
        debug!(addr = %self.local_addr, "Callback listener stopped");
    }
}

impl Drop for CallbackListener {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            server.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router(expected: &str) -> (Router, oneshot::Receiver<Result<String>>) {
        let (tx, rx) = oneshot::channel();
        let state = CallbackState {
            expected_state: Arc::from(expected),
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        let router = Router::new()
            .route(CALLBACK_PATH, get(handle_callback))
            .with_state(state);
        (router, rx)
    }

    async fn call(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_handler_accepts_matching_state() {
        let (router, rx) = test_router("nonce");
        let (status, body) = call(router, "/callback?code=abc&state=nonce").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Authorization Successful"));
        assert_eq!(rx.await.unwrap().unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_handler_state_mismatch_hides_details() {
        let (router, rx) = test_router("nonce");
        let (_, body) = call(router, "/callback?code=abc&state=forged").await;

        assert!(body.contains("Authorization Failed"));
        assert!(!body.contains("abc"));
        assert!(!body.to_lowercase().contains("state"));
        assert!(matches!(rx.await.unwrap(), Err(SpotifyError::StateMismatch)));
    }

    #[tokio::test]
    async fn test_handler_missing_state_is_mismatch() {
        let (router, rx) = test_router("nonce");
        call(router, "/callback?code=abc").await;
        assert!(matches!(rx.await.unwrap(), Err(SpotifyError::StateMismatch)));
    }

    #[tokio::test]
    async fn test_handler_error_param_is_denial() {
        let (router, rx) = test_router("nonce");
        let (_, body) = call(router, "/callback?error=access_denied&state=nonce").await;

        assert!(body.contains("Authorization Failed"));
        match rx.await.unwrap() {
            Err(SpotifyError::AuthorizationDenied(reason)) => assert_eq!(reason, "access_denied"),
            other => panic!("Expected AuthorizationDenied, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handler_without_code_keeps_waiting() {
        let (router, mut rx) = test_router("nonce");
        let (status, _) = call(router, "/callback?state=nonce").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(rx.try_recv().is_err());
    }
}
