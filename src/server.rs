use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use crate::handler::BridgeHandler;

pub mod channel;
pub mod error;

/// Loopback HTTP transport for the bridge channel.
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    pub async fn new(handler: BridgeHandler, bind: SocketAddr) -> Result<Self, String> {
        let state = Arc::new(ServerState { handler });
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        let app = Router::new()
            .route("/health", get(health))
            .route("/channel", post(channel::invoke_method))
            .with_state(state)
            .layer(cors);
        let listener = TcpListener::bind(bind)
            .await
            .map_err(|error| error.to_string())?;
        let addr = listener.local_addr().map_err(|error| error.to_string())?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> Result<(), String> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| "failed to send server shutdown signal".to_string())
        } else {
            Ok(())
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

async fn health() -> &'static str {
    "ok"
}

pub(crate) struct ServerState {
    pub(crate) handler: BridgeHandler,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::default_platform;
    use serde_json::{json, Value};

    async fn start_server() -> Server {
        let handler = BridgeHandler::new(default_platform());
        Server::new(handler, "127.0.0.1:0".parse().expect("loopback addr"))
            .await
            .expect("start")
    }

    #[tokio::test]
    async fn start_binds_random_port() {
        let mut server = start_server().await;
        assert_ne!(server.addr().port(), 0);
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn health_endpoint_answers() {
        let mut server = start_server().await;
        let body = reqwest::get(format!("http://{}/health", server.addr()))
            .await
            .expect("request")
            .text()
            .await
            .expect("body");
        assert_eq!(body, "ok");
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn unknown_method_answers_501_with_signal() {
        let mut server = start_server().await;
        let response = reqwest::Client::new()
            .post(format!("http://{}/channel", server.addr()))
            .json(&json!({"method": "uninstallApp", "arguments": {}}))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 501);
        let body: Value = response.json().await.expect("body");
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"]["code"], "not_implemented");
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn masked_platform_failure_answers_empty_success() {
        // The default platform off-device rejects every query; the handler
        // masks that as an empty result, and the transport passes it through.
        let mut server = start_server().await;
        let response = reqwest::Client::new()
            .post(format!("http://{}/channel", server.addr()))
            .json(&json!({"method": "getInstalledAppsPaged"}))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.expect("body");
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"], json!([]));
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn launch_answers_success_without_payload() {
        let mut server = start_server().await;
        let response = reqwest::Client::new()
            .post(format!("http://{}/channel", server.addr()))
            .json(&json!({
                "method": "launchActivity",
                "arguments": {"packageName": "com.example.notes", "activityName": ".Main"}
            }))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.expect("body");
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"], Value::Null);
        server.shutdown().expect("shutdown");
    }
}
