//! Activity explorer bridge daemon.
//!
//! Serves the bridge channel over loopback HTTP for the UI layer:
//!
//! ```bash
//! BRIDGE_PORT=4870 activity-explorer
//! curl -X POST http://127.0.0.1:4870/channel \
//!     -H 'content-type: application/json' \
//!     -d '{"method":"getInstalledAppsPaged","arguments":{"limit":20}}'
//! ```

use std::io;
use std::net::SocketAddr;

use activity_explorer::server::Server;
use activity_explorer::{default_platform, BridgeHandler};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_PORT: u16 = 4870;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("activity_explorer=info".parse().unwrap()),
        )
        .init();

    let port = std::env::var("BRIDGE_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let bind = SocketAddr::from(([127, 0, 0, 1], port));

    let platform = default_platform();
    tracing::info!("platform adapter: {}", platform.id());
    let handler = BridgeHandler::new(platform);

    match Server::new(handler, bind).await {
        Ok(mut server) => {
            tracing::info!("bridge listening on http://{}", server.addr());
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
            let _ = server.shutdown();
        }
        Err(error) => {
            eprintln!("failed to start bridge: {error}");
            std::process::exit(1);
        }
    }
}
