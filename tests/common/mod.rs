#![allow(dead_code)]

use futures_util::StreamExt;
use pairchat::routes;
use pairchat::state::AppState;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const INDEX_HTML: &str = "<!doctype html><title>pairchat</title>";
pub const SCRIPT_JS: &str = "console.log('pairchat');";

/// Test server with its own registry and a throwaway asset directory.
/// Each instance is isolated, so tests can run in parallel.
pub struct TestServer {
    pub state: AppState,
}

impl TestServer {
    pub fn new() -> Self {
        let dir = temp_asset_dir();
        let static_dir = dir.join("static");
        std::fs::create_dir_all(&static_dir).expect("failed to create static dir");
        std::fs::write(dir.join("index.html"), INDEX_HTML).expect("failed to write index");
        std::fs::write(static_dir.join("script.js"), SCRIPT_JS).expect("failed to write script");

        Self {
            state: AppState::new(static_dir, dir.join("index.html")),
        }
    }

    /// Router wired to this server's state for `oneshot()` calls.
    pub fn router(&self) -> axum::Router {
        routes::router(self.state.clone())
    }

    /// Binds a TCP listener on port 0, spawns the server, and returns the
    /// websocket base URL.
    pub async fn spawn(&self) -> String {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("ws://127.0.0.1:{}", addr.port())
    }

    /// Wait until the registry reports `occupants` seated clients.
    pub async fn wait_for_occupants(&self, occupants: usize) {
        let registry = self.state.registry.clone();
        tokio::time::timeout(Duration::from_secs(5), async move {
            while registry.stats().occupants != occupants {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("registry never reached expected occupancy");
    }
}

fn temp_asset_dir() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("pairchat-test-{}-{n}", std::process::id()))
}

pub async fn test_app() -> axum::Router {
    TestServer::new().router()
}

pub async fn connect(url: &str) -> Client {
    let (ws, _) = connect_async(format!("{url}/ws")).await.unwrap();
    ws
}

/// Next text frame, skipping control frames. Panics after five seconds.
pub async fn next_text(ws: &mut Client) -> String {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for a message")
            .expect("stream ended")
            .expect("websocket error");
        if msg.is_text() {
            return msg.into_text().unwrap().as_str().to_owned();
        }
    }
}
