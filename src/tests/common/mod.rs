// src/tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use reqwest::Client;
use std::net::SocketAddr;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Unsigned token carrying `payload` as its claims
pub fn sample_jwt_with_payload(payload: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload);
    format!("{}.{}.signature", header, payload)
}

pub fn sample_jwt(exp: i64) -> String {
    sample_jwt_with_payload(&format!(r#"{{"exp":{}}}"#, exp))
}

/// Token valid for `secs` more seconds (negative for an already expired one)
pub fn jwt_expiring_in(secs: i64) -> String {
    sample_jwt(Utc::now().timestamp() + secs)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}
