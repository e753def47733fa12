//! Shared helpers for the integration tests

#![allow(dead_code)]

pub mod ca;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dcerpc::{DceRpcServer, LocalTransport};
use tracing_subscriber::EnvFilter;

/// How long a test waits for a call that is expected to complete
pub const CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a test waits before deciding a call is blocked
pub const BLOCKED_FOR: Duration = Duration::from_millis(100);

/// Initialize logging once per test binary; `RUST_LOG` overrides the level
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// A fresh server and an in-process transport to it
pub fn local_server() -> (Arc<DceRpcServer>, LocalTransport) {
    let server = Arc::new(DceRpcServer::new());
    let transport = LocalTransport::new(Arc::clone(&server));
    (server, transport)
}

/// Await `future`, failing the test if it takes longer than [`CALL_TIMEOUT`]
pub async fn within<F: Future>(future: F) -> F::Output {
    tokio::time::timeout(CALL_TIMEOUT, future)
        .await
        .expect("call did not complete in time")
}

/// Assert that `handle` is still running after [`BLOCKED_FOR`]
pub async fn assert_blocked<T>(handle: &tokio::task::JoinHandle<T>) {
    tokio::time::sleep(BLOCKED_FOR).await;
    assert!(!handle.is_finished(), "call returned while it should block");
}

/// Hex dump in rows of 16 bytes, for failure messages
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(row, chunk)| {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
            format!("{:04x}: {}", row * 16, hex.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Little-endian u32 at `offset`
pub fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}
