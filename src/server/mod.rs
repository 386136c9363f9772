// Server module entry point
// Listener construction and per-connection serving

pub mod connection;
pub mod listener;

pub use connection::accept_connection;
pub use listener::create_listener;

use crate::config::AppState;
use crate::logger;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept connections until shutdown is requested
///
/// Runs forever, serving each accepted connection in its own task.
/// Ctrl-C stops accepting; in-flight connections finish in the background.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}
