// Server loop module
// Accepts connections forever and hands each to the connection handler

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use crate::config::AppState;
use crate::logger;

/// Accept loop. Only returns if the listener can no longer report its
/// address; accept errors are logged and the loop keeps going.
///
/// Must run inside a `LocalSet`.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let local_addr = listener.local_addr()?;

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                handle_connection(stream, peer_addr, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection on {local_addr}: {e}"));
            }
        }
    }
}
