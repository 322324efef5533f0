// Connection handling module
// Serves one accepted TCP connection over HTTP/1.x

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve a connection in a local task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1 keep-alive from the performance settings
/// 3. Arms the header read timeout only when one is configured
/// 4. Serves every request on the connection until the client closes it
///
/// Must be called from within a `LocalSet`.
pub fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);
        let performance = &state.config.performance;

        let mut builder = http1::Builder::new();
        builder
            .keep_alive(performance.keep_alive())
            .title_case_headers(true);

        // hyper applies a default header timeout once a timer is set, so the
        // timer is only installed alongside an explicit limit
        if let Some(limit) = performance.header_read_timeout() {
            builder.timer(TokioTimer::new()).header_read_timeout(limit);
        }

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                handler::handle_request(req, Arc::clone(&service_state), peer_addr)
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
