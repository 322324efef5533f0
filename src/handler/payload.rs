//! Fixed response payload

use serde::Serialize;

/// Body of every GET response. Field order is the wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HelloPayload {
    pub message: &'static str,
    pub status: &'static str,
}

impl HelloPayload {
    pub const fn new() -> Self {
        Self {
            message: "Hello, World!",
            status: "ok",
        }
    }
}

impl Default for HelloPayload {
    fn default() -> Self {
        Self::new()
    }
}
