pub mod counters;

use prometheus::{Encoder, TextEncoder};

/// Prometheus text exposition of everything in the default registry.
pub fn gather_as_text() -> String {
    let mut buf = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&prometheus::gather(), &mut buf) {
        tracing::warn!("metrics encode failed: {}", e);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
