//! Tracing initialization for binaries and demos.
//!
//! Library code only emits `tracing` events; subscribers are the embedding
//! application's business. This helper wires up a reasonable default for the
//! bundled demo.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("agentic_flows=info"));

    let _ = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
