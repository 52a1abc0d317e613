//! MailMind Triage Service: Binary Entrypoint.
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mailmind::api::AppState;

const ENV_BIND_ADDR: &str = "MAILMIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Compact tracing with env-filter; `RUST_LOG` overrides the default level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("triage=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op where no file exists. This enables
    // MAILMIND_KEYWORDS_PATH / MAILMIND_ADDR from .env.
    let _ = dotenvy::dotenv();

    init_tracing();

    let state = AppState::from_env();
    let router = mailmind::api::create_router(state);

    let addr = std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(target: "triage", %addr, "listening");

    axum::serve(listener, router)
        .await
        .context("server exited with error")?;
    Ok(())
}
