//! Lifeline API server binary.
//!
//! Configuration via environment:
//! - `LIFELINE_DB`: SQLite database path (default `lifeline.db`)
//! - `LIFELINE_ADDR`: bind address (default `0.0.0.0:3000`)
//! - `LIFELINE_ADMIN_BOOTSTRAP`: set to `1` to open the admin bootstrap path
//! - `RUST_LOG`: tracing filter (default `lifeline_api=info,tower_http=info`)

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lifeline_api::{build_router, AppState};
use lifeline_core::{BootstrapMode, Lifeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lifeline_api=info,tower_http=info")),
        )
        .init();

    let db_path = std::env::var("LIFELINE_DB").unwrap_or_else(|_| "lifeline.db".to_string());
    let addr = std::env::var("LIFELINE_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let bootstrap = match std::env::var("LIFELINE_ADMIN_BOOTSTRAP").as_deref() {
        Ok("1") | Ok("true") => BootstrapMode::Enabled,
        _ => BootstrapMode::Disabled,
    };

    let lifeline = Lifeline::open(&db_path, bootstrap)
        .with_context(|| format!("opening database at {}", db_path))?;
    let app = build_router(AppState::new(lifeline));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(%addr, db = %db_path, ?bootstrap, "lifeline api listening");

    axum::serve(listener, app).await?;
    Ok(())
}
