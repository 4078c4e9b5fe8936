// PetFlow - Web Server
// REST API over a single in-memory booking session

use anyhow::{Context, Result};
use petflow::{api, demo_history, init_tracing, Session, Settings};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let settings = Settings::load()?;

    // The owner dashboard opens on a sample day until real bookings exist
    let session = Session::with_history(settings, demo_history());
    tracing::info!(
        appointments = session.store().len(),
        "{}",
        session.financial_summary().summary()
    );

    let app = api::router(session);

    let addr = std::env::var("PETFLOW_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(%addr, "🐾 PetFlow server running");
    tracing::info!("API: http://{}/api/services", addr);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
