//! vericast-vf - Statement Verification Service
//!
//! **Module Identity:**
//! - Name: vericast-vf (Statement Verification)
//! - Port: 5741
//!
//! Receives declarative statements from the hosting application, fans them
//! out to four fact-checking providers in parallel, aggregates a consensus
//! verdict, and returns correction text for statements judged false.
//!
//! Integrates with the hosting UI via HTTP REST + SSE.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use vericast_vf::config::VerifierConfig;
use vericast_vf::services::VerificationOrchestrator;
use vericast_vf::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting vericast-vf (Statement Verification) service");
    info!("Port: 5741");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve provider configuration (ENV -> TOML); every provider is
    // optional and a missing key activates its documented fallback
    let toml_config = vericast_common::config::load_config();
    let config = VerifierConfig::resolve(&toml_config);

    // Build the verification pipeline
    let orchestrator = VerificationOrchestrator::from_config(&config);
    info!("Verification pipeline initialized");

    // Create application state
    let state = AppState::new(orchestrator);

    // Build router
    let app = vericast_vf::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("127.0.0.1:5741").await?;
    info!("Listening on http://127.0.0.1:5741");
    info!("Health check: http://127.0.0.1:5741/health");

    axum::serve(listener, app).await?;

    Ok(())
}
