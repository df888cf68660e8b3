//! Fatigue Analysis Pipeline - Main Entry Point

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let settings = Settings::load()?;

    info!("=== Fatigue Analysis Pipeline v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Analyzer preset: {}", settings.analyzer_preset);

    run_server(&settings).await?;

    Ok(())
}
