//! Vivi game client binary.
//!
//! Composition root that assembles:
//! 1. Ledger backend, player session, and Runtime via `client-bootstrap`
//! 2. Frontend (UI) - CLI, GUI, etc.
//!
//! # Examples
//!
//! ```bash
//! # Offline play against the in-memory ledger
//! VIVI_OFFLINE=true cargo run -p vivi-client
//!
//! # Against the game backend
//! VIVI_EMAIL=me@example.com VIVI_PASSWORD=... cargo run -p vivi-client
//! ```

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli().await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli, ...)");
    }

    Ok(())
}

/// Run the CLI frontend.
#[cfg(feature = "frontend-cli")]
async fn run_cli() -> Result<()> {
    use client_bootstrap::{ClientBuilder as SetupBuilder, ClientConfig, generate_session_id};
    use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
    use vivi_client::Client;

    // 1. Load configuration from environment
    let mut client_config = ClientConfig::from_env()?;
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();

    let session_id = client_config
        .session_id
        .get_or_insert_with(generate_session_id)
        .clone();

    // 2. Setup logging
    let _log_guard = logging::setup_logging(&session_id)?;

    tracing::info!("Starting Vivi client");
    tracing::info!("Session ID: {}", session_id);
    tracing::info!("Backend: {}", client_config.backend.name());

    // 3. Build Runtime (independent layer)
    tracing::debug!("Building runtime...");
    let setup = SetupBuilder::new(client_config).build().await?;

    tracing::info!("Runtime built successfully");

    // 4. Build Frontend (independent layer)
    let frontend = CliFrontend::new(
        frontend_config,
        cli_config,
        setup.config.play_area,
        setup.session().address().map(str::to_string),
    );

    // 5. Build and run
    let client = Client::builder()
        .runtime(setup.runtime)
        .frontend(frontend)
        .build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
