use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::info;
use std::net::SocketAddr;
use std::path::Path;

use persona_gateway::core::Config;
use persona_gateway::features::personas::PersonaManager;
use persona_gateway::server::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let personas = PersonaManager::load_dir(Path::new(&config.persona_dir))?;
    info!(
        "Loaded {} persona(s): {}",
        personas.len(),
        personas.ids().join(", ")
    );

    let port = config.port;
    let state = AppState::new(config, personas);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;
    info!("Server is running on http://localhost:{port}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server terminated unexpectedly")?;

    Ok(())
}
