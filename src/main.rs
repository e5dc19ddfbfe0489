use anyhow::Context;
use tracing_subscriber::EnvFilter;
use userdesk::config::{ConfigService, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_service(&ConfigService::from_env())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    tracing::info!("Starting userdesk...");

    userdesk::server::run(config)
        .await
        .context("Server exited with an error")?;

    Ok(())
}
