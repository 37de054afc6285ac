use tracing_subscriber::EnvFilter;

use study_service::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, STUDY_STORAGE, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!(
        "Starting Study service in {:?} mode with {:?} storage",
        config.environment,
        config.database.storage
    );

    let studies = server::build_repository(config).await?;
    server::serve(config, studies).await
}
