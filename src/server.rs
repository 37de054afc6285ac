use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::database::{DatabaseManager, MemoryStudyRepository, PgStudyRepository, StudyRepository};
use crate::handlers::{studies, system};
use crate::middleware::cors_layer;

/// Shared handler state; the repository is injected at startup
#[derive(Clone)]
pub struct AppState {
    pub studies: Arc<dyn StudyRepository>,
}

impl AppState {
    pub fn new(studies: Arc<dyn StudyRepository>) -> Self {
        Self { studies }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/studies", get(studies::list).post(studies::create))
        .route("/studies/:id", delete(studies::delete))
        .layer(DefaultBodyLimit::max(config.server.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

/// Build the repository selected by `database.storage`
pub async fn build_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn StudyRepository>> {
    match config.database.storage {
        StorageBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to PostgreSQL")?;
            Ok(Arc::new(PgStudyRepository::with_config(pool, &config.database)))
        }
        StorageBackend::Memory => {
            info!("Using in-memory study storage; data is lost on restart");
            Ok(Arc::new(MemoryStudyRepository::new()))
        }
    }
}

/// Bind and serve until Ctrl-C or SIGTERM
pub async fn serve(config: &AppConfig, studies: Arc<dyn StudyRepository>) -> anyhow::Result<()> {
    let app = app(AppState::new(studies), config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Study service listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Study service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
