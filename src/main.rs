use roundstats::{
    build_router,
    rounds::{ingest::load_csv, InMemoryRoundRepository, PostgresRoundRepository, RoundRepository},
    AppState, Config, StoreKind,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roundstats=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(store = %config.store, "Starting round statistics server");

    // The pool is opened once here and handed to the repository; requests only borrow it
    let mut pool = None;
    let round_repository: Arc<dyn RoundRepository + Send + Sync> = match config.store {
        StoreKind::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            pool = Some(pg_pool.clone());
            Arc::new(PostgresRoundRepository::new(pg_pool))
        }
        StoreKind::Memory => {
            let repository = InMemoryRoundRepository::new();
            match load_csv(&config.csv_file_path) {
                Ok(rounds) => {
                    repository.replace_rounds(rounds).await?;
                }
                Err(err) => {
                    warn!(%err, path = %config.csv_file_path, "Starting with an empty round store");
                }
            }
            Arc::new(repository)
        }
    };

    let app = build_router(AppState::new(round_repository));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Server running on http://{}", config.bind_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
