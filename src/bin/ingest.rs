//! One-shot loader: replaces the `round_data` table with the rows of a CSV export.

use roundstats::{
    rounds::{ingest::load_csv, PostgresRoundRepository, RoundRepository},
    Config,
};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roundstats=info,ingest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(path = %config.csv_file_path, "Ingesting round data");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await?;
    let repository = PostgresRoundRepository::new(pool.clone());

    let result = match load_csv(&config.csv_file_path) {
        Ok(rounds) => repository.replace_rounds(rounds).await,
        Err(err) => Err(err),
    };
    pool.close().await;

    match result {
        Ok(written) => {
            info!(written, "Data ingested successfully into 'round_data' table");
            Ok(())
        }
        Err(err) => {
            error!(%err, "Error ingesting data");
            Err(err.into())
        }
    }
}
