//! # PANIC Channels API Main Entry Point

use migration::{Migrator, MigratorTrait};
use panic_api::{config::ConfigLoader, db, seeds, server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::new().load()?;

    telemetry::init_tracing(&config)?;
    tracing::info!(profile = %config.profile, "loaded configuration");
    if let Ok(redacted) = config.redacted_json() {
        tracing::debug!(config = %redacted, "effective configuration");
    }

    let db = db::init_pool(&config).await?;
    Migrator::up(&db, None).await?;

    if config.seed_lookups {
        seeds::seed_lookup_rows(&db).await?;
    }

    server::run_server(config, db).await
}
