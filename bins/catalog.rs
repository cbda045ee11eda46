use std::sync::Arc;

use dotenvy::dotenv;
use migration::MigratorTrait;
use models::{category, property};
use service::repo::SeaOrmRepository;
use service::{CategoryService, PropertyService};
use tracing::{error, info};
use uuid::Uuid;

/// Connect, bring the schema up to date and report the live catalog.
async fn run(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(service = "catalog", event = "migrated", "schema up to date");

    let categories = CategoryService::new(Arc::new(SeaOrmRepository::<category::Entity>::new(db.clone())));
    let properties = PropertyService::new(Arc::new(SeaOrmRepository::<property::Entity>::new(db)));

    let live_categories = categories.get_all().await?;
    let live_properties = properties.get_all().await?;
    info!(
        service = "catalog",
        event = "catalog_loaded",
        categories = live_categories.len(),
        properties = live_properties.len(),
        "catalog ready"
    );
    println!("{}", serde_json::to_string_pretty(&live_categories)?);
    Ok(())
}

fn main() -> std::process::ExitCode {
    // Load .env early so RUST_LOG and DATABASE_URL apply
    dotenv().ok();

    let cfg = configs::AppConfig::load_and_validate();
    let format = cfg.as_ref().map(|c| c.logging.format).unwrap_or_default();
    common::utils::logging::init_logging(format);

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "catalog", event = "config_invalid", error = %format!("{e:#}"), "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let run_id = Uuid::new_v4();
    info!(service = "catalog", event = "start", %run_id, version = env!("CARGO_PKG_VERSION"), "catalog starting");

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "catalog", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cfg)) {
        Ok(()) => {
            info!(service = "catalog", event = "stop", %run_id, "catalog finished");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "catalog", event = "run_failed", %run_id, error = %e, "catalog run failed");
            std::process::ExitCode::FAILURE
        }
    }
}
