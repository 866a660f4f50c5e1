//! CAU Dish Service
//!
//! Reads configuration from a TOML file (~/.config/cau-dish/config.toml),
//! seeds the dishes table from CSV and serves the REST API.

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use cau_dish::config::AppConfig;
use cau_dish::domain::DishRepository;
use cau_dish::infrastructure::database::migrator::Migrator;
use cau_dish::infrastructure::{run_cleanup, ShutdownSignal};
use cau_dish::{create_api_router, default_config_path, init_database, seed_dishes, SeaOrmDishRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("DISH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let (mut app_cfg, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    app_cfg.apply_process_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app_cfg.logging.level)),
        )
        .init();
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    info!("Starting CAU Dish Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("failed to install Prometheus recorder: {}", e))?;

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&app_cfg.database.to_database_config()).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let repo = Arc::new(SeaOrmDishRepository::new(db.clone()));

    if app_cfg.seed.enabled {
        info!("Recreating dishes table...");
        if let Err(e) = Migrator::fresh(&db).await {
            error!("Failed to run migrations: {}", e);
            return Err(e.into());
        }
        let seed = &app_cfg.seed;
        if let Err(e) = seed_dishes(repo.as_ref(), &seed.csv_path, seed.batch_size).await {
            error!("Failed to seed dishes: {}", e);
            return Err(e.into());
        }
    } else {
        info!("Running database migrations...");
        if let Err(e) = Migrator::up(&db, None).await {
            error!("Failed to run migrations: {}", e);
            return Err(e.into());
        }
    }

    // ── REST API ───────────────────────────────────────────────
    let repo: Arc<dyn DishRepository> = repo;
    let api_router = create_api_router(repo, db.clone(), prometheus_handle);

    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_os_signals();

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    let served = axum::serve(listener, api_router)
        .with_graceful_shutdown(async move { api_shutdown.wait().await })
        .await;
    if let Err(e) = &served {
        error!("REST API server error: {}", e);
    }

    // ── Cleanup ────────────────────────────────────────────────
    run_cleanup(app_cfg.server.shutdown_timeout, async {
        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    })
    .await;

    info!("CAU Dish Service shutdown complete");
    served.map_err(Into::into)
}
