use axum::Router;
use common::env::ensure_data_dir;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use service::storage::JsonFileStore;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::routes;
use crate::state::AppState;

/// Any origin may call the API.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Load config from `config.toml` (or `CONFIG_PATH`); fall back to env vars.
/// A config file that exists but cannot be used is reported at WARN.
pub fn load_config() -> AppConfig {
    let path = configs::config_path();
    match configs::load_optional(&path) {
        Ok(Some(cfg)) => cfg,
        Ok(None) => {
            debug!(%path, "no config file; using environment");
            env_config()
        }
        Err(e) => {
            warn!(%path, error = %e, "config file is invalid; falling back to environment");
            env_config()
        }
    }
}

fn env_config() -> AppConfig {
    let mut cfg = AppConfig::from_env();
    if let Err(e) = cfg.normalize_and_validate() {
        warn!(error = %e, "environment config is invalid; using defaults");
        cfg = AppConfig::default();
    }
    cfg
}

/// Build the router backed by the JSON file named in `cfg`.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    ensure_data_dir(&cfg.storage.data_file).await?;
    let store = JsonFileStore::new(&cfg.storage.data_file).await?;
    let state = AppState::new(store);
    Ok(routes::build_router(state, build_cors()))
}

/// Bind and serve with an already loaded config.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = cfg.bind_addr()?;
    info!(%addr, data_file = %cfg.storage.data_file, "starting volunteer queue server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Public entry for embedding: set up logging, load config and serve.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();
    run_with_config(load_config()).await
}
