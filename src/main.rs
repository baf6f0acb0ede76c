//! gzworld - Gazebo world generator
//!
//! Writes the demonstration world and, unless disabled, the stock mesh
//! models. All options come from `config/` and `GZW_*` environment variables.

use gzworld::config::AppConfig;
use gzworld::demo;

fn main() {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting gzworld");

    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    match demo::run(&config) {
        Ok(path) => log::info!("{} has been generated", path.display()),
        Err(e) => {
            log::error!("Failed to generate world: {}", e);
            std::process::exit(1);
        }
    }
}
