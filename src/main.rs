//! # Placeholder Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración (CLI + entorno), inicializa el logging y arranca
//! el servidor.

use anyhow::{Context, Result};
use log::info;
use placeholder_server::config::Config;
use placeholder_server::server::Server;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::new();
    config.validate().map_err(anyhow::Error::msg)?;

    info!("Configuración:");
    info!("   Dirección: {}", config.address());
    info!(
        "   Fuente: {}",
        config
            .font_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".to_string())
    );
    info!("   JPEG quality: {}", config.jpeg_quality);
    info!("   Dimensión máxima: {}", config.max_dimension);

    let server = Server::bind(&config)
        .with_context(|| format!("no se pudo escuchar en {}", config.address()))?;

    server.run().context("error fatal del servidor")
}
