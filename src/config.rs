//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./placeholder_server --port 8004 \
//!   --font-path /usr/share/fonts/truetype/dejavu/DejaVuSans.ttf \
//!   --jpeg-quality 85 \
//!   --max-dimension 2048
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! PORT=9000 LISTEN_HOST=127.0.0.1 ./placeholder_server
//! ```

use crate::placeholder::encode::DEFAULT_JPEG_QUALITY;
use crate::placeholder::delay::DEFAULT_MAX_DELAY_MS;
use crate::placeholder::request::DEFAULT_MAX_DIMENSION;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Configuración del servidor de placeholders
#[derive(Debug, Clone, Parser)]
#[command(name = "placeholder_server")]
#[command(about = "Servidor HTTP/1.0 que genera imágenes placeholder")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8004", env = "PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "LISTEN_HOST")]
    pub host: String,

    /// Archivo TTF/OTF para el texto de PNG/JPEG (sin él, fuente bitmap embebida)
    #[arg(long = "font-path", env = "FONT_PATH")]
    pub font_path: Option<PathBuf>,

    /// Calidad de las imágenes JPEG (1-100)
    #[arg(long = "jpeg-quality", default_value = "90", env = "JPEG_QUALITY")]
    pub jpeg_quality: u8,

    /// Ancho/alto máximo aceptado en pixeles
    #[arg(long = "max-dimension", default_value = "4096", env = "MAX_DIMENSION")]
    pub max_dimension: u32,

    /// Delay máximo que un cliente puede pedir en milisegundos
    #[arg(long = "max-delay-ms", default_value = "60000", env = "MAX_DELAY_MS")]
    pub max_delay_ms: u64,

    /// Timeout de lectura por conexión en milisegundos
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Comprimir SVG con gzip cuando el cliente lo acepta
    #[arg(
        long = "gzip-svg",
        default_value = "true",
        env = "GZIP_SVG",
        action = clap::ArgAction::Set
    )]
    pub gzip_svg: bool,
}

impl Config {
    /// Crea una configuración parseando argumentos CLI y entorno
    pub fn new() -> Self {
        Config::parse()
    }

    /// Dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use placeholder_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8004");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err("JPEG quality must be 1-100".to_string());
        }
        if self.max_dimension == 0 || self.max_dimension > u16::MAX as u32 {
            return Err(format!("Max dimension must be 1-{}", u16::MAX));
        }
        if self.read_timeout_ms == 0 {
            return Err("Read timeout must be > 0".to_string());
        }
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8004,
            host: "0.0.0.0".to_string(),
            font_path: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            read_timeout_ms: 5_000,
            gzip_svg: true,
        }
    }
}
