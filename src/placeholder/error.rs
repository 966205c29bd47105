//! # Errores del Pipeline de Imágenes
//! src/placeholder/error.rs
//!
//! Taxonomía de errores del generador. Los errores de parsing son errores
//! del cliente (400); los de render y encoding son del servidor (500).

use thiserror::Error;

/// Errores que pueden ocurrir al generar una imagen placeholder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    /// Path vacío o con demasiados segmentos
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// El token de tamaño no tiene la forma `{ancho}x{alto}`
    #[error("Invalid size format: {0}")]
    InvalidSizeFormat(String),

    /// Ancho no numérico, cero o fuera de rango
    #[error("Invalid width: {0}")]
    InvalidWidth(String),

    /// Alto no numérico, cero o fuera de rango
    #[error("Invalid height: {0}")]
    InvalidHeight(String),

    /// Formato distinto de png, jpg o svg
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Parámetro `delay` malformado
    #[error("Invalid delay format: {0}")]
    InvalidDelayFormat(String),

    /// Color que no es nombre de la paleta ni hex de 6 dígitos
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Falló el dibujado (ej: fuente no disponible)
    #[error("Render failure: {0}")]
    RenderFailure(String),

    /// Falló la codificación PNG/JPEG/gzip
    #[error("Encode failure: {0}")]
    EncodeFailure(String),
}

impl PlaceholderError {
    /// Indica si el error es culpa del cliente (input inválido)
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            PlaceholderError::RenderFailure(_) | PlaceholderError::EncodeFailure(_)
        )
    }
}
