//! # Fuentes
//! src/placeholder/render/font.rs
//!
//! Fuente usada por el backend raster. Hay dos fuentes reales:
//!
//! - **Builtin**: fuentes bitmap monoespaciadas de 10 a 20 px de alto
//!   embebidas en el binario (embedded-graphics), escaladas por un factor
//!   entero para tamaños mayores. Siempre disponible.
//! - **TrueType**: archivo TTF/OTF cargado al iniciar y rasterizado con
//!   `fontdue` (anti-aliasing).
//!
//! Si el archivo configurado no se puede cargar, la fuente queda
//! `Unavailable` y cada render raster falla con error 500.

use crate::placeholder::error::PlaceholderError;
use log::{info, warn};
use std::fs;
use std::path::Path;

/// Fuente compartida (inmutable) por todos los threads
pub enum FontFace {
    /// Fuente bitmap embebida
    Builtin,

    /// Fuente TrueType cargada desde disco
    TrueType(Box<fontdue::Font>),

    /// La fuente configurada no pudo cargarse (motivo)
    Unavailable(String),
}

impl FontFace {
    /// Carga una fuente TrueType desde un archivo
    pub fn load(path: &Path) -> Result<Self, PlaceholderError> {
        let bytes = fs::read(path).map_err(|e| {
            PlaceholderError::RenderFailure(format!("cannot read font {}: {}", path.display(), e))
        })?;

        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(
            |e| PlaceholderError::RenderFailure(format!("cannot parse font {}: {}", path.display(), e)),
        )?;

        Ok(FontFace::TrueType(Box::new(font)))
    }

    /// Resuelve la fuente según la configuración
    ///
    /// Sin ruta se usa la fuente embebida. Con una ruta inválida el servidor
    /// sigue arrancando, pero los renders raster responderán 500.
    pub fn from_config(path: Option<&Path>) -> Self {
        match path {
            None => {
                info!("Usando fuente bitmap embebida");
                FontFace::Builtin
            }
            Some(path) => match Self::load(path) {
                Ok(face) => {
                    info!("Fuente TrueType cargada: {}", path.display());
                    face
                }
                Err(e) => {
                    warn!("{}; los renders PNG/JPEG fallarán", e);
                    FontFace::Unavailable(e.to_string())
                }
            },
        }
    }

    pub fn describe(&self) -> &str {
        match self {
            FontFace::Builtin => "builtin bitmap",
            FontFace::TrueType(_) => "truetype",
            FontFace::Unavailable(_) => "unavailable",
        }
    }
}

impl Default for FontFace {
    fn default() -> Self {
        FontFace::Builtin
    }
}
