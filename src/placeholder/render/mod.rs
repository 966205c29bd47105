//! # Renderer
//! src/placeholder/render/mod.rs
//!
//! Convierte un `RenderRequest` en pixeles (PNG/JPEG) o en un documento
//! SVG.
//!
//! ## Tamaño de fuente
//!
//! ```text
//! font_size = max(MIN_FONT_SIZE, ancho / FONT_SIZE_DIVISOR)
//! ```
//!
//! Así el texto es legible en imágenes chicas y crece con el ancho.

pub mod font;
pub mod raster;
pub mod svg;

pub use font::FontFace;

use super::error::PlaceholderError;
use super::request::{ImageFormat, RenderRequest};
use image::RgbImage;

/// Tamaño mínimo de fuente en pixeles
pub const MIN_FONT_SIZE: u32 = 12;

/// Divisor del ancho para calcular el tamaño de fuente
pub const FONT_SIZE_DIVISOR: u32 = 10;

/// Tamaño de fuente para un ancho dado
pub fn font_size(width: u32) -> u32 {
    (width / FONT_SIZE_DIVISOR).max(MIN_FONT_SIZE)
}

/// Resultado del render, antes de codificar
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Raster(RgbImage),
    Vector(String),
}

/// Renderer compartido entre threads
pub struct Renderer {
    font: FontFace,
}

impl Renderer {
    pub fn new(font: FontFace) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &FontFace {
        &self.font
    }

    /// Renderiza según el formato del request
    pub fn render(&self, request: &RenderRequest) -> Result<Rendered, PlaceholderError> {
        match request.format {
            ImageFormat::Png | ImageFormat::Jpeg => {
                raster::render_raster(request, &self.font).map(Rendered::Raster)
            }
            ImageFormat::Svg => Ok(Rendered::Vector(svg::render_svg(request))),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(FontFace::Builtin)
    }
}
