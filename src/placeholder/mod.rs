//! # Generador de Imágenes Placeholder
//! src/placeholder/mod.rs
//!
//! Pipeline completo de un request de imagen:
//!
//! ```text
//! path + query → RequestParser → RenderRequest
//!              → delay (opcional)
//!              → Renderer (raster o SVG)
//!              → encode (PNG, JPEG, SVG)
//!              → Response
//! ```
//!
//! - `color`: nombres de paleta y hex → RGB
//! - `request`: parsing y validación del path y query
//! - `delay`: delay fijo o aleatorio en un rango
//! - `render`: backends raster (con fuente) y SVG
//! - `encode`: codificación de la salida
//! - `handler`: orquestación y mapeo a respuestas HTTP

pub mod color;
pub mod delay;
pub mod encode;
pub mod error;
pub mod handler;
pub mod render;
pub mod request;

pub use error::PlaceholderError;
pub use handler::PlaceholderHandler;
pub use request::{ImageFormat, RenderRequest, RequestParser};
