//! # Parser de RenderRequest
//! src/placeholder/request.rs
//!
//! Convierte el path y los query parameters en un `RenderRequest` validado.
//!
//! ## Formato del path
//!
//! ```text
//! /{ancho}x{alto}[.{formato}]
//! /300x200
//! /300x200.jpg
//! /300x200.svg
//! ```
//!
//! ## Query parameters
//!
//! - `bg`: color de fondo
//! - `text`: texto a mostrar (por defecto `{ancho}x{alto}`)
//! - `text_color`: color del texto
//! - `delay`: `<ms>` o `<min>-<max>` (hasta `max_delay_ms`)
//!
//! Los errores se reportan en este orden: path, tamaño, ancho, alto,
//! formato, delay, color de fondo, color de texto.

use super::color::{self, Color, ColorRole};
use super::delay::{DelaySpec, DEFAULT_MAX_DELAY_MS};
use super::error::PlaceholderError;
use std::collections::HashMap;

/// Límite de dimensiones por defecto
pub const DEFAULT_MAX_DIMENSION: u32 = 4096;

/// Formatos de salida soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Svg,
}

impl ImageFormat {
    /// Parsea la extensión del path (sensible a mayúsculas)
    pub fn from_extension(ext: &str) -> Result<Self, PlaceholderError> {
        match ext {
            "png" => Ok(ImageFormat::Png),
            "jpg" => Ok(ImageFormat::Jpeg),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(PlaceholderError::InvalidFormat(ext.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Svg => "svg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

/// Descripción validada e inmutable de una imagen a generar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub background: Color,
    pub text: String,
    pub text_color: Color,
    pub delay: Option<DelaySpec>,
}

/// Parser de requests con sus límites
#[derive(Debug, Clone, Copy)]
pub struct RequestParser {
    max_dimension: u32,
    max_delay_ms: u64,
}

impl RequestParser {
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
        }
    }

    /// Cambia el delay máximo aceptado
    pub fn with_max_delay_ms(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    pub fn max_delay_ms(&self) -> u64 {
        self.max_delay_ms
    }

    /// Parsea path + query en un `RenderRequest`
    ///
    /// # Ejemplo
    /// ```
    /// use placeholder_server::placeholder::request::{ImageFormat, RequestParser};
    /// use std::collections::HashMap;
    ///
    /// let parser = RequestParser::default();
    /// let request = parser.parse("/300x200.jpg", &HashMap::new()).unwrap();
    ///
    /// assert_eq!((request.width, request.height), (300, 200));
    /// assert_eq!(request.format, ImageFormat::Jpeg);
    /// assert_eq!(request.text, "300x200");
    /// ```
    pub fn parse(
        &self,
        path: &str,
        query: &HashMap<String, String>,
    ) -> Result<RenderRequest, PlaceholderError> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        if trimmed.is_empty() {
            return Err(PlaceholderError::InvalidPath("empty path".to_string()));
        }

        let segments: Vec<&str> = trimmed.split('.').collect();
        if segments.len() > 2 {
            return Err(PlaceholderError::InvalidPath(path.to_string()));
        }

        let (width, height) = self.parse_size(segments[0])?;

        let format = match segments.get(1) {
            Some(ext) => ImageFormat::from_extension(ext)?,
            None => ImageFormat::Png,
        };

        let param = |name: &str| query.get(name).map(String::as_str).unwrap_or("");

        let delay = DelaySpec::parse(param("delay"))?;
        if let Some(spec) = delay {
            if spec.max_millis() > self.max_delay_ms {
                return Err(PlaceholderError::InvalidDelayFormat(format!(
                    "{} (max {} ms)",
                    param("delay"),
                    self.max_delay_ms
                )));
            }
        }
        let background = color::resolve(param("bg"), ColorRole::Background)?;
        let text_color = color::resolve(param("text_color"), ColorRole::Foreground)?;

        let text = match param("text") {
            "" => format!("{}x{}", width, height),
            text => text.to_string(),
        };

        Ok(RenderRequest {
            width,
            height,
            format,
            background,
            text,
            text_color,
            delay,
        })
    }

    fn parse_size(&self, token: &str) -> Result<(u32, u32), PlaceholderError> {
        let parts: Vec<&str> = token.split('x').collect();
        if parts.len() != 2 {
            return Err(PlaceholderError::InvalidSizeFormat(token.to_string()));
        }

        let width = self
            .parse_dimension(parts[0])
            .ok_or_else(|| PlaceholderError::InvalidWidth(parts[0].to_string()))?;
        let height = self
            .parse_dimension(parts[1])
            .ok_or_else(|| PlaceholderError::InvalidHeight(parts[1].to_string()))?;

        Ok((width, height))
    }

    fn parse_dimension(&self, value: &str) -> Option<u32> {
        value
            .parse::<u32>()
            .ok()
            .filter(|&n| n >= 1 && n <= self.max_dimension)
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIMENSION)
    }
}
