//! # Resolución de Colores
//! src/placeholder/color.rs
//!
//! Convierte un token de color (nombre de paleta o hex `RRGGBB`) en un
//! color RGB opaco.
//!
//! ## Política
//!
//! La validación es estricta: un token que no está en la paleta y no es un
//! hex de exactamente 6 dígitos produce `InvalidColor`. Solo el token vacío
//! usa el color por defecto del rol.

use super::error::PlaceholderError;
use regex::Regex;
use std::sync::OnceLock;

/// Color RGB. El alpha es siempre opaco, por eso no se almacena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formatea el color como `#RRGGBB` (hex en mayúsculas)
    ///
    /// # Ejemplo
    /// ```
    /// use placeholder_server::placeholder::color::Color;
    /// assert_eq!(Color::new(255, 165, 0).to_hex(), "#FFA500");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Componentes como arreglo, útil para `image::Rgb`
    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Rol del color dentro de la imagen (define el default)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Background,
    Foreground,
}

impl ColorRole {
    /// Color usado cuando el token viene vacío
    pub fn default_color(&self) -> Color {
        match self {
            ColorRole::Background => Color::new(0xCC, 0xCC, 0xCC),
            ColorRole::Foreground => Color::new(0x33, 0x33, 0x33),
        }
    }
}

/// Paleta de colores con nombre (inmutable)
static PALETTE: &[(&str, Color)] = &[
    ("red", Color::new(255, 0, 0)),
    ("orange", Color::new(255, 165, 0)),
    ("yellow", Color::new(255, 255, 0)),
    ("green", Color::new(0, 128, 0)),
    ("blue", Color::new(0, 0, 255)),
    ("purple", Color::new(128, 0, 128)),
    ("pink", Color::new(255, 192, 203)),
    ("brown", Color::new(165, 42, 42)),
    ("black", Color::new(0, 0, 0)),
    ("white", Color::new(255, 255, 255)),
    ("gray", Color::new(128, 128, 128)),
    ("lightgray", Color::new(211, 211, 211)),
    ("darkgray", Color::new(169, 169, 169)),
];

fn hex_pattern() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"))
}

/// Busca un nombre en la paleta (sensible a mayúsculas)
pub fn lookup_named(name: &str) -> Option<Color> {
    PALETTE
        .iter()
        .find(|(palette_name, _)| *palette_name == name)
        .map(|(_, color)| *color)
}

/// Resuelve un token de color para el rol dado
///
/// # Ejemplo
/// ```
/// use placeholder_server::placeholder::color::{resolve, Color, ColorRole};
///
/// assert_eq!(resolve("red", ColorRole::Background).unwrap(), Color::new(255, 0, 0));
/// assert_eq!(resolve("#00ff00", ColorRole::Foreground).unwrap(), Color::new(0, 255, 0));
/// assert!(resolve("#00ff0", ColorRole::Foreground).is_err());
/// ```
pub fn resolve(token: &str, role: ColorRole) -> Result<Color, PlaceholderError> {
    if token.is_empty() {
        return Ok(role.default_color());
    }

    if let Some(color) = lookup_named(token) {
        return Ok(color);
    }

    let hex = token.strip_prefix('#').unwrap_or(token);
    if !hex_pattern().is_match(hex) {
        return Err(PlaceholderError::InvalidColor(token.to_string()));
    }

    // El regex garantiza 6 dígitos hex ASCII
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| PlaceholderError::InvalidColor(token.to_string()))
    };

    Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
}
