//! # Backend SVG
//! src/placeholder/render/svg.rs

use super::font_size;
use crate::placeholder::request::RenderRequest;

/// Genera el documento SVG del placeholder
///
/// El documento tiene un `<rect>` que cubre todo el canvas y un `<text>`
/// centrado con el mismo tamaño de fuente que el backend raster.
pub fn render_svg(request: &RenderRequest) -> String {
    let (width, height) = (request.width, request.height);

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <rect width="{w}" height="{h}" fill="{bg}"/>
  <text x="50%" y="50%" font-family="sans-serif" font-size="{size}" fill="{fg}" text-anchor="middle" dominant-baseline="middle">{text}</text>
</svg>
"#,
        w = width,
        h = height,
        bg = request.background.to_hex(),
        size = font_size(width),
        fg = request.text_color.to_hex(),
        text = escape_text(&request.text),
    )
}

/// Escapa solo lo necesario para que el XML sea válido
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
