//! # Backend Raster
//! src/placeholder/render/raster.rs
//!
//! Dibuja el placeholder en un buffer RGB8: relleno de fondo y texto
//! centrado horizontal y verticalmente.

use super::font::FontFace;
use super::font_size;
use crate::placeholder::color::Color;
use crate::placeholder::error::PlaceholderError;
use crate::placeholder::request::RenderRequest;
use embedded_graphics::mono_font::ascii::{
    FONT_10X20, FONT_6X10, FONT_6X12, FONT_7X13, FONT_8X13, FONT_9X15, FONT_9X18,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use image::{Rgb, RgbImage};

/// Fuentes bitmap embebidas, de menor a mayor altura de celda
const BUILTIN_FONTS: [&MonoFont<'static>; 7] = [
    &FONT_6X10,
    &FONT_6X12,
    &FONT_7X13,
    &FONT_8X13,
    &FONT_9X15,
    &FONT_9X18,
    &FONT_10X20,
];

/// Renderiza el request a un buffer de pixeles
pub fn render_raster(request: &RenderRequest, font: &FontFace) -> Result<RgbImage, PlaceholderError> {
    if let FontFace::Unavailable(reason) = font {
        return Err(PlaceholderError::RenderFailure(reason.clone()));
    }

    let mut image = RgbImage::from_pixel(
        request.width,
        request.height,
        Rgb(request.background.to_array()),
    );

    let size = font_size(request.width) as f32;
    match font {
        FontFace::Builtin => draw_builtin(&mut image, &request.text, size, request.text_color),
        FontFace::TrueType(face) => {
            draw_truetype(&mut image, face, &request.text, size, request.text_color)
        }
        FontFace::Unavailable(_) => {}
    }

    Ok(image)
}

// ==================== Fuente bitmap ====================

/// DrawTarget de embedded-graphics que escala cada pixel de la fuente
/// a un bloque de `scale` x `scale` sobre la imagen.
struct ScaledCanvas<'a> {
    image: &'a mut RgbImage,
    origin_x: i64,
    origin_y: i64,
    scale: i64,
    glyph_area: Size,
}

impl DrawTarget for ScaledCanvas<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = self.image.width() as i64;
        let height = self.image.height() as i64;

        for Pixel(Point { x, y }, color) in pixels {
            let left = self.origin_x + x as i64 * self.scale;
            let top = self.origin_y + y as i64 * self.scale;
            let value = Rgb([color.r(), color.g(), color.b()]);

            for py in top.max(0)..(top + self.scale).min(height) {
                for px in left.max(0)..(left + self.scale).min(width) {
                    self.image.put_pixel(px as u32, py as u32, value);
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for ScaledCanvas<'_> {
    fn size(&self) -> Size {
        self.glyph_area
    }
}

/// Elige la fuente bitmap y el factor de escala cuya altura de celda
/// queda más cerca de `size`. Ante un empate gana la menor escala.
fn builtin_face(size: f32) -> (&'static MonoFont<'static>, i64) {
    let max_scale = ((size / FONT_10X20.character_size.height as f32).ceil() as i64).max(1) + 1;
    let mut best = (BUILTIN_FONTS[0], 1, f32::MAX);

    for scale in 1..=max_scale {
        for font in BUILTIN_FONTS {
            let height = (font.character_size.height as i64 * scale) as f32;
            let diff = (height - size).abs();
            if diff < best.2 {
                best = (font, scale, diff);
            }
        }
    }

    (best.0, best.1)
}

fn draw_builtin(image: &mut RgbImage, text: &str, size: f32, color: Color) {
    let (font, scale) = builtin_face(size);
    let cell = font.character_size;
    let advance = (cell.width + font.character_spacing) as i64;
    let chars = text.chars().count() as i64;

    // Métricas de la caja de texto sin escalar
    let text_width = (chars * advance - font.character_spacing as i64).max(0);
    let text_height = cell.height as i64;

    let mut canvas = ScaledCanvas {
        origin_x: (image.width() as i64 - text_width * scale) / 2,
        origin_y: (image.height() as i64 - text_height * scale) / 2,
        scale,
        glyph_area: Size::new(text_width as u32, text_height as u32),
        image,
    };

    let style = MonoTextStyle::new(font, Rgb888::new(color.r, color.g, color.b));
    let _ = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut canvas);
}

// ==================== Fuente TrueType ====================

fn draw_truetype(image: &mut RgbImage, font: &fontdue::Font, text: &str, size: f32, color: Color) {
    let glyphs: Vec<(fontdue::Metrics, Vec<u8>)> =
        text.chars().map(|c| font.rasterize(c, size)).collect();

    let text_width: f32 = glyphs.iter().map(|(metrics, _)| metrics.advance_width).sum();
    let (ascent, descent) = font
        .horizontal_line_metrics(size)
        .map(|line| (line.ascent, line.descent))
        .unwrap_or((size * 0.8, -size * 0.2));

    let width = image.width() as i64;
    let height = image.height() as i64;
    let top = (height as f32 - (ascent - descent)) / 2.0;
    let baseline = (top + ascent).round() as i64;
    let mut pen_x = (width as f32 - text_width) / 2.0;

    for (metrics, coverage) in &glyphs {
        let glyph_left = pen_x.round() as i64 + metrics.xmin as i64;
        let glyph_top = baseline - metrics.ymin as i64 - metrics.height as i64;

        for row in 0..metrics.height {
            let py = glyph_top + row as i64;
            if py < 0 || py >= height {
                continue;
            }
            for col in 0..metrics.width {
                let px = glyph_left + col as i64;
                let alpha = coverage[row * metrics.width + col];
                if alpha == 0 || px < 0 || px >= width {
                    continue;
                }
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                *pixel = blend(*pixel, color, alpha);
            }
        }

        pen_x += metrics.advance_width;
    }
}

/// Mezcla `color` sobre `under` con la cobertura dada (0-255)
fn blend(under: Rgb<u8>, color: Color, alpha: u8) -> Rgb<u8> {
    let a = alpha as u32;
    let mix = |over: u8, base: u8| ((over as u32 * a + base as u32 * (255 - a) + 127) / 255) as u8;
    Rgb([
        mix(color.r, under[0]),
        mix(color.g, under[1]),
        mix(color.b, under[2]),
    ])
}
