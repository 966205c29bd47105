//! # Codificación
//! src/placeholder/encode.rs
//!
//! Convierte la salida del renderer en los bytes de la respuesta HTTP.

use super::error::PlaceholderError;
use super::render::Rendered;
use super::request::ImageFormat;
use flate2::write::GzEncoder;
use flate2::Compression;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::Write;

/// Calidad JPEG por defecto
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Opciones de codificación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Calidad JPEG (1-100)
    pub jpeg_quality: u8,

    /// Comprimir el SVG con gzip (si el cliente lo acepta)
    pub gzip_svg: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            gzip_svg: true,
        }
    }
}

/// Imagen lista para enviar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub content_type: &'static str,
    pub content_encoding: Option<&'static str>,
    pub bytes: Vec<u8>,
}

/// Codifica el resultado del render en el formato pedido
///
/// `accepts_gzip` indica si el cliente envió `Accept-Encoding: gzip`.
pub fn encode(
    rendered: Rendered,
    format: ImageFormat,
    options: &EncodeOptions,
    accepts_gzip: bool,
) -> Result<EncodedImage, PlaceholderError> {
    match (rendered, format) {
        (Rendered::Raster(image), ImageFormat::Png) => Ok(EncodedImage {
            content_type: format.content_type(),
            content_encoding: None,
            bytes: encode_png(&image)?,
        }),
        (Rendered::Raster(image), ImageFormat::Jpeg) => Ok(EncodedImage {
            content_type: format.content_type(),
            content_encoding: None,
            bytes: encode_jpeg(&image, options.jpeg_quality)?,
        }),
        (Rendered::Vector(svg), ImageFormat::Svg) => {
            if options.gzip_svg && accepts_gzip {
                Ok(EncodedImage {
                    content_type: format.content_type(),
                    content_encoding: Some("gzip"),
                    bytes: gzip(svg.as_bytes())?,
                })
            } else {
                Ok(EncodedImage {
                    content_type: format.content_type(),
                    content_encoding: None,
                    bytes: svg.into_bytes(),
                })
            }
        }
        (_, format) => Err(PlaceholderError::EncodeFailure(format!(
            "rendered output does not match format {}",
            format.extension()
        ))),
    }
}

fn encode_png(image: &RgbImage) -> Result<Vec<u8>, PlaceholderError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)
        .map_err(|e| PlaceholderError::EncodeFailure(e.to_string()))?;
    Ok(out)
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, PlaceholderError> {
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .encode(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)
        .map_err(|e| PlaceholderError::EncodeFailure(e.to_string()))?;
    Ok(out)
}

fn gzip(data: &[u8]) -> Result<Vec<u8>, PlaceholderError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| PlaceholderError::EncodeFailure(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| PlaceholderError::EncodeFailure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use image::{GenericImageView, Rgb};
    use std::io::Read;

    fn solid(width: u32, height: u32) -> Rendered {
        Rendered::Raster(RgbImage::from_pixel(width, height, Rgb([255, 0, 0])))
    }

    #[test]
    fn test_encode_png() {
        let encoded = encode(solid(7, 3), ImageFormat::Png, &EncodeOptions::default(), false).unwrap();
        assert_eq!(encoded.content_type, "image/png");
        assert_eq!(&encoded.bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (7, 3));
        assert_eq!(decoded.to_rgb8().get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_encode_jpeg() {
        let encoded = encode(solid(16, 8), ImageFormat::Jpeg, &EncodeOptions::default(), true).unwrap();
        assert_eq!(encoded.content_type, "image/jpeg");
        assert_eq!(encoded.content_encoding, None);
        assert_eq!(&encoded.bytes[..2], &[0xFFu8, 0xD8]);

        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
    }

    #[test]
    fn test_encode_svg_plain() {
        let rendered = Rendered::Vector("<svg/>".to_string());
        let encoded = encode(rendered, ImageFormat::Svg, &EncodeOptions::default(), false).unwrap();
        assert_eq!(encoded.content_type, "image/svg+xml");
        assert_eq!(encoded.content_encoding, None);
        assert_eq!(encoded.bytes, b"<svg/>");
    }

    #[test]
    fn test_encode_svg_gzip() {
        let rendered = Rendered::Vector("<svg>hola</svg>".to_string());
        let encoded = encode(rendered, ImageFormat::Svg, &EncodeOptions::default(), true).unwrap();
        assert_eq!(encoded.content_encoding, Some("gzip"));

        let mut decoded = String::new();
        GzDecoder::new(&encoded.bytes[..]).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "<svg>hola</svg>");
    }

    #[test]
    fn test_gzip_disabled() {
        let options = EncodeOptions { gzip_svg: false, ..EncodeOptions::default() };
        let encoded = encode(Rendered::Vector("<svg/>".into()), ImageFormat::Svg, &options, true).unwrap();
        assert_eq!(encoded.content_encoding, None);
    }

    #[test]
    fn test_mismatched_output() {
        let result = encode(Rendered::Vector("<svg/>".into()), ImageFormat::Png, &EncodeOptions::default(), false);
        assert!(matches!(result, Err(PlaceholderError::EncodeFailure(_))));
    }
}
