//! # Handler de Imágenes
//! src/placeholder/handler.rs
//!
//! Orquesta un request: parse → delay → render → encode → respuesta.
//! Se ejecuta en el thread de la conexión, así que el delay solo bloquea
//! ese request.

use super::encode::{self, EncodeOptions, EncodedImage};
use super::error::PlaceholderError;
use super::render::{FontFace, Renderer};
use super::request::{ImageFormat, RenderRequest, RequestParser};
use crate::config::Config;
use crate::http::request::Method;
use crate::http::{Request, Response, StatusCode};
use log::{debug, error};
use std::thread;

/// Mensaje genérico para errores internos (sin detalles)
const GENERATION_FAILED: &str = "Failed to generate image";

/// Handler de imágenes placeholder
pub struct PlaceholderHandler {
    parser: RequestParser,
    renderer: Renderer,
    options: EncodeOptions,
}

impl PlaceholderHandler {
    pub fn new(parser: RequestParser, renderer: Renderer, options: EncodeOptions) -> Self {
        Self {
            parser,
            renderer,
            options,
        }
    }

    /// Construye el handler a partir de la configuración del servidor
    pub fn from_config(config: &Config) -> Self {
        let font = FontFace::from_config(config.font_path.as_deref());
        Self::new(
            RequestParser::new(config.max_dimension).with_max_delay_ms(config.max_delay_ms),
            Renderer::new(font),
            EncodeOptions {
                jpeg_quality: config.jpeg_quality,
                gzip_svg: config.gzip_svg,
            },
        )
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Atiende un request HTTP completo
    pub fn handle(&self, request: &Request) -> Response {
        if request.method() != Method::GET {
            return Response::error(StatusCode::MethodNotAllowed, "Only GET is supported")
                .with_header("Allow", "GET");
        }

        let render_request = match self.parser.parse(request.path(), request.query_params()) {
            Ok(parsed) => parsed,
            Err(e) => return error_response(&e),
        };

        if let Some(delay) = render_request.delay {
            let wait = delay.sample(&mut rand::thread_rng());
            debug!("Delay de {} ms para {}", wait.as_millis(), request.path());
            thread::sleep(wait);
        }

        let gzip = request.header("Accept-Encoding").map_or(false, accepts_gzip);

        match self.generate(&render_request, gzip) {
            Ok(encoded) => {
                let mut response = image_response(encoded);
                if render_request.format == ImageFormat::Svg {
                    response.add_header("Vary", "Accept-Encoding");
                }
                response
            }
            Err(e) => error_response(&e),
        }
    }

    /// Renderiza y codifica un request ya validado
    pub fn generate(
        &self,
        request: &RenderRequest,
        accepts_gzip: bool,
    ) -> Result<EncodedImage, PlaceholderError> {
        let rendered = self.renderer.render(request)?;
        encode::encode(rendered, request.format, &self.options, accepts_gzip)
    }
}

impl Default for PlaceholderHandler {
    fn default() -> Self {
        Self::new(RequestParser::default(), Renderer::default(), EncodeOptions::default())
    }
}

fn image_response(encoded: EncodedImage) -> Response {
    let mut response = Response::new(StatusCode::Ok)
        .with_header("Content-Type", encoded.content_type)
        .with_body_bytes(encoded.bytes);

    if let Some(encoding) = encoded.content_encoding {
        response.add_header("Content-Encoding", encoding);
    }
    response
}

/// Indica si `Accept-Encoding` admite gzip con peso mayor que cero
///
/// Una entrada explícita `gzip` manda sobre el comodín `*`.
pub fn accepts_gzip(header: &str) -> bool {
    let mut wildcard = None;

    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let coding = parts.next().unwrap_or("").trim();
        let weight = parts
            .filter_map(|param| param.trim().split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
            .map(|(_, value)| value.trim().parse::<f32>().unwrap_or(0.0))
            .unwrap_or(1.0);

        if coding.eq_ignore_ascii_case("gzip") || coding.eq_ignore_ascii_case("x-gzip") {
            return weight > 0.0;
        }
        if coding == "*" {
            wildcard = Some(weight > 0.0);
        }
    }

    wildcard.unwrap_or(false)
}

/// Convierte un error del pipeline en una respuesta HTTP
pub fn error_response(err: &PlaceholderError) -> Response {
    if err.is_client_error() {
        debug!("Request inválido: {}", err);
        Response::error(StatusCode::BadRequest, &err.to_string())
    } else {
        error!("Error generando imagen: {}", err);
        Response::error(StatusCode::InternalServerError, GENERATION_FAILED)
    }
}
