//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea paths HTTP a handlers.
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Las rutas exactas (`/metrics`, `/health`) se revisan primero. Cualquier
//! otro path va al handler de fallback (el generador de imágenes). Sin
//! fallback se responde 404 Not Found.

use crate::http::{Request, Response, StatusCode};
use std::sync::Arc;

/// Un handler recibe un Request y retorna una Response.
///
/// Puede capturar estado compartido (renderer, métricas), por eso es un
/// closure y no un `fn`.
pub type Handler = Arc<dyn Fn(&Request) -> Response + Send + Sync>;

/// Etiqueta de métricas para requests atendidos por el fallback
pub const FALLBACK_LABEL: &str = "placeholder";

/// Etiqueta de métricas para rutas no encontradas
pub const NOT_FOUND_LABEL: &str = "not_found";

/// Router que mapea paths a handlers
pub struct Router {
    routes: Vec<(String, Handler)>,
    fallback: Option<Handler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallback: None,
        }
    }

    /// Registra una ruta exacta
    ///
    /// # Ejemplo
    /// ```
    /// use placeholder_server::router::Router;
    /// use placeholder_server::http::Response;
    ///
    /// let mut router = Router::new();
    /// router.register("/health", |_req| Response::json(r#"{"status": "ok"}"#));
    /// ```
    pub fn register<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.routes.push((path.to_string(), Arc::new(handler)));
    }

    /// Define el handler para paths sin ruta exacta
    pub fn set_fallback<F>(&mut self, handler: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(handler));
    }

    fn find(&self, path: &str) -> Option<(&str, &Handler)> {
        self.routes
            .iter()
            .find(|(route_path, _)| route_path == path)
            .map(|(route_path, handler)| (route_path.as_str(), handler))
    }

    /// Etiqueta para métricas (evita una entrada por cada tamaño pedido)
    pub fn label_for(&self, path: &str) -> &str {
        match self.find(path) {
            Some((route_path, _)) => route_path,
            None if self.fallback.is_some() => FALLBACK_LABEL,
            None => NOT_FOUND_LABEL,
        }
    }

    /// Ejecuta el handler apropiado para un request
    pub fn route(&self, request: &Request) -> Response {
        let path = request.path();

        let mut response = match (self.find(path), &self.fallback) {
            (Some((_, handler)), _) => handler(request),
            (None, Some(fallback)) => fallback(request),
            (None, None) => {
                Response::error(StatusCode::NotFound, &format!("Route not found: {}", path))
            }
        };

        self.add_common_headers(&mut response);
        response
    }

    /// Headers comunes a todas las respuestas
    fn add_common_headers(&self, response: &mut Response) {
        response.add_header("Server", "Placeholder-HTTP/1.0");
        response.add_header("Connection", "close");
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(target: &str) -> Request {
        Request::parse(format!("GET {} HTTP/1.0\r\n\r\n", target).as_bytes()).unwrap()
    }

    #[test]
    fn test_router_creation() {
        let router = Router::new();
        assert_eq!(router.routes.len(), 0);
        assert!(router.fallback.is_none());
    }

    #[test]
    fn test_route_found() {
        let mut router = Router::new();
        router.register("/health", |_| Response::json(r#"{"status": "ok"}"#));

        let response = router.route(&get("/health"));
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Server"), Some("Placeholder-HTTP/1.0"));
        assert_eq!(response.header("Connection"), Some("close"));
    }

    #[test]
    fn test_route_not_found_without_fallback() {
        let router = Router::new();
        let response = router.route(&get("/100x100"));

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(router.label_for("/100x100"), NOT_FOUND_LABEL);
    }

    #[test]
    fn test_fallback() {
        let mut router = Router::new();
        router.register("/health", |_| Response::json("{}"));
        router.set_fallback(|req| Response::new(StatusCode::Ok).with_body(req.path()));

        let response = router.route(&get("/300x200.png"));
        assert_eq!(response.body(), b"/300x200.png");
        assert_eq!(router.label_for("/300x200.png"), FALLBACK_LABEL);
        assert_eq!(router.label_for("/health"), "/health");
    }

    #[test]
    fn test_handler_captures_state() {
        let greeting = Arc::new(String::from("hola"));
        let mut router = Router::new();
        let captured = Arc::clone(&greeting);
        router.register("/greet", move |_| Response::new(StatusCode::Ok).with_body(&captured));

        assert_eq!(router.route(&get("/greet")).body(), b"hola");
    }
}
