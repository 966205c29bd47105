//! # Parsing de Requests HTTP/1.0
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.0 desde cero.
//!
//! ## Formato de un Request HTTP/1.0
//!
//! ```text
//! GET /300x200.png?bg=red&text=Hola HTTP/1.0\r\n
//! Host: localhost:8004\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.0`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//!
//! El servidor solo genera imágenes, así que el body se ignora.

use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use thiserror::Error;

/// Métodos HTTP reconocidos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// HEAD - Como GET pero solo headers (se rechaza con 405)
    HEAD,

    /// POST - Enviar datos a un recurso (se rechaza con 405)
    POST,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es reconocido
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
        }
    }
}

/// Representa un request HTTP/1.0 parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, HEAD, POST)
    method: Method,

    /// Path de la petición (ej: "/300x200.png")
    path: String,

    /// Query parameters decodificados (ej: {"bg": "#ff0000"})
    query_params: HashMap<String, String>,

    /// Headers HTTP con el nombre en minúsculas
    headers: HashMap<String, String>,

    /// Versión HTTP ("HTTP/1.0" o "HTTP/1.1")
    version: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request incompleto o truncado
    #[error("Incomplete HTTP request")]
    IncompleteRequest,

    /// Formato inválido de la request line
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// Método HTTP no soportado
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Versión HTTP incorrecta
    #[error("Invalid HTTP version: {0}")]
    InvalidHttpVersion(String),

    /// Header malformado
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,
}

impl Request {
    /// Parsea un request HTTP/1.0 desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use placeholder_server::http::Request;
    ///
    /// let raw = b"GET /300x200.svg?text=Hola%20mundo HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/300x200.svg");
    /// assert_eq!(request.query_param("text"), Some("Hola mundo"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        // Convertir a string (validando que sea UTF-8 válido)
        let request_str =
            std::str::from_utf8(buffer).map_err(|_| ParseError::InvalidRequestLine)?;

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let lines: Vec<&str> = request_str.split("\r\n").collect();
        if lines.is_empty() {
            return Err(ParseError::IncompleteRequest);
        }

        // 1. Request line
        let (method, path, query_params, version) = Self::parse_request_line(lines[0])?;

        // 2. Headers hasta la línea vacía
        let headers = Self::parse_headers(&lines[1..])?;

        Ok(Request {
            method,
            path,
            query_params,
            headers,
            version,
        })
    }

    /// Parsea la request line: `GET /path?query HTTP/1.0`
    fn parse_request_line(
        line: &str,
    ) -> Result<(Method, String, HashMap<String, String>, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::from_str(parts[0])?;
        let (path, query_params) = Self::parse_path_and_query(parts[1]);

        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok((method, path, query_params, version))
    }

    /// Separa el path de la query string
    ///
    /// Ejemplo: "/10x10.svg?bg=red&text=Hi"
    /// Retorna: ("/10x10.svg", {"bg": "red", "text": "Hi"})
    fn parse_path_and_query(target: &str) -> (String, HashMap<String, String>) {
        match target.split_once('?') {
            Some((path, query)) => (Self::decode_path(path), Self::parse_query_string(query)),
            None => (Self::decode_path(target), HashMap::new()),
        }
    }

    /// Decodifica `%XX` en el path (`+` se mantiene literal)
    fn decode_path(path: &str) -> String {
        percent_decode_str(path).decode_utf8_lossy().into_owned()
    }

    /// Decodifica la query string (`%XX` y `+`)
    ///
    /// Si un parámetro se repite, gana el primero.
    fn parse_query_string(query: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        params
    }

    /// Parsea los headers HTTP (`Name: Value`)
    fn parse_headers(lines: &[&str]) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            // La línea vacía marca el fin de los headers
            if line.trim().is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
                }
                None => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Obtiene un query parameter específico
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    /// Obtiene un header (el nombre no distingue mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET / HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/");
        assert_eq!(request.version(), "HTTP/1.0");
        assert!(request.query_params().is_empty());
    }

    #[test]
    fn test_parse_with_query_params() {
        let raw = b"GET /10x10.svg?bg=red&text=Hi&text_color=blue HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.path(), "/10x10.svg");
        assert_eq!(request.query_param("bg"), Some("red"));
        assert_eq!(request.query_param("text"), Some("Hi"));
        assert_eq!(request.query_param("text_color"), Some("blue"));
    }

    #[test]
    fn test_percent_decoding() {
        let raw = b"GET /1x1?bg=%23ff0000&text=hola+mundo&t2=a%20b HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.query_param("bg"), Some("#ff0000"));
        assert_eq!(request.query_param("text"), Some("hola mundo"));
        assert_eq!(request.query_param("t2"), Some("a b"));
    }

    #[test]
    fn test_path_is_percent_decoded() {
        let request = Request::parse(b"GET /100x50%2Esvg?text=a%2Eb HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(request.path(), "/100x50.svg");
        assert_eq!(request.query_param("text"), Some("a.b"));

        let request = Request::parse(b"GET /a+b HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(request.path(), "/a+b");
    }

    #[test]
    fn test_param_without_value() {
        let raw = b"GET /1x1?text HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.query_param("text"), Some(""));
    }

    #[test]
    fn test_repeated_param_keeps_first() {
        let raw = b"GET /1x1?bg=red&bg=blue HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.query_param("bg"), Some("red"));
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:8004\r\nACCEPT-ENCODING: gzip\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("host"), Some("localhost:8004"));
        assert_eq!(request.header("Accept-Encoding"), Some("gzip"));
    }

    #[test]
    fn test_post_is_parsed() {
        let request = Request::parse(b"POST /1x1 HTTP/1.0\r\n\r\nbody").unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.method().as_str(), "POST");
    }

    #[test]
    fn test_unsupported_method() {
        let result = Request::parse(b"DELETE / HTTP/1.0\r\n\r\n");
        assert_eq!(result.unwrap_err(), ParseError::UnsupportedMethod("DELETE".into()));
    }

    #[test]
    fn test_invalid_version() {
        let result = Request::parse(b"GET / HTTP/2.0\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidHttpVersion(_))));
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(Request::parse(b""), Err(ParseError::EmptyRequest)));
    }

    #[test]
    fn test_invalid_request_line() {
        let result = Request::parse(b"GET\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
    }

    #[test]
    fn test_invalid_header() {
        let result = Request::parse(b"GET / HTTP/1.0\r\nno-colon-here\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn test_non_utf8() {
        let result = Request::parse(b"\xff\xfe GET");
        assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
    }
}
