//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Implementación mínima de HTTP/1.0 sin librerías de alto nivel:
//!
//! - Parsing de requests (request line, headers, query parameters)
//! - Construcción de responses con body binario
//! - Status codes
//!
//! ### Formato de Request
//!
//! ```text
//! GET /300x200.png?bg=red HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: image/png\r\n
//! Content-Length: 1234\r\n
//! \r\n
//! <bytes>
//! ```

pub mod request;
pub mod response;
pub mod status;

pub use request::Request;
pub use response::Response;
pub use status::StatusCode;
