//! # Placeholder Server
//! src/lib.rs
//!
//! Servidor HTTP/1.0 concurrente que genera imágenes placeholder:
//! `GET /300x200.png?bg=red&text=Hola` devuelve una imagen de 300x200 con
//! fondo rojo y el texto centrado.
//!
//! ## Arquitectura
//!
//! - `http`: Parsing y manejo del protocolo HTTP/1.0
//! - `server`: Servidor TCP, un thread por conexión
//! - `router`: Enrutamiento de peticiones a handlers
//! - `placeholder`: Parsing del request, colores, delay, render y encoding
//! - `metrics`: Recolección de métricas y observabilidad
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use placeholder_server::config::Config;
//! use placeholder_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(&config).expect("Error al hacer bind");
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod metrics;
pub mod placeholder;
pub mod router;
pub mod server;
