//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Cada conexión se procesa en su propio thread, así que un request con
//! `delay` solo bloquea su thread y el servidor sigue aceptando conexiones.

use crate::config::Config;
use crate::http::request::ParseError;
use crate::http::{Request, Response, StatusCode};
use crate::metrics::MetricsCollector;
use crate::placeholder::PlaceholderHandler;
use crate::router::Router;
use log::{debug, error, info, warn};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Tamaño del buffer de lectura (request line + headers)
const READ_BUFFER_SIZE: usize = 8192;

/// Servidor HTTP/1.0 concurrente
pub struct Server {
    router: Arc<Router>,
    metrics: Arc<MetricsCollector>,
    listener: TcpListener,
    read_timeout: Duration,
}

impl Server {
    /// Construye el router y hace bind del puerto
    pub fn bind(config: &Config) -> io::Result<Self> {
        let metrics = Arc::new(MetricsCollector::new());
        let handler = Arc::new(PlaceholderHandler::from_config(config));
        let router = Self::build_router(handler, Arc::clone(&metrics));

        let address = config.address();
        let listener = TcpListener::bind(&address)?;
        info!("Servidor escuchando en {}", listener.local_addr()?);

        Ok(Self {
            router: Arc::new(router),
            metrics,
            listener,
            read_timeout: config.read_timeout(),
        })
    }

    /// Registra `/health`, `/metrics` y el generador como fallback
    pub fn build_router(handler: Arc<PlaceholderHandler>, metrics: Arc<MetricsCollector>) -> Router {
        let mut router = Router::new();

        let health_handler = Arc::clone(&handler);
        router.register("/health", move |_req| {
            let body = serde_json::json!({
                "status": "ok",
                "font": health_handler.renderer().font().describe(),
            });
            Response::json(&body.to_string())
        });

        router.register("/metrics", move |_req| Response::json(&metrics.to_json()));

        router.set_fallback(move |req| handler.handle(req));
        router
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Acepta conexiones para siempre (bloquea el thread actual)
    pub fn run(self) -> io::Result<()> {
        info!("Modo concurrente: un thread por conexión");

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);
                    let metrics = Arc::clone(&self.metrics);
                    let read_timeout = self.read_timeout;

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    debug!("Nueva conexión desde {}", peer_addr);

                    metrics.increment_active_threads();

                    thread::spawn(move || {
                        if let Err(e) =
                            Self::handle_connection(stream, &router, &metrics, read_timeout)
                        {
                            warn!("Error en conexión {}: {}", peer_addr, e);
                        }
                        metrics.decrement_active_threads();
                    });
                }
                Err(e) => {
                    error!("Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    fn handle_connection(
        mut stream: TcpStream,
        router: &Router,
        metrics: &MetricsCollector,
        read_timeout: Duration,
    ) -> io::Result<()> {
        let start = Instant::now();
        let request_id = Self::request_id();

        stream.set_read_timeout(Some(read_timeout))?;

        let buffer = Self::read_head(&mut stream)?;

        if buffer.is_empty() {
            debug!("Conexión cerrada sin datos");
            return Ok(());
        }

        let (mut response, label) = match Request::parse(&buffer) {
            Ok(request) => {
                debug!("[{}] {} {}", &request_id[..8], request.method().as_str(), request.path());
                let label = router.label_for(request.path()).to_string();
                (router.route(&request), label)
            }
            Err(ParseError::UnsupportedMethod(method)) => {
                debug!("[{}] Método no permitido: {}", &request_id[..8], method);
                (
                    Response::error(StatusCode::MethodNotAllowed, "Only GET is supported")
                        .with_header("Allow", "GET"),
                    "method_not_allowed".to_string(),
                )
            }
            Err(e) => {
                debug!("[{}] Parse error: {}", &request_id[..8], e);
                (
                    Response::error(StatusCode::BadRequest, &format!("Invalid: {}", e)),
                    "invalid".to_string(),
                )
            }
        };

        response.add_header("X-Request-Id", &request_id);

        // La respuesta se escribe completa de una vez
        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        let latency = start.elapsed();
        metrics.record_request(&label, response.status().as_u16(), response.body().len(), latency);

        info!(
            "[{}] {} {} ({:.2}ms)",
            &request_id[..8],
            label,
            response.status(),
            latency.as_secs_f64() * 1000.0
        );

        Ok(())
    }

    /// Lee hasta el fin de los headers (`\r\n\r\n`), EOF o el límite del buffer
    ///
    /// Si el timeout vence con datos parciales se parsea lo recibido.
    fn read_head(stream: &mut TcpStream) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(1024);
        let mut chunk = [0u8; 1024];

        while buffer.len() < READ_BUFFER_SIZE {
            let limit = chunk.len().min(READ_BUFFER_SIZE - buffer.len());
            let n = match stream.read(&mut chunk[..limit]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e)
                    if !buffer.is_empty()
                        && matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) =>
                {
                    break
                }
                Err(e) => return Err(e),
            };
            if n == 0 {
                break;
            }

            // Buscar el terminador incluyendo los últimos bytes del bloque anterior
            let search_from = buffer.len().saturating_sub(3);
            buffer.extend_from_slice(&chunk[..n]);
            if buffer[search_from..].windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        Ok(buffer)
    }

    /// ID único de request a partir del reloj y el thread actual
    fn request_id() -> String {
        let mut hasher = DefaultHasher::new();
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default()
            .hash(&mut hasher);
        thread::current().id().hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}
