//! Tests de integración para el servidor de placeholders
//! tests/integration_test.rs
//!
//! Cada test levanta el servidor en un puerto efímero y habla HTTP/1.0
//! crudo sobre un `TcpStream`.

use flate2::read::GzDecoder;
use placeholder_server::config::Config;
use placeholder_server::server::Server;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

/// Helper: levanta un servidor en 127.0.0.1:0 y retorna su dirección
fn start_server() -> SocketAddr {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Config::default()
    };
    let server = Server::bind(&config).expect("Failed to bind server");
    let addr = server.local_addr().expect("local addr");

    thread::spawn(move || {
        server.run().ok();
    });

    addr
}

/// Respuesta HTTP separada en partes
struct RawResponse {
    status_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Helper: envía un request crudo y parsea la respuesta
fn send_raw(addr: SocketAddr, raw: &str) -> Result<RawResponse, Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect(addr)?;
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    stream.set_write_timeout(Some(Duration::from_secs(5)))?;

    stream.write_all(raw.as_bytes())?;
    stream.flush()?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response)?;

    let split = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or("response without header terminator")?;

    let head = String::from_utf8(response[..split].to_vec())?;
    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap_or_default().to_string();
    let headers = lines
        .filter_map(|line| line.split_once(": "))
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();

    Ok(RawResponse {
        status_line,
        headers,
        body: response[split + 4..].to_vec(),
    })
}

fn send_request(addr: SocketAddr, path: &str) -> RawResponse {
    send_raw(addr, &format!("GET {} HTTP/1.0\r\n\r\n", path)).expect("Failed to send request")
}

#[test]
fn test_png_default() {
    let addr = start_server();
    let response = send_request(addr, "/100x50");

    assert_eq!(response.status_line, "HTTP/1.0 200 OK");
    assert_eq!(response.header("Content-Type"), Some("image/png"));

    let image = image::load_from_memory(&response.body).expect("decodable PNG");
    assert_eq!((image.width(), image.height()), (100, 50));
}

#[test]
fn test_jpeg() {
    let addr = start_server();
    let response = send_request(addr, "/64x32.jpg?bg=orange");

    assert_eq!(response.header("Content-Type"), Some("image/jpeg"));
    let image = image::load_from_memory(&response.body).expect("decodable JPEG");
    assert_eq!((image.width(), image.height()), (64, 32));
}

#[test]
fn test_svg_with_colors_and_text() {
    let addr = start_server();
    let response = send_request(addr, "/10x10.svg?bg=red&text=Hi&text_color=blue");

    assert_eq!(response.status_line, "HTTP/1.0 200 OK");
    assert_eq!(response.header("Content-Type"), Some("image/svg+xml"));

    let body = response.body_text();
    assert!(body.contains("<rect"));
    assert!(body.contains(r##"fill="#FF0000""##));
    assert!(body.contains(r##"fill="#0000FF""##));
    assert!(body.contains(">Hi</text>"));
}

#[test]
fn test_svg_hex_colors_percent_encoded() {
    let addr = start_server();
    let response = send_request(addr, "/20x20.svg?bg=%23abcdef&text_color=123456&text=a+b");

    let body = response.body_text();
    assert!(body.contains(r##"fill="#ABCDEF""##));
    assert!(body.contains(r##"fill="#123456""##));
    assert!(body.contains(">a b</text>"));
}

#[test]
fn test_svg_gzip() {
    let addr = start_server();
    let response = send_raw(
        addr,
        "GET /10x10.svg HTTP/1.1\r\nAccept-Encoding: gzip\r\n\r\n",
    )
    .unwrap();

    assert_eq!(response.header("Content-Encoding"), Some("gzip"));
    let mut svg = String::new();
    GzDecoder::new(&response.body[..]).read_to_string(&mut svg).unwrap();
    assert!(svg.contains(">10x10</text>"));
}

#[test]
fn test_unsupported_format() {
    let addr = start_server();
    let response = send_request(addr, "/50x50.bmp");

    assert!(response.status_line.contains("400"));
    assert_eq!(response.body_text(), "Invalid format: bmp");
}

#[test]
fn test_delay_range_inverted() {
    let addr = start_server();
    let response = send_request(addr, "/50x50?delay=10-5");
    assert!(response.status_line.contains("400"));
    assert!(response.body_text().starts_with("Invalid delay format"));
}

#[test]
fn test_non_integer_dimensions() {
    let addr = start_server();
    let response = send_request(addr, "/abcxdef.png");
    assert!(response.status_line.contains("400"));
    assert!(response.body_text().starts_with("Invalid width"));
}

#[test]
fn test_invalid_color() {
    let addr = start_server();
    let response = send_request(addr, "/10x10?bg=notacolor");
    assert!(response.status_line.contains("400"));
}

#[test]
fn test_method_not_allowed() {
    let addr = start_server();
    let response = send_raw(addr, "POST /10x10 HTTP/1.0\r\n\r\n").unwrap();
    assert!(response.status_line.contains("405"));
}

#[test]
fn test_other_methods_not_allowed() {
    let addr = start_server();
    for method in ["DELETE", "PUT", "PATCH"] {
        let response = send_raw(addr, &format!("{} /10x10 HTTP/1.0\r\n\r\n", method)).unwrap();
        assert_eq!(response.status_line, "HTTP/1.0 405 Method Not Allowed", "{}", method);
        assert_eq!(response.header("Allow"), Some("GET"));
    }
}

#[test]
fn test_svg_gzip_refused_with_zero_weight() {
    let addr = start_server();
    let response = send_raw(
        addr,
        "GET /10x10.svg HTTP/1.1\r\nAccept-Encoding: gzip;q=0, identity\r\n\r\n",
    )
    .unwrap();

    assert_eq!(response.header("Content-Encoding"), None);
    assert_eq!(response.header("Vary"), Some("Accept-Encoding"));
    assert!(response.body_text().contains(">10x10</text>"));
}

#[test]
fn test_percent_encoded_path() {
    let addr = start_server();
    let response = send_request(addr, "/100x50%2Esvg");

    assert_eq!(response.status_line, "HTTP/1.0 200 OK");
    assert_eq!(response.header("Content-Type"), Some("image/svg+xml"));
}

#[test]
fn test_delay_above_limit() {
    let addr = start_server();
    let response = send_request(addr, "/10x10?delay=18446744073709551615");
    assert!(response.status_line.contains("400"));
    assert!(response.body_text().starts_with("Invalid delay format"));
}

#[test]
fn test_delay_does_not_block_other_requests() {
    let addr = start_server();

    let slow = thread::spawn(move || {
        let start = Instant::now();
        let response = send_request(addr, "/10x10.svg?delay=400");
        (response.status_line, start.elapsed())
    });

    // Dar tiempo a que el request lento llegue primero
    thread::sleep(Duration::from_millis(50));
    let start = Instant::now();
    let fast = send_request(addr, "/10x10.svg");
    let fast_elapsed = start.elapsed();

    let (slow_status, slow_elapsed) = slow.join().unwrap();

    assert_eq!(fast.status_line, "HTTP/1.0 200 OK");
    assert_eq!(slow_status, "HTTP/1.0 200 OK");
    assert!(slow_elapsed >= Duration::from_millis(400));
    assert!(fast_elapsed < Duration::from_millis(300));
}

#[test]
fn test_metrics_endpoint() {
    let addr = start_server();
    send_request(addr, "/10x10.svg");
    send_request(addr, "/10x10.bmp");

    let response = send_request(addr, "/metrics");
    assert_eq!(response.header("Content-Type"), Some("application/json"));

    let json: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert!(json["total_requests"].as_u64().unwrap() >= 2);
    assert_eq!(json["requests_per_route"]["placeholder"], 2);
}

#[test]
fn test_health_endpoint() {
    let addr = start_server();
    let response = send_request(addr, "/health");

    assert_eq!(response.status_line, "HTTP/1.0 200 OK");
    assert!(response.body_text().contains("builtin"));
}

#[test]
fn test_multiple_requests_sequentially() {
    let addr = start_server();
    for size in 1..=5 {
        let response = send_request(addr, &format!("/{}x{}.png", size * 10, size * 5));
        assert_eq!(response.status_line, "HTTP/1.0 200 OK", "request {} failed", size);
    }
}
