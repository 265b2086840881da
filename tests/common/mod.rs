//! Shared utilities for the end-to-end proxy tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use spark_ui_proxy::{HttpServer, ProxyConfig, Shutdown};

/// One request observed by a mock upstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

/// Spawn a proxy bound to `addr` fronting `upstream_host`.
pub async fn spawn_proxy(addr: SocketAddr, upstream_host: &str) -> Shutdown {
    let mut config = ProxyConfig::default();
    config.upstream.default_host = upstream_host.to_string();
    config.listener.bind_address = addr.ip().to_string();
    config.listener.port = addr.port();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let listener = TcpListener::bind(addr).await.unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    shutdown
}

/// Start a mock upstream answering every request with the given status,
/// extra headers and body, recording each request it sees.
pub async fn start_upstream(
    addr: SocketAddr,
    status: u16,
    extra_headers: &'static [(&'static str, &'static str)],
    body: &'static str,
) -> Arc<Mutex<Vec<CapturedRequest>>> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let sink = sink.clone();
                    tokio::spawn(async move {
                        handle_upstream_conn(socket, status, extra_headers, body, sink).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    captured
}

async fn handle_upstream_conn(
    mut socket: TcpStream,
    status: u16,
    extra_headers: &'static [(&'static str, &'static str)],
    body: &'static str,
    sink: Arc<Mutex<Vec<CapturedRequest>>>,
) {
    if let Some(request) = read_request(&mut socket).await {
        sink.lock().unwrap().push(request);
    }

    let reason = match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    };
    let mut response = format!("HTTP/1.1 {status} {reason}\r\n");
    for (name, value) in extra_headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    ));

    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Minimal HTTP/1.1 request reader: request line, headers, then a body of
/// exactly content-length bytes.
async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        if buf.len() > 64 * 1024 {
            return None;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Some(CapturedRequest { method, path, body })
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
