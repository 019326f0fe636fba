//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use tournament_gateway::config::GatewayConfig;
use tournament_gateway::security::Mode;

/// What a mock upstream saw.
#[derive(Debug, Clone, Default)]
pub struct RequestHead {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RequestHead {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Handle to a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start an upstream that answers `200` with `"<name> <METHOD> <target> <body>"`
/// and mirrors the `authorization` and `x-request-id` headers it received.
#[allow(dead_code)]
pub async fn start_echo_upstream(name: &'static str) -> MockUpstream {
    start_upstream(move |head| {
        let body = format!(
            "{} {} {} {}",
            name,
            head.method,
            head.target,
            String::from_utf8_lossy(&head.body)
        );
        (200, body.trim_end().to_string())
    })
    .await
}

/// Start an upstream whose response is computed by `f`.
pub async fn start_upstream<F>(f: F) -> MockUpstream
where
    F: Fn(&RequestHead) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let f = Arc::new(f);

    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        let _ = serve_connection(socket, f, counter).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { addr, hits }
}

/// Start an upstream that accepts connections and never answers them.
#[allow(dead_code)]
pub async fn start_silent_upstream() -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(socket);
        }
    });

    MockUpstream { addr, hits }
}

async fn serve_connection<F>(
    mut socket: TcpStream,
    f: Arc<F>,
    counter: Arc<AtomicUsize>,
) -> Option<()>
where
    F: Fn(&RequestHead) -> (u16, String) + Send + Sync + 'static,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head_text = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head_text.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let mut head = RequestHead {
        method: request_line.next()?.to_string(),
        target: request_line.next()?.to_string(),
        ..Default::default()
    };
    for line in lines.filter(|l| !l.is_empty()) {
        if let Some((k, v)) = line.split_once(':') {
            head.headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let content_length: usize = head
        .header("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    head.body = buf[head_end..].to_vec();

    counter.fetch_add(1, Ordering::SeqCst);
    let (status, body) = f(&head);

    let status_text = match status {
        200 => "200 OK",
        201 => "201 Created",
        401 => "401 Unauthorized",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };

    let mut extra = String::new();
    for name in ["authorization", "x-request-id"] {
        if let Some(value) = head.header(name) {
            extra.push_str(&format!("x-seen-{}: {}\r\n", name, value));
        }
    }

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nx-upstream-marker: yes\r\n{}Connection: close\r\n\r\n{}",
        status_text,
        body.len(),
        extra,
        body
    );
    socket.write_all(response.as_bytes()).await.ok()?;
    let _ = socket.shutdown().await;
    Some(())
}

/// Gateway config pointing every handler group at `upstream`.
pub fn gateway_config(mode: Mode, upstream: &MockUpstream) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.mode = mode;
    config.upstreams.default = upstream.url();
    config
}
