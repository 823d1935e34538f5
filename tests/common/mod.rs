//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use route_planner::config::PlannerConfig;

/// Request counter shared with a mock backend.
#[derive(Debug, Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Start a mock backend that always answers `status` with a JSON `body`.
pub async fn start_mock_backend(status: u16, body: &'static str) -> (SocketAddr, Hits) {
    start_programmable_backend(move |_request| async move { (status, body.to_string()) }).await
}

/// Start a programmable mock backend on an ephemeral port.
///
/// The handler receives the raw request (head and body) and returns the
/// status and JSON body to send back.
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Hits)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Hits::default();
    let counter = hits.clone();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    counter.0.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, hits)
}

// Reads the head plus Content-Length bytes of body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(head_end) = find_head_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// OSRM body with one route of the given distance and duration.
pub fn osrm_body(distance_meters: f64, duration_seconds: f64) -> String {
    format!(
        r#"{{"code":"Ok","routes":[{{"geometry":{{"coordinates":[[9.18,48.78],[9.19,48.79],[9.20,48.80]]}},"distance":{distance_meters},"duration":{duration_seconds}}}]}}"#
    )
}

/// Config pointing at local mock providers with a short timeout.
pub fn planner_config(osrm: &[SocketAddr], valhalla: Option<SocketAddr>) -> PlannerConfig {
    let mut config = PlannerConfig::default();
    config.providers.osrm_urls = osrm
        .iter()
        .map(|addr| format!("http://{addr}/route/v1/driving"))
        .collect();
    config.providers.valhalla_url = valhalla.map(|addr| format!("http://{addr}/route"));
    config.providers.timeout_secs = 1;
    config
}
