#![allow(dead_code)]

//! Minimal HTTP stub of the scoring service for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl StubRequest {
    /// Parse the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

type Responder = dyn Fn(&StubRequest) -> (u16, String) + Send + Sync + 'static;

/// Running stub server.
pub struct StubServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl StubServer {
    /// Number of requests answered so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a stub that answers every request with `respond`.
pub async fn spawn_stub<F>(respond: F) -> StubServer
where
    F: Fn(&StubRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let respond: Arc<Responder> = Arc::new(respond);
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = Arc::clone(&hits);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let respond = Arc::clone(&respond);
            let hits = Arc::clone(&hits_clone);
            tokio::spawn(async move {
                let _ = serve_one(&mut socket, &respond, &hits).await;
            });
        }
    });

    StubServer {
        base_url: format!("http://{addr}"),
        hits,
    }
}

/// Stub that scores each deal from a `(opportunity_id, probability)` table
/// and answers 500 for unknown ids.
///
/// `/recommend_action` advises "Close" at the table probability and reports
/// unknown ids the way the service does, as a 200 with an `error` field.
pub async fn spawn_scoring_stub(table: &[(&str, f64)]) -> StubServer {
    let table: Vec<(String, f64)> = table.iter().map(|(id, p)| ((*id).to_string(), *p)).collect();
    spawn_stub(move |request| {
        if request.path == "/health" {
            return (200, r#"{"status":"ok"}"#.to_string());
        }
        let payload = request.json();
        let id = payload["opportunity_id"].as_str().unwrap_or_default().to_string();
        let known = table.iter().find(|(known, _)| *known == id);
        if request.path == "/recommend_action" {
            return match known {
                Some((_, p)) => (
                    200,
                    serde_json::json!({
                        "opportunity_id": id,
                        "recommended_action": "Close",
                        "confidence": p,
                    })
                    .to_string(),
                ),
                None => (200, r#"{"error":"unknown opportunity"}"#.to_string()),
            };
        }
        match known {
            Some((_, p)) => (
                200,
                serde_json::json!({ "opportunity_id": id, "win_probability": p }).to_string(),
            ),
            None => (500, r#"{"detail":"model unavailable"}"#.to_string()),
        }
    })
    .await
}

/// URL of a local port with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn serve_one(
    socket: &mut TcpStream,
    respond: &Arc<Responder>,
    hits: &AtomicUsize,
) -> Option<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let request = StubRequest {
        method: request_line.next().unwrap_or_default().to_string(),
        path: request_line.next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[body_start.min(buf.len())..]).to_string(),
    };

    let (status, body) = respond(&request);
    hits.fetch_add(1, Ordering::SeqCst);
    let response = format!(
        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    socket.write_all(response.as_bytes()).await.ok()?;
    socket.shutdown().await.ok()?;
    Some(())
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}
