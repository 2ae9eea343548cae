//! HTTP client wrapper - posts the payload and decodes the answer

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::errors::SubmitError;
use crate::messages::NetworkResponse;

/// POST `payload` to `endpoint` and turn the outcome into a [`NetworkResponse`]
pub async fn execute_submission(
    client: &reqwest::Client,
    endpoint: &str,
    payload: &Value,
    request_id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let result = post_json(client, endpoint, payload).await;
    let time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok((status, body)) => NetworkResponse::Success {
            id: request_id,
            status,
            body,
            time_ms,
        },
        Err(error) => NetworkResponse::Failed {
            id: request_id,
            error,
            time_ms,
        },
    }
}

async fn post_json(
    client: &reqwest::Client,
    endpoint: &str,
    payload: &Value,
) -> Result<(u16, Value), SubmitError> {
    let resp = client.post(endpoint).json(payload).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(SubmitError::Remote { status: status.as_u16() });
    }

    let text = resp.text().await?;
    // Stored verbatim: non-JSON bodies are kept as a JSON string
    let body = match serde_json::from_str::<Value>(&text) {
        Ok(json) => json,
        Err(_) => Value::String(text),
    };
    Ok((status.as_u16(), body))
}

/// Create an HTTP client with the given request timeout
pub fn create_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("bfhl-tui/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
pub(crate) mod test_server {
    //! One-shot HTTP server standing in for the remote endpoint

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Serve a single request with the given status line and body.
    /// The handle resolves to the request body that was received.
    pub async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request_body = read_request_body(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request_body
        });

        (format!("http://{}/bfhl", addr), handle)
    }

    /// Address nothing listens on
    pub async fn closed_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/bfhl", addr)
    }

    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .tls_built_in_root_certs(false)
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap()
    }

    async fn read_request_body(socket: &mut TcpStream) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return Vec::new();
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                let body_start = pos + 4;
                while buf.len() < body_start + len {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }
                return buf[body_start..].to_vec();
            }
        }
    }
}
