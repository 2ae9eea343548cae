//! Network actor - runs submissions in the Tokio async runtime

use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::execute_submission;

/// Tracks an active submission for cancellation
struct ActiveRequest {
    cancel_tx: oneshot::Sender<()>,
}

/// Network actor that executes submission commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<u64>,
    cancel_handles: HashMap<u64, ActiveRequest>,
}

impl NetworkActor {
    pub fn new(client: reqwest::Client, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Submit { id, endpoint, payload }) => {
                            let (cancel_tx, cancel_rx) = oneshot::channel();
                            self.cancel_handles.insert(id, ActiveRequest { cancel_tx });

                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, endpoint = %endpoint, "Posting payload");
                                tokio::select! {
                                    biased;

                                    _ = cancel_rx => {
                                        tracing::info!(id, "Submission aborted");
                                    }
                                    result = execute_submission(&client, &endpoint, &payload, id) => {
                                        tracing::info!(id, success = result.is_success(), "Submission completed");
                                        let _ = response_tx.send(result);
                                    }
                                }
                                id
                            });
                        }

                        Some(NetworkCommand::Cancel(id)) => {
                            if let Some(active) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling submission");
                                let _ = active.cancel_tx.send(());
                                let _ = self.response_tx.send(NetworkResponse::Cancelled { id });
                            }
                        }

                        Some(NetworkCommand::Shutdown) => {
                            for (_, active) in self.cancel_handles.drain() {
                                let _ = active.cancel_tx.send(());
                            }
                            break;
                        }

                        None => break,
                    }
                }

                Some(finished) = self.active_requests.join_next() => {
                    if let Ok(id) = finished {
                        self.cancel_handles.remove(&id);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::time::{sleep, timeout};

    /// Accept one connection and never answer it
    async fn stalled_endpoint() -> (String, oneshot::Receiver<()>, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (accepted_tx, accepted_rx) = oneshot::channel();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let _ = accepted_tx.send(());
            sleep(Duration::from_secs(30)).await;
            drop(socket);
        });
        (format!("http://{}/bfhl", addr), accepted_rx, server)
    }

    #[tokio::test]
    async fn test_cancel_aborts_stalled_submission() {
        let (endpoint, accepted, server) = stalled_endpoint().await;
        let client = reqwest::Client::builder()
            .tls_built_in_root_certs(false)
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap();

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let actor = tokio::spawn(NetworkActor::new(client, resp_tx).run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::Submit { id: 3, endpoint, payload: json!({"data": ["A"]}) })
            .unwrap();
        timeout(Duration::from_secs(5), accepted).await.unwrap().unwrap();
        cmd_tx.send(NetworkCommand::Cancel(3)).unwrap();

        let first = timeout(Duration::from_secs(5), resp_rx.recv()).await.unwrap();
        assert!(matches!(first, Some(NetworkResponse::Cancelled { id: 3 })));

        // Past the client timeout: an unaborted request would have failed by now
        sleep(Duration::from_millis(1500)).await;
        assert!(resp_rx.try_recv().is_err());

        // Cancelling again is a no-op
        cmd_tx.send(NetworkCommand::Cancel(3)).unwrap();
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        timeout(Duration::from_secs(5), actor).await.unwrap().unwrap();
        assert!(resp_rx.recv().await.is_none());

        server.abort();
    }
}
