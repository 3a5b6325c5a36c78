use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

/// The two directions of a live client socket
#[async_trait]
pub trait SocketWrapper: Send {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Next text frame from the client, `None` once the client has gone away
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    async fn close(&mut self) -> Result<(), SocketError>;
}

#[derive(Error, Debug)]
pub enum SocketError {
    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        loop {
            match self.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                // Ping/pong are answered by axum, binary frames carry nothing for us
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// One subscriber's socket, pumping hub events out and watching for disconnect.
///
/// Clients have nothing to say to the hub, so inbound text is only logged.
pub struct Connection {
    pub tournament_id: String,
    pub participant_id: Option<String>,
    socket: Box<dyn SocketWrapper>,
    outbound_receiver: mpsc::Receiver<String>,
}

impl Connection {
    pub fn new(
        tournament_id: String,
        participant_id: Option<String>,
        socket: Box<dyn SocketWrapper>,
        outbound_receiver: mpsc::Receiver<String>,
    ) -> Self {
        Self {
            tournament_id,
            participant_id,
            socket,
            outbound_receiver,
        }
    }

    /// Runs until the client disconnects or the hub drops the subscription
    pub async fn run(mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                msg = self.outbound_receiver.recv() => {
                    match msg {
                        Some(message) => self.socket.send_message(message).await?,
                        // Dropped by the hub
                        None => break,
                    }
                }

                msg = self.socket.receive_message() => {
                    match msg {
                        Ok(Some(message)) => {
                            debug!(
                                tournament_id = %self.tournament_id,
                                participant_id = ?self.participant_id,
                                message = %message,
                                "Ignoring client message"
                            );
                        }
                        Ok(None) => break,
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        let _ = self.socket.close().await;
        Ok(())
    }
}
