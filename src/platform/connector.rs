//! Game server connection.
//!
//! The game server plugin connects to the bridge over TCP and exchanges
//! newline-delimited JSON: [`PlatformEvent`]s inbound, [`PlatformCommand`]s
//! outbound. One connection is served at a time; commands issued while no
//! game server is connected stay queued until the next one arrives. A
//! command whose write failed is retried first on the next connection.

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, warn};

use crate::common::error::{BridgeError, ConnectionError};
use crate::platform::bus::EventBus;
use crate::platform::events::{PlatformCommand, PlatformEvent};

/// Longest accepted line, in bytes.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Cloneable sender for commands bound to the game server.
#[derive(Debug, Clone)]
pub struct PlatformHandle {
    commands: mpsc::UnboundedSender<PlatformCommand>,
}

impl PlatformHandle {
    /// Create a handle and the receiving end the connector drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PlatformCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { commands: tx }, rx)
    }

    /// Queue a command for the game server.
    pub fn send(&self, command: PlatformCommand) -> Result<(), BridgeError> {
        self.commands
            .send(command)
            .map_err(|_| BridgeError::PlatformClosed)
    }
}

/// Why a connection ended.
#[derive(Debug, PartialEq, Eq)]
enum Disconnect {
    /// The game server closed the socket.
    Closed,
    /// The bridge is shutting down.
    Shutdown,
}

pub struct PlatformConnector {
    listen: String,
    bus: EventBus,
    commands_rx: mpsc::UnboundedReceiver<PlatformCommand>,
    pending: Option<PlatformCommand>,
}

impl PlatformConnector {
    pub fn new(
        listen: impl Into<String>,
        bus: EventBus,
        commands_rx: mpsc::UnboundedReceiver<PlatformCommand>,
    ) -> Self {
        Self {
            listen: listen.into(),
            bus,
            commands_rx,
            pending: None,
        }
    }

    /// Accept game server connections until shutdown.
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen).await?;
        info!("Waiting for game server on {}", self.listen);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = accepted?;
                    info!("Game server connected from {}", peer);

                    match self.serve(stream, &mut shutdown_rx).await {
                        Ok(Disconnect::Closed) => info!("Game server disconnected"),
                        Ok(Disconnect::Shutdown) => break,
                        Err(e) => error!("Game server connection failed: {}", e),
                    }
                    self.bus.disconnected();
                }

                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Platform connector stopped");
        Ok(())
    }

    /// Exchange lines with one connected game server.
    async fn serve<S>(
        &mut self,
        stream: S,
        shutdown_rx: &mut watch::Receiver<bool>,
    ) -> Result<Disconnect, ConnectionError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

        if let Some(command) = self.pending.take() {
            self.write(&mut framed, command).await?;
        }

        loop {
            tokio::select! {
                biased;

                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        return Ok(Disconnect::Shutdown);
                    }
                }

                line = framed.next() => match line {
                    Some(Ok(line)) => self.handle_line(&line),
                    Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                        warn!("Skipping line longer than {} bytes", MAX_LINE_LENGTH);
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(Disconnect::Closed),
                },

                Some(command) = self.commands_rx.recv() => {
                    self.write(&mut framed, command).await?;
                }
            }
        }
    }

    /// Write one command. On failure it is kept for the next connection.
    async fn write<S>(
        &mut self,
        framed: &mut Framed<S, LinesCodec>,
        command: PlatformCommand,
    ) -> Result<(), ConnectionError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let line = serde_json::to_string(&command)?;
        debug!("Bridge -> Game: {}", line);

        if let Err(e) = framed.send(line).await {
            self.pending = Some(command);
            return Err(e.into());
        }
        Ok(())
    }

    fn handle_line(&self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match serde_json::from_str::<PlatformEvent>(line) {
            Ok(event) => {
                debug!("Game -> Bridge: {}", event.type_name());
                self.bus.dispatch(&event);
            }
            Err(e) => warn!("Skipping malformed platform line: {}", e),
        }
    }
}
