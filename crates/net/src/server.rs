//! TCP server answering numeral requests
//!
//! Every connection carries exactly one request and one response. Each is
//! handled on its own task; nothing is shared between them but the
//! stateless handler.

use std::net::SocketAddr;
use std::time::Duration;

use numera_core::FormatOptions;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::frame::{drain, read_request, write_response, ReadLimits};
use crate::handler::Handler;
use crate::protocol::Response;

/// Server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Wait for the first request byte before giving up silently
    pub idle_timeout: Duration,
    /// Quiet period that completes a request from a client that never
    /// half-closes
    pub settle_timeout: Duration,
    pub max_payload: usize,
    pub format: FormatOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], crate::DEFAULT_PORT)),
            idle_timeout: crate::DEFAULT_TIMEOUT,
            settle_timeout: crate::DEFAULT_SETTLE_TIMEOUT,
            max_payload: crate::MAX_PAYLOAD,
            format: FormatOptions::default(),
        }
    }
}

impl ServerConfig {
    fn limits(&self) -> ReadLimits {
        ReadLimits {
            idle_timeout: self.idle_timeout,
            settle_timeout: self.settle_timeout,
            max_payload: self.max_payload,
        }
    }
}

/// Running server handle
pub struct Server {
    addr: SocketAddr,
    shutdown_tx: broadcast::Sender<()>,
    accept_task: JoinHandle<()>,
}

impl Server {
    /// Bind and start accepting connections
    pub async fn start(config: ServerConfig) -> Result<Self> {
        let listener = TcpListener::bind(config.bind).await?;
        let bound_addr = listener.local_addr()?;

        info!(
            addr = %bound_addr,
            precision = config.format.precision,
            style = ?config.format.style,
            "Server started"
        );

        let (shutdown_tx, _) = broadcast::channel(1);

        let handler = Handler::new(config.format);
        let shutdown_rx = shutdown_tx.subscribe();
        let accept_task = tokio::spawn(accept_loop(
            listener,
            handler,
            config.limits(),
            shutdown_rx,
        ));

        Ok(Server {
            addr: bound_addr,
            shutdown_tx,
            accept_task,
        })
    }

    /// Get the server's bound address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections; in-flight ones run to completion
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
        info!("Server shutdown initiated");
    }

    /// Wait until the accept loop has exited and the listener is closed
    pub async fn wait(self) {
        if let Err(e) = self.accept_task.await {
            error!(error = %e, "Accept loop panicked");
        }
    }
}

/// Accept incoming connections
async fn accept_loop(
    listener: TcpListener,
    handler: Handler,
    limits: ReadLimits,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, addr)) => {
                        debug!(addr = %addr, "New connection");
                        tokio::spawn(handle_connection(stream, addr, handler.clone(), limits));
                    }
                    Err(e) => {
                        error!(error = %e, "Accept failed");
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("Accept loop shutting down");
                break;
            }
        }
    }
}

/// Serve the single request of one connection
async fn handle_connection(mut stream: TcpStream, addr: SocketAddr, handler: Handler, limits: ReadLimits) {
    let span = info_span!("connection", id = %Uuid::new_v4(), addr = %addr);

    async move {
        let response = match read_request(&mut stream, &limits).await {
            Ok(payload) => {
                debug!(bytes = payload.len(), "Request received");
                // Long literals are CPU-heavy; keep them off the async workers
                tokio::task::spawn_blocking(move || handler.handle(&payload))
                    .await
                    .unwrap_or_else(|e| {
                        error!(error = %e, "Request task failed");
                        Response::failure(&e)
                    })
            }
            Err(Error::Timeout(after)) => {
                debug!(after = ?after, "No request before idle timeout");
                return;
            }
            Err(Error::ConnectionClosed) => {
                debug!("Connection closed before a request arrived");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Read error");
                Response::failure(&e)
            }
        };

        if let Err(e) = write_response(&mut stream, &response).await {
            debug!(error = %e, "Write failed");
            return;
        }

        let discarded = drain(&mut stream, &limits).await;
        if discarded > 0 {
            debug!(bytes = discarded, "Discarded input after response");
        }
    }
    .instrument(span)
    .await
}
