//! Single-shot TCP client
//!
//! One connection per request: connect, send, half-close, read the whole
//! reply, close. Failures are reported once and never retried.

use std::io::ErrorKind;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::protocol::Request;

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `host:port` of the server
    pub addr: String,
    /// Bound on connecting and on receiving the reply
    pub timeout: Duration,
    /// Largest reply accepted; anything longer is an error, never cut
    pub max_reply: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: format!("localhost:{}", crate::DEFAULT_PORT),
            timeout: crate::DEFAULT_TIMEOUT,
            max_reply: crate::MAX_REPLY,
        }
    }
}

/// Client handle
#[derive(Debug, Clone, Default)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Send a request and return the reply text verbatim
    pub async fn send(&self, request: &Request) -> Result<String> {
        self.send_raw(&request.encode()).await
    }

    /// Send an arbitrary payload and return the reply text verbatim
    pub async fn send_raw(&self, payload: &str) -> Result<String> {
        let limit = self.config.timeout;
        info!(addr = %self.config.addr, "Connecting to server");

        let mut stream = timeout(limit, TcpStream::connect(&self.config.addr))
            .await
            .map_err(|_| Error::Timeout(limit))?
            .map_err(|e| match e.kind() {
                ErrorKind::ConnectionRefused => Error::Refused,
                _ => Error::Io(e),
            })?;

        // The server may answer and stop reading before the whole request is
        // sent, e.g. when it is over the size limit. Its reply still counts.
        let sent = async {
            stream.write_all(payload.as_bytes()).await?;
            stream.shutdown().await
        }
        .await;
        match &sent {
            Ok(()) => debug!(bytes = payload.len(), "Request sent"),
            Err(e) => debug!(error = %e, "Send interrupted, reading reply anyway"),
        }

        let max_reply = self.config.max_reply;
        let mut reply = Vec::new();
        let received = timeout(
            limit,
            (&mut stream)
                .take(max_reply as u64 + 1)
                .read_to_end(&mut reply),
        )
        .await
        .map_err(|_| Error::Timeout(limit))?;

        if let Err(e) = received {
            // a failed send is the root cause of a failed read
            return Err(sent.err().unwrap_or(e).into());
        }
        if reply.is_empty() {
            sent?;
            return Err(Error::ConnectionClosed);
        }
        if reply.len() > max_reply {
            return Err(Error::Protocol(format!("Reply exceeds {} bytes", max_reply)));
        }

        String::from_utf8(reply).map_err(|_| Error::Protocol("Reply is not valid UTF-8".into()))
    }
}
