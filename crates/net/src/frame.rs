//! Request/response payload framing
//!
//! One request and one response per connection, both plain UTF-8 text.
//! A request ends at EOF, at a `\n`, at the size limit, or once the peer
//! has gone quiet for the settle timeout after sending something.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{timeout, Instant};

use crate::error::{Error, Result};
use crate::protocol::Response;

/// Read buffer size
const CHUNK_SIZE: usize = 4096;

/// Bounds applied while reading a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// How long to wait for the first byte
    pub idle_timeout: Duration,
    /// Quiet period that ends a request once data has arrived
    pub settle_timeout: Duration,
    /// Largest accepted request, in bytes
    pub max_payload: usize,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            idle_timeout: crate::DEFAULT_TIMEOUT,
            settle_timeout: crate::DEFAULT_SETTLE_TIMEOUT,
            max_payload: crate::MAX_PAYLOAD,
        }
    }
}

/// Read one request payload from a stream
pub async fn read_request<R: AsyncRead + Unpin>(reader: &mut R, limits: &ReadLimits) -> Result<String> {
    let mut payload = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let wait = if payload.is_empty() {
            limits.idle_timeout
        } else {
            limits.settle_timeout
        };

        let n = match timeout(wait, reader.read(&mut chunk)).await {
            Ok(read) => read?,
            Err(_) if payload.is_empty() => return Err(Error::Timeout(wait)),
            Err(_) => break,
        };

        if n == 0 {
            if payload.is_empty() {
                return Err(Error::ConnectionClosed);
            }
            break;
        }

        let (data, terminated) = match chunk[..n].iter().position(|&b| b == b'\n') {
            Some(end) => (&chunk[..end], true),
            None => (&chunk[..n], false),
        };
        payload.extend_from_slice(data);

        if payload.len() > limits.max_payload {
            return Err(Error::PayloadTooLarge {
                limit: limits.max_payload,
            });
        }
        if terminated {
            break;
        }
    }

    String::from_utf8(payload).map_err(|_| Error::Protocol("Request is not valid UTF-8".into()))
}

/// Write the response payload and close the write side
pub async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(response.text().as_bytes()).await?;
    writer.flush().await?;
    writer.shutdown().await?;
    Ok(())
}

/// Discard whatever the peer is still sending until it half-closes
///
/// Closing a socket with unread input resets the connection, which can
/// destroy a response already written. Each read waits at most the settle
/// timeout, and the whole drain at most the idle timeout.
pub async fn drain<R: AsyncRead + Unpin>(reader: &mut R, limits: &ReadLimits) -> u64 {
    let deadline = Instant::now() + limits.idle_timeout;
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut discarded = 0u64;

    loop {
        let wait = limits
            .settle_timeout
            .min(deadline.saturating_duration_since(Instant::now()));
        match timeout(wait, reader.read(&mut chunk)).await {
            Ok(Ok(0)) | Ok(Err(_)) | Err(_) => return discarded,
            Ok(Ok(n)) => discarded += n as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn limits() -> ReadLimits {
        ReadLimits {
            idle_timeout: Duration::from_millis(200),
            settle_timeout: Duration::from_millis(50),
            max_payload: 64,
        }
    }

    #[tokio::test]
    async fn test_read_until_eof() {
        let mut cursor = Cursor::new(b"convert,FF,16,10".to_vec());
        let payload = read_request(&mut cursor, &limits()).await.unwrap();
        assert_eq!(payload, "convert,FF,16,10");
    }

    #[tokio::test]
    async fn test_read_stops_at_newline() {
        let mut cursor = Cursor::new(b"arif,A,5,16,+\nignored".to_vec());
        let payload = read_request(&mut cursor, &limits()).await.unwrap();
        assert_eq!(payload, "arif,A,5,16,+");
    }

    #[tokio::test]
    async fn test_read_settles_without_eof() {
        let (mut client, mut server) = tokio::io::duplex(256);
        client.write_all(b"convert,1.5,10,2").await.unwrap();

        // client stays open; the quiet period ends the request
        let payload = read_request(&mut server, &limits()).await.unwrap();
        assert_eq!(payload, "convert,1.5,10,2");
        drop(client);
    }

    #[tokio::test]
    async fn test_pause_mid_request_cuts_it() {
        // A sender that stalls past the settle timeout has its request cut
        // at the stall; the rest is never read as part of it.
        let (mut client, mut server) = tokio::io::duplex(256);
        client.write_all(b"convert,10,10,2").await.unwrap();

        let payload = read_request(&mut server, &limits()).await.unwrap();
        assert_eq!(payload, "convert,10,10,2");

        client.write_all(b"0").await.unwrap();
        drop(client);
        assert_eq!(drain(&mut server, &limits()).await, 1);
    }

    #[tokio::test]
    async fn test_drain_until_eof() {
        let mut cursor = Cursor::new(vec![b'x'; 10_000]);
        assert_eq!(drain(&mut cursor, &limits()).await, 10_000);
    }

    #[tokio::test]
    async fn test_drain_gives_up_on_silent_peer() {
        let (_client, mut server) = tokio::io::duplex(256);
        let started = std::time::Instant::now();
        assert_eq!(drain(&mut server, &limits()).await, 0);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_idle_timeout() {
        let (_client, mut server) = tokio::io::duplex(256);
        let result = read_request(&mut server, &limits()).await;
        assert!(matches!(result, Err(Error::Timeout(_))));
    }

    #[tokio::test]
    async fn test_empty_stream_is_closed() {
        let mut cursor = Cursor::new(Vec::new());
        let result = read_request(&mut cursor, &limits()).await;
        assert!(matches!(result, Err(Error::ConnectionClosed)));
    }

    #[tokio::test]
    async fn test_oversized_request_rejected() {
        let mut cursor = Cursor::new(vec![b'1'; 65]);
        let result = read_request(&mut cursor, &limits()).await;
        assert!(matches!(result, Err(Error::PayloadTooLarge { limit: 64 })));

        let mut cursor = Cursor::new(vec![b'1'; 64]);
        assert!(read_request(&mut cursor, &limits()).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_utf8_rejected() {
        let mut cursor = Cursor::new(vec![0xff, 0xfe, b',']);
        let result = read_request(&mut cursor, &limits()).await;
        assert!(matches!(result, Err(Error::Protocol(_))));
    }

    #[tokio::test]
    async fn test_write_response() {
        let mut buf = Vec::new();
        write_response(&mut buf, &Response::Success("FF".into()))
            .await
            .unwrap();
        assert_eq!(buf, b"FF");
    }
}
