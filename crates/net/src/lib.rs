//! Numera Network Library
//!
//! Plain-text TCP protocol for the numeral engine.
//!
//! # Architecture
//!
//! - **Protocol**: comma-separated request, bare-text response
//! - **Handler**: decodes a request, runs it, encodes the reply
//! - **Server**: one request per connection, one task per connection
//! - **Client**: one connection per request, no retries
//!
//! # Usage
//!
//! ```ignore
//! let server = Server::start(ServerConfig::default()).await?;
//!
//! let client = Client::new(ClientConfig::default());
//! let reply = client.send(&Request::decode("convert,FF,16,10")?).await?;
//! assert_eq!(reply, "255");
//! ```

use std::time::Duration;

pub mod client;
pub mod error;
mod frame;
pub mod handler;
pub mod protocol;
pub mod server;

pub use client::{Client, ClientConfig};
pub use error::{Error, Result};
pub use frame::ReadLimits;
pub use handler::Handler;
pub use protocol::{ArithmeticRequest, ConvertRequest, Request, RequestError, Response};
pub use server::{Server, ServerConfig};

/// Default port for Numera servers
pub const DEFAULT_PORT: u16 = 65432;

/// Default bound on connecting, replying and waiting for a request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default quiet period that ends a request without EOF
pub const DEFAULT_SETTLE_TIMEOUT: Duration = Duration::from_millis(200);

/// Maximum request size (1MB)
pub const MAX_PAYLOAD: usize = 1024 * 1024;

/// Maximum reply size a client accepts (16MB)
///
/// A base 36 literal at the request limit still fits once written in base 2.
pub const MAX_REPLY: usize = 16 * 1024 * 1024;
