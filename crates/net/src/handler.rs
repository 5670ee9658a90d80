//! Request handling
//!
//! Turns one request payload into exactly one response. Holds no state
//! between calls, so a single handler is shared by every connection.

use numera_core::FormatOptions;
use tracing::{debug, warn};

use crate::protocol::{Request, RequestError, Response};

#[derive(Debug, Clone, Default)]
pub struct Handler {
    options: FormatOptions,
}

impl Handler {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Decode, dispatch and answer a payload
    pub fn handle(&self, payload: &str) -> Response {
        let request = match Request::decode(payload) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Rejected request");
                return Response::failure(&e);
            }
        };

        match request.execute(&self.options) {
            Ok(text) => {
                debug!(command = request.kind(), result = %text, "Request handled");
                Response::Success(text)
            }
            Err(e) => {
                let e = RequestError::from(e);
                warn!(command = request.kind(), error = %e, "Request failed");
                Response::failure(&e)
            }
        }
    }
}
