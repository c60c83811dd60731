//! Error types for the HTTP server.

use std::time::Duration;

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration document could not be parsed.
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),

    /// No bytes arrived from the client within the idle timeout.
    #[error("Timed out after {0:?} waiting for client data")]
    Timeout(Duration),

    /// The client closed the connection before the request head was complete.
    #[error("Connection closed before the request head was complete")]
    ConnectionClosed,

    /// The client closed the connection before sending the declared body.
    #[error("Connection closed after {received} of {expected} body bytes")]
    IncompleteBody { expected: usize, received: usize },

    /// The request head exceeded the configured limit.
    #[error("Request head exceeds {0} bytes")]
    HeadTooLarge(usize),

    /// The declared body length exceeded the configured limit.
    #[error("Declared body of {length} bytes exceeds limit of {limit}")]
    BodyTooLarge { length: usize, limit: usize },
}

impl Error {
    /// Whether the client should get a 400 for this error.
    ///
    /// Everything else is a transport failure and the connection is dropped.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Error::ParseError(_) | Error::HeadTooLarge(_) | Error::BodyTooLarge { .. }
        )
    }
}
