//! Error types for the HTTP request parser.

use thiserror::Error;

/// Errors that can occur while parsing a request head.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The request head contained no request line at all.
    #[error("Empty request")]
    EmptyRequest,

    /// The request head is not valid UTF-8.
    #[error("Request head is not valid UTF-8")]
    InvalidUtf8,

    /// The request line has fewer than three space-separated fields.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The HTTP method is neither GET nor POST.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The version field does not start with `HTTP/1.1`.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// The Content-Length header value is not an integer.
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),
}
