//! HTTP request parser module.
//!
//! Pure functions that turn a raw request head into a validated
//! [`HttpRequest`]. No I/O happens here; see the `server` module for that.

mod request;
mod method;
mod query;
mod error;
mod tests;

// Re-export public items
pub use request::{HttpRequest, RequestLine};
pub use method::Method;
pub use error::Error;

// Re-export the parsing functions
pub use request::{parse_request_head, validate_request_line};
pub use query::parse_query_string;
