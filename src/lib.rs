//! A small HTTP/1.1 server for a static web root.
//!
//! The server accepts one connection at a time, reads a single GET or POST
//! request, answers it and closes the connection. Besides serving files it
//! exposes four endpoints:
//!
//! - `/calculate-next?num=N` returns `N + 1`
//! - `/calculate-area?height=H&width=W` returns the triangle area `H * W / 2`
//! - `POST /upload?file-name=NAME` stores the request body under the upload directory
//! - `/image?image-name=NAME` returns a previously uploaded file
//!
//! `/forbidden` answers 403, `/error` answers 500, and paths in the redirect
//! table answer 302.
//!
//! # Examples
//!
//! ## Validating a request line
//!
//! ```
//! use webroot_server::{validate_request_line, Method, ParserError};
//!
//! let line = validate_request_line("POST /upload?file-name=a.txt HTTP/1.1").unwrap();
//! assert_eq!(line.method, Method::POST);
//! assert_eq!(line.resource, "/upload?file-name=a.txt");
//!
//! match validate_request_line("PUT / HTTP/1.1") {
//!     Err(ParserError::InvalidMethod(method)) => assert_eq!(method, "PUT"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use webroot_server::{HttpServer, ServerConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), webroot_server::ServerError> {
//!     let config = ServerConfig {
//!         addr: "127.0.0.1:8080".parse().unwrap(),
//!         ..ServerConfig::default()
//!     };
//!     HttpServer::new(config).start().await
//! }
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{
    parse_query_string, parse_request_head, validate_request_line, Error as ParserError, HttpRequest,
    Method, RequestLine,
};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
