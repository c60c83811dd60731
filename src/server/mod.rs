//! HTTP server implementation for webroot-server.
//!
//! This module owns all I/O: reading requests off a socket, routing them,
//! serving files from the web root and writing responses back.

mod response;
mod config;
mod error;
mod handler;
mod http_server;
mod reader;
mod router;
mod static_files;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{calculate_area, calculate_next, format_float, image, increment_integer, upload};
pub use http_server::HttpServer;
pub use reader::{read_body, read_head, HEAD_TERMINATOR};
pub use router::Route;
pub use static_files::{safe_join, serve_file};
