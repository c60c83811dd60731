//! HTTP request representation and request-line validation.

use std::collections::HashMap;
use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::query::parse_query_string;

/// The version prefix every request line must carry.
const HTTP_VERSION_PREFIX: &str = "HTTP/1.1";

/// The validated first line of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// The HTTP method (GET or POST)
    pub method: Method,
    /// The resource exactly as sent, including any query suffix
    pub resource: String,
}

/// Represents an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET or POST)
    pub method: Method,
    /// The requested resource, path and query string
    pub resource: String,
    /// Raw header lines following the request line
    pub headers: Vec<String>,
    /// The request body, empty unless a POST declared a length
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    pub fn new(method: Method, resource: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            headers,
            body: Vec::new(),
        }
    }

    /// Create a new HTTP request with a body.
    pub fn with_body(method: Method, resource: impl Into<String>, headers: Vec<String>, body: Vec<u8>) -> Self {
        let mut request = Self::new(method, resource, headers);
        request.body = body;
        request
    }

    /// The path part of the resource: everything before the first `?`.
    pub fn path(&self) -> &str {
        self.resource
            .split_once('?')
            .map_or(self.resource.as_str(), |(path, _)| path)
    }

    /// The query string: everything after the first `?`, or empty.
    pub fn query_string(&self) -> &str {
        self.resource
            .split_once('?')
            .map_or("", |(_, query)| query)
    }

    /// Query parameters parsed from the resource.
    pub fn query_params(&self) -> HashMap<String, String> {
        parse_query_string(self.query_string())
    }

    /// Get the value of the first header with the given name (case-insensitive).
    ///
    /// The name must run right up to the colon: `Content-Length : 5` does not match.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    /// The declared body length.
    ///
    /// A missing header, zero, or a negative value all mean "no body".
    pub fn content_length(&self) -> Result<usize, Error> {
        let Some(value) = self.get_header("content-length") else {
            return Ok(0);
        };

        let length: i64 = value
            .parse()
            .map_err(|_| Error::InvalidContentLength(value.to_string()))?;

        // Negative lengths read no body; lengths beyond usize cannot be buffered anyway
        usize::try_from(length.max(0)).map_err(|_| Error::InvalidContentLength(value.to_string()))
    }
}

/// Validate a request line of the form `METHOD SP RESOURCE SP HTTP/1.1`.
///
/// The line is split on single spaces, so doubled spaces produce empty
/// fields. The version field only has to start with `HTTP/1.1`.
///
/// ```
/// use webroot_server::{validate_request_line, Method};
///
/// let line = validate_request_line("GET /index.html HTTP/1.1").unwrap();
/// assert_eq!(line.method, Method::GET);
/// assert_eq!(line.resource, "/index.html");
///
/// assert!(validate_request_line("DELETE / HTTP/1.1").is_err());
/// ```
pub fn validate_request_line(line: &str) -> Result<RequestLine, Error> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() < 3 {
        return Err(Error::MalformedRequestLine(line.to_string()));
    }

    let method = Method::from_str(parts[0])?;

    if !parts[2].starts_with(HTTP_VERSION_PREFIX) {
        return Err(Error::InvalidVersion(parts[2].to_string()));
    }

    Ok(RequestLine {
        method,
        resource: parts[1].to_string(),
    })
}

/// Parse a complete request head (everything up to and including the blank line).
///
/// The returned request has an empty body; reading the body is the
/// caller's job once [`HttpRequest::content_length`] is known.
pub fn parse_request_head(input: &[u8]) -> Result<HttpRequest, Error> {
    let head = std::str::from_utf8(input).map_err(|_| Error::InvalidUtf8)?;

    let mut lines = head.split("\r\n");

    let request_line = match lines.next() {
        Some(line) if !line.is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };

    let RequestLine { method, resource } = validate_request_line(request_line)?;

    let headers = lines
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    Ok(HttpRequest::new(method, resource, headers))
}
