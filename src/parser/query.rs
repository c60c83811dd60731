//! Query string parsing.

use std::collections::HashMap;

/// Parse a raw query string into a map of parameter names to values.
///
/// Tokens are separated by `&` and split once on the first `=`. Tokens
/// without `=` are skipped and later duplicates overwrite earlier ones.
/// Values are taken literally: no percent-decoding is performed.
///
/// ```
/// use webroot_server::parse_query_string;
///
/// let params = parse_query_string("height=3&width=4");
/// assert_eq!(params.get("height").map(String::as_str), Some("3"));
/// assert_eq!(params.get("width").map(String::as_str), Some("4"));
/// assert!(parse_query_string("").is_empty());
/// ```
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|token| token.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
