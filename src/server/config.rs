//! Server configuration.

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::server::error::Error;

/// HTTP server configuration.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The listen backlog.
    pub backlog: u32,
    /// Idle timeout for each read from a client, in milliseconds.
    pub read_timeout_ms: u64,
    /// Largest request head (request line and headers) accepted.
    pub max_head_bytes: usize,
    /// Largest POST body accepted.
    pub max_body_bytes: usize,
    /// Directory ordinary file requests resolve under.
    pub web_root: PathBuf,
    /// Upload directory, relative to `web_root`.
    pub upload_dir: PathBuf,
    /// File served for a bare `/`.
    pub default_document: String,
    /// Exact path to redirect target.
    pub redirects: HashMap<String, String>,
    /// File extension to Content-Type.
    pub content_types: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let content_types = [
            ("html", "text/html;charset=utf-8"),
            ("jpg", "image/jpeg"),
            ("css", "text/css"),
            ("js", "text/javascript; charset=UTF-8"),
            ("txt", "text/plain"),
            ("ico", "image/x-icon"),
            ("gif", "image/gif"),
            ("png", "image/png"),
        ]
        .into_iter()
        .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
        .collect();

        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 80)),
            backlog: 10,
            read_timeout_ms: 2000,
            max_head_bytes: 8192,
            max_body_bytes: 16 * 1024 * 1024,
            web_root: PathBuf::from("web_root"),
            upload_dir: PathBuf::from("upload"),
            default_document: "index.html".to_string(),
            redirects: HashMap::from([("/moved".to_string(), "/".to_string())]),
            content_types,
        }
    }
}

impl ServerConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The per-read idle timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// The absolute upload directory, `web_root/upload_dir`.
    pub fn upload_root(&self) -> PathBuf {
        self.web_root.join(&self.upload_dir)
    }

    /// Look up the Content-Type for a file name by the text after its last `.`.
    ///
    /// The lookup is case-sensitive. A name without a dot is looked up whole.
    pub fn content_type_for(&self, file_name: &str) -> Option<&str> {
        let extension = file_name.rsplit('.').next().unwrap_or(file_name);
        self.content_types.get(extension).map(String::as_str)
    }
}
