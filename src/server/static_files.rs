//! Static file serving.
//!
//! Resolves a relative file name under a root directory, then answers with
//! the whole file, 404 when it is not a regular file, or 500 when reading fails.

use std::path::{Component, Path, PathBuf};

use log::{error, info, warn};
use tokio::fs;

use crate::server::config::ServerConfig;
use crate::server::response::{HttpResponse, StatusCode};

/// Join `name` under `root`, refusing anything that could leave `root`.
///
/// Only plain name components (and `.`) are allowed; `..`, absolute paths
/// and drive prefixes yield `None`.
pub fn safe_join(root: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    plain.then(|| root.join(relative))
}

/// Whether `path` names an existing regular file.
pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_file())
}

/// Serve `name` from `root`.
///
/// An unknown extension still produces a `Content-Type` header, with an empty value.
pub async fn serve_file(root: &Path, name: &str, config: &ServerConfig) -> HttpResponse {
    let Some(path) = safe_join(root, name) else {
        warn!("404 NOT FOUND - refusing path outside root: {name}");
        return HttpResponse::new(StatusCode::NotFound);
    };

    if !is_file(&path).await {
        warn!("404 NOT FOUND - {}", path.display());
        return HttpResponse::new(StatusCode::NotFound);
    }

    let content_type = config.content_type_for(name).unwrap_or_default();

    match fs::read(&path).await {
        Ok(data) => {
            info!("Serving {} ({} bytes)", path.display(), data.len());
            HttpResponse::new(StatusCode::Ok)
                .with_content_type(content_type)
                .with_body_bytes(data)
        }
        Err(e) => {
            error!("500 INTERNAL SERVER ERROR - reading {}: {e}", path.display());
            HttpResponse::new(StatusCode::InternalServerError)
        }
    }
}
