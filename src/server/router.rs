//! Mapping a request path to what should answer it.

use crate::parser::HttpRequest;
use crate::server::config::ServerConfig;

pub const CALCULATE_NEXT_PATH: &str = "/calculate-next";
pub const CALCULATE_AREA_PATH: &str = "/calculate-area";
pub const UPLOAD_PATH: &str = "/upload";
pub const IMAGE_PATH: &str = "/image";
pub const FORBIDDEN_PATH: &str = "/forbidden";
pub const ERROR_PATH: &str = "/error";

/// The destination of a request. Paths are compared by exact equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    CalculateNext,
    CalculateArea,
    Upload,
    Image,
    Forbidden,
    Error,
    /// Redirect to the given location.
    Redirect(&'a str),
    /// Serve the named file from the web root.
    Static(&'a str),
}

impl<'a> Route<'a> {
    /// Resolve a request. The first matching rule wins, in this order:
    /// API endpoints, `/forbidden`, `/error`, the redirect table, then static files.
    pub fn resolve(request: &'a HttpRequest, config: &'a ServerConfig) -> Self {
        let path = request.path();
        match path {
            CALCULATE_NEXT_PATH => Route::CalculateNext,
            CALCULATE_AREA_PATH => Route::CalculateArea,
            UPLOAD_PATH => Route::Upload,
            IMAGE_PATH => Route::Image,
            FORBIDDEN_PATH => Route::Forbidden,
            ERROR_PATH => Route::Error,
            _ => {
                if let Some(target) = config.redirects.get(path) {
                    Route::Redirect(target)
                } else if request.resource == "/" {
                    Route::Static(&config.default_document)
                } else {
                    Route::Static(path.trim_start_matches('/'))
                }
            }
        }
    }
}
