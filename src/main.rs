//! Binary entry point: set up logging, load configuration, run the server.

use log::info;
use webroot_server::{HttpServer, ServerConfig, ServerError};

/// Environment variable naming an optional JSON configuration file.
const CONFIG_ENV: &str = "WEBROOT_SERVER_CONFIG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ServerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!("Loading configuration from {}", path.to_string_lossy());
            ServerConfig::load(path)?
        }
        None => ServerConfig::default(),
    };

    HttpServer::new(config).start().await
}
