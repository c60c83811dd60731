//! HTTP server implementation.

use std::net::SocketAddr;

use log::{error, info, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::signal;

use crate::parser::{parse_request_head, HttpRequest, Method};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler;
use crate::server::reader::{read_body, read_head};
use crate::server::response::{HttpResponse, StatusCode};
use crate::server::router::Route;
use crate::server::static_files::serve_file;

/// An HTTP server that serves one connection at a time.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Log the configuration the server is about to run with.
    fn display_server_info(&self) {
        info!("Web root: {}", self.config.web_root.display());
        info!("Upload directory: {}", self.config.upload_root().display());
        for (from, to) in &self.config.redirects {
            info!("  redirect {from} -> {to}");
        }
    }

    /// Bind the listening socket with the configured backlog.
    pub fn bind(&self) -> Result<TcpListener, Error> {
        let addr = self.config.addr;
        let socket = if addr.is_ipv4() { TcpSocket::new_v4()? } else { TcpSocket::new_v6()? };
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;
        let listener = socket.listen(self.config.backlog)?;
        info!("Listening for connections on http://{addr}", addr = listener.local_addr()?);
        Ok(listener)
    }

    /// Start the server and serve until Ctrl+C.
    ///
    /// Only a failure to bind is returned as an error.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.bind()?;
        self.display_server_info();

        tokio::select! {
            () = self.serve(&listener) => {}
            result = signal::ctrl_c() => {
                match result {
                    Ok(()) => info!("Received Ctrl+C, shutting down"),
                    Err(e) => error!("Error waiting for Ctrl+C: {e}"),
                }
            }
        }

        info!("Closing server");
        Ok(())
    }

    /// Accept connections forever, fully serving each before accepting the next.
    pub async fn serve(&self, listener: &TcpListener) {
        loop {
            match listener.accept().await {
                Ok((socket, addr)) => self.serve_client(socket, addr).await,
                Err(e) => Self::handle_accept_error(e).await,
            }
        }
    }

    /// Serve a single accepted client and close the socket.
    async fn serve_client(&self, mut socket: TcpStream, addr: SocketAddr) {
        info!("New connection from {addr}");

        match self.handle_connection(&mut socket).await {
            Ok(()) => {}
            Err(e @ Error::Timeout(_)) => warn!("Dropping {addr}: {e}"),
            Err(e) => error!("Error handling {addr}: {e}"),
        }

        if let Err(e) = socket.shutdown().await {
            warn!("Error closing connection to {addr}: {e}");
        }
        info!("Closing connection to {addr}");
    }

    /// Accept errors never stop the loop; back off briefly and retry.
    async fn handle_accept_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Handle a single connection: read, validate, dispatch and respond.
    ///
    /// Malformed requests get a 400. Timeouts and early disconnects are
    /// returned without writing anything.
    pub async fn handle_connection<S>(&self, socket: &mut S) -> Result<(), Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut stream = BufReader::new(socket);

        let request = match self.read_request(&mut stream).await {
            Ok(request) => request,
            Err(e) if e.is_bad_request() => {
                warn!("400 BAD REQUEST - {e}");
                return Self::respond(&mut stream, &HttpResponse::new(StatusCode::BadRequest)).await;
            }
            Err(e) => return Err(e),
        };

        info!("{} {}", request.method, request.resource);
        let response = self.dispatch(&request).await;
        Self::respond(&mut stream, &response).await
    }

    /// Read the head, validate it, then read the body a POST declares.
    async fn read_request<S>(&self, stream: &mut BufReader<S>) -> Result<HttpRequest, Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let idle = self.config.read_timeout();
        let head = read_head(stream, idle, self.config.max_head_bytes).await?;
        let mut request = parse_request_head(&head)?;

        if request.method == Method::POST {
            let length = request.content_length()?;
            if length > self.config.max_body_bytes {
                return Err(Error::BodyTooLarge { length, limit: self.config.max_body_bytes });
            }
            if length > 0 {
                request.body = read_body(stream, length, idle).await?;
            }
        }

        Ok(request)
    }

    async fn respond<W>(stream: &mut W, response: &HttpResponse) -> Result<(), Error>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&response.to_bytes()).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Route a parsed request and produce its response.
    pub async fn dispatch(&self, request: &HttpRequest) -> HttpResponse {
        let params = request.query_params();

        match Route::resolve(request, &self.config) {
            Route::CalculateNext => handler::calculate_next(&params),
            Route::CalculateArea => handler::calculate_area(&params),
            Route::Upload if request.method != Method::POST => {
                warn!("400 BAD REQUEST - upload requires POST");
                HttpResponse::new(StatusCode::BadRequest)
            }
            Route::Upload => handler::upload(&params, &request.body, &self.config.upload_root()).await,
            Route::Image => handler::image(&params, &self.config).await,
            Route::Forbidden => {
                warn!("403 FORBIDDEN");
                HttpResponse::new(StatusCode::Forbidden)
            }
            Route::Error => {
                error!("500 INTERNAL SERVER ERROR - requested {}", request.path());
                HttpResponse::new(StatusCode::InternalServerError)
            }
            Route::Redirect(location) => {
                info!("302 MOVED TEMPORARILY - {} -> {location}", request.path());
                HttpResponse::redirect(location)
            }
            Route::Static(name) => serve_file(&self.config.web_root, name, &self.config).await,
        }
    }
}
