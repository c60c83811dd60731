//! Reading a request off a connection.
//!
//! The head is accumulated one byte at a time until the blank line, so
//! nothing past the head is consumed before the body length is known. Wrap
//! the socket in a `BufReader` to keep that from costing a syscall per byte.
//! Every individual read is bounded by the idle timeout.

use std::future::Future;
use std::io;
use std::time::Duration;

use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

use crate::server::error::Error;

/// The sequence that ends a request head.
pub const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Run one read under the idle timeout, translating EOF and timeouts.
async fn idle_read<T>(
    idle: Duration,
    read: impl Future<Output = io::Result<T>>,
) -> Result<T, Error> {
    match timeout(idle, read).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::ConnectionClosed),
        Ok(Err(e)) => Err(Error::IoError(e)),
        Err(_) => Err(Error::Timeout(idle)),
    }
}

/// Read bytes until `\r\n\r\n` has been seen, returning the head including the terminator.
pub async fn read_head<R>(reader: &mut R, idle: Duration, max_bytes: usize) -> Result<Vec<u8>, Error>
where
    R: AsyncRead + Unpin,
{
    let mut head = Vec::with_capacity(512);

    while !head.ends_with(HEAD_TERMINATOR) {
        if head.len() >= max_bytes {
            return Err(Error::HeadTooLarge(max_bytes));
        }
        let byte = idle_read(idle, reader.read_u8()).await?;
        head.push(byte);
    }

    debug!("Read request head of {} bytes", head.len());
    Ok(head)
}

/// Read exactly `length` body bytes.
///
/// The idle timeout applies to each read, not to the body as a whole.
pub async fn read_body<R>(reader: &mut R, length: usize, idle: Duration) -> Result<Vec<u8>, Error>
where
    R: AsyncRead + Unpin,
{
    let mut body = vec![0; length];
    let mut received = 0;

    while received < length {
        let n = idle_read(idle, reader.read(&mut body[received..])).await?;
        if n == 0 {
            return Err(Error::IncompleteBody { expected: length, received });
        }
        received += n;
    }

    debug!("Read request body of {length} bytes");
    Ok(body)
}
