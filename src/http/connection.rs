use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::http::writer::ResponseWriter;
use crate::pages::PageStore;
use crate::router;

/// Receive chunk size; a read shorter than this ends the request.
const CHUNK_SIZE: usize = 1024;

/// Accumulates one raw request from the stream.
///
/// Bytes are received up to [`CHUNK_SIZE`] at a time and appended until a
/// read returns fewer bytes than the chunk size, which is taken to mean no
/// more data is immediately available. A connection that closes before
/// sending anything yields an empty request, and an I/O error during
/// receive degrades to an empty request as well.
///
/// Known limitation: the short-read rule is not protocol-correct HTTP
/// framing. A request of exactly a chunk-size multiple makes the reader
/// wait for a further read, and a request split across slow writes may be
/// truncated. Content-Length-aware framing would change observable
/// behavior and is deliberately not used.
pub async fn read_raw<R>(stream: &mut R) -> String
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::with_capacity(CHUNK_SIZE);
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        match stream.read(&mut chunk).await {
            Ok(n) => {
                buffer.extend_from_slice(&chunk[..n]);

                if n < CHUNK_SIZE {
                    break;
                }
            }

            Err(e) => {
                tracing::warn!("Error while receiving request: {}", e);
                return String::new();
            }
        }
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

/// Per-connection context: the socket, the shared page store and the
/// pipeline state. Owns the socket exclusively until it is closed.
pub struct Connection {
    stream: TcpStream,
    pages: Arc<PageStore>,
    state: ConnectionState,
}

enum ConnectionState {
    Reading,
    Routing(String),
    Writing(ResponseWriter),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, pages: Arc<PageStore>) -> Self {
        Self {
            stream,
            pages,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection through Reading → Routing → Writing → Closed.
    ///
    /// The socket is closed exactly once on every exit path: explicitly
    /// after a successful write, or by drop when an error cuts the pipeline
    /// short.
    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let raw = read_raw(&mut self.stream).await;
                    ConnectionState::Routing(raw)
                }

                ConnectionState::Routing(raw) => {
                    let response = router::route(&raw, &self.pages).await?;
                    ConnectionState::Writing(ResponseWriter::new(&response))
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.close().await;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Shuts the socket down; errors here are logged and swallowed so a
    /// misbehaving peer can never crash the serving unit.
    async fn close(&mut self) {
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!("Error closing connection: {}", e);
        }
    }
}
