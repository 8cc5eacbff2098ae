use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::info;

use crate::server::driver::Driver;

/// The listening socket, bound with an explicit backlog.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Binds `addr` and starts listening with the given backlog.
    pub fn bind(addr: &str, backlog: u32) -> anyhow::Result<Self> {
        let addr: SocketAddr = addr
            .parse()
            .with_context(|| format!("invalid listen address: {addr}"))?;

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;

        let inner = socket.listen(backlog)?;
        Ok(Self { inner })
    }

    /// The address actually bound, useful when listening on port 0.
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.inner.local_addr()?)
    }

    /// Runs the accept loop forever, handing each connection to the driver.
    ///
    /// A failure inside one connection's pipeline is contained and logged by
    /// the driver; it never stops this loop or another connection.
    pub async fn run(self, driver: Driver) -> anyhow::Result<()> {
        loop {
            let (socket, peer) = self.inner.accept().await?;
            info!("Client connected from {}", peer);

            driver.dispatch(socket, peer);
        }
    }
}
