use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc};

use crate::config::DriverKind;
use crate::http::connection::Connection;
use crate::pages::PageStore;

type Job = (TcpStream, SocketAddr);

/// Concurrency strategy for servicing accepted connections.
///
/// Both variants run the same pipeline; they differ only in how much
/// parallelism is in flight. `Event` spawns a task per connection, so
/// concurrency is bounded only by pending tasks. `Pool` keeps a fixed set
/// of workers and queues the overflow, so at most `workers` connections are
/// serviced at once. Neither strategy lets a slow or failing connection
/// stall the accept loop. There are no timeouts: a stalled client occupies
/// its task or worker slot indefinitely.
pub enum Driver {
    Event { pages: Arc<PageStore> },
    Pool(WorkerPool),
}

impl Driver {
    pub fn new(kind: DriverKind, workers: usize, pages: Arc<PageStore>) -> Self {
        match kind {
            DriverKind::Event => Driver::Event { pages },
            DriverKind::Pool => Driver::Pool(WorkerPool::spawn(workers, pages)),
        }
    }

    /// Hands one accepted connection to the strategy. Never blocks the
    /// caller.
    pub fn dispatch(&self, socket: TcpStream, peer: SocketAddr) {
        match self {
            Driver::Event { pages } => {
                let pages = Arc::clone(pages);

                tokio::spawn(async move {
                    let conn = Connection::new(socket, pages);
                    if let Err(e) = conn.run().await {
                        tracing::error!("Connection error from {}: {}", peer, e);
                    }
                });
            }

            Driver::Pool(pool) => pool.submit(socket, peer),
        }
    }
}

/// A fixed set of worker tasks consuming connections from a shared queue.
///
/// Workers are spawned once and live for the process lifetime; the queue is
/// unbounded, so submission never blocks and overflow connections wait for
/// a free worker in FIFO order.
pub struct WorkerPool {
    queue: mpsc::UnboundedSender<Job>,
}

impl WorkerPool {
    pub fn spawn(workers: usize, pages: Arc<PageStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let rx = Arc::new(Mutex::new(rx));

        for id in 0..workers.max(1) {
            let rx = Arc::clone(&rx);
            let pages = Arc::clone(&pages);

            tokio::spawn(async move {
                loop {
                    // Hold the lock only while waiting for a job, so a busy
                    // worker never keeps the others from receiving.
                    let job = { rx.lock().await.recv().await };

                    match job {
                        Some((socket, peer)) => {
                            let conn = Connection::new(socket, Arc::clone(&pages));
                            if let Err(e) = conn.run().await {
                                tracing::error!("Connection error from {}: {}", peer, e);
                            }
                        }

                        None => {
                            tracing::debug!("Worker {} shutting down", id);
                            break;
                        }
                    }
                }
            });
        }

        Self { queue: tx }
    }

    pub fn submit(&self, socket: TcpStream, peer: SocketAddr) {
        if self.queue.send((socket, peer)).is_err() {
            tracing::error!("Worker pool is gone, dropping connection from {}", peer);
        }
    }
}
