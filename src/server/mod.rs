//! Connection acceptance and concurrency drivers.
//!
//! The listener owns the bound socket and the accept loop; the driver
//! decides how each accepted connection's pipeline runs. Both drivers run
//! the same Reader → Router → Writer pipeline, so the strategy is swappable
//! without touching the business logic.

pub mod driver;
pub mod listener;

pub use driver::{Driver, WorkerPool};
pub use listener::Listener;
