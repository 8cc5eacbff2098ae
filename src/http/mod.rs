//! HTTP protocol implementation.
//!
//! One-shot HTTP/1.1: each connection carries exactly one request and
//! receives exactly one response before the socket is closed. No keep-alive,
//! no chunked transfer, no header parsing beyond the request line.
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate request bytes from the socket
//!        └──────┬──────┘
//!               │ Short read marks end of request
//!               ▼
//!        ┌──────────────────┐
//!        │    Routing       │ ← Map the request target to a page
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, then shut the socket down
//!        └──────┬───────────┘
//!               │
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod request;
pub mod response;
pub mod writer;
