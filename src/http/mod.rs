//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! HttpClientConfig
//!     → ClientOptions (timeouts, pool, TLS material)
//!     → HttpClient (reqwest + rustls)
//!     → Transport::post_json(address, path, body, headers)
//!     → response bytes or TransportError
//! ```
//!
//! # Design Decisions
//! - The address is a per-call argument, never client state
//! - Non-2xx responses are failures; the status and body form the error text
//! - Transport is a trait so the link can run over any send primitive

pub mod client;

pub use client::{endpoint, ClientOptions, HttpClient, Transport, TransportError};
