//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Certificate paths (node identity)
//!     → tls.rs (read PEM, validate, build roots + client identity)
//!     → http::client (rustls-backed reqwest client)
//! ```
//!
//! # Design Decisions
//! - PEM files are checked before reqwest sees them, so errors name the file
//! - No certificate material at all is reported as "no TLS", not as an error;
//!   the link decides whether that is fatal

pub mod tls;

pub use tls::{load_tls, TlsError, TlsMaterials};
