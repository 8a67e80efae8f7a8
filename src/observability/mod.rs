//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! link/client.rs produces:
//!     → tracing events (debug: request/response, warn: failed address)
//!     → metrics.rs (request and per-address failure counters)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, pretty or JSON) in the binary
//!     → whatever recorder the host installs for metrics
//! ```

pub mod logging;
pub mod metrics;
