//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LinkConfig (validated, immutable)
//!     → handed to HttpLink::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the link is rebuilt to change it
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The node identity overrides the HTTP certificate section at build time

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::Certificate;
pub use schema::HttpClientConfig;
pub use schema::HttpLinkConfig;
pub use schema::LinkConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
