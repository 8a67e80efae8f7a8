//! HTTP(S) message link with ordered address failover.

pub mod config;
pub mod envsubst;
pub mod http;
pub mod link;
pub mod message;
pub mod net;
pub mod observability;

pub use config::LinkConfig;
pub use link::{HttpLink, Link, LinkError, LinkResult};
pub use message::{Content, Message, MessageKind};
