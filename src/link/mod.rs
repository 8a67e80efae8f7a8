//! Link subsystem.
//!
//! # Data Flow
//! ```text
//! Message { kind, metadata, content }
//!     → client.rs (serialize content, pick URL by kind)
//!     → address failover: addr[0] → addr[1] → ... (first success wins)
//!     → envsubst (raw response bytes)
//!     → Message { kind, content }
//! ```
//!
//! # Design Decisions
//! - Request/response only: no inbound channel, no async send
//! - Every request starts from the first address; no health memory
//! - Per-address failures are logged, callers only see the aggregate

pub mod client;
pub mod types;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::message::Message;

pub use client::HttpLink;
pub use types::{LinkError, LinkResult};

/// Inbound message channel of a link.
pub type MessageReceiver = mpsc::Receiver<Message>;

/// Inbound error channel of a link.
pub type ErrorReceiver = mpsc::Receiver<LinkError>;

/// Capabilities a host expects from a pluggable message link.
#[async_trait]
pub trait Link: Send + Sync {
    /// Send `msg` and wait for the remote's answer.
    async fn request(&self, msg: &Message) -> LinkResult<Message>;

    /// Fire-and-forget send.
    async fn send(&self, msg: &Message) -> LinkResult<()>;

    /// Channels of unsolicited inbound messages and errors, if any.
    fn receive(&self) -> (Option<MessageReceiver>, Option<ErrorReceiver>);

    /// Whether `send` actually delivers asynchronously.
    fn is_async_supported(&self) -> bool;

    /// Release resources held by the link.
    fn close(&self) -> LinkResult<()>;
}
