//! HTTP link with ordered address failover.
//!
//! # Responsibilities
//! - Build the TLS-secured HTTP client from the node identity
//! - Route a message to the report or desire URL by kind
//! - Try every candidate address in order until one answers
//! - Substitute `${VAR}` tokens in the raw response before decoding it

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::validation::validate_config;
use crate::config::{ConfigError, LinkConfig};
use crate::envsubst::expand_env;
use crate::http::{ClientOptions, HttpClient, Transport};
use crate::link::types::{LinkError, LinkResult};
use crate::link::{ErrorReceiver, Link, MessageReceiver};
use crate::message::{Content, Message, MessageKind};
use crate::observability::metrics;

/// Request/response link over HTTP(S) with sequential address failover.
#[derive(Clone)]
pub struct HttpLink {
    /// Candidate base addresses, highest priority first.
    addrs: Vec<String>,
    report_url: String,
    desire_url: String,
    transport: Arc<dyn Transport>,
}

impl HttpLink {
    /// Create the link from configuration.
    ///
    /// The node identity replaces the HTTP certificate section. Fails with
    /// [`LinkError::TlsConfigMissing`] when that leaves no TLS material.
    pub fn new(config: LinkConfig) -> LinkResult<Self> {
        check(&config)?;

        let mut http = config.httplink.http.clone();
        http.certificate.inherit(&config.node);

        let options = ClientOptions::from_config(&http)?;
        if options.tls.is_none() {
            return Err(LinkError::TlsConfigMissing);
        }
        let client = HttpClient::new(&options).map_err(LinkError::Client)?;

        for addr in http.addresses() {
            if addr.starts_with("http://") {
                tracing::warn!(address = %addr, "Address is not https, TLS material will not be used for it");
            }
        }

        Ok(Self::assemble(config, Arc::new(client)))
    }

    /// Create the link over an arbitrary transport.
    ///
    /// Only the addresses and URL templates are taken from `config`. Fails
    /// with [`LinkError::TlsConfigMissing`] when the transport carries no
    /// TLS material.
    pub fn with_transport<T>(config: LinkConfig, transport: T) -> LinkResult<Self>
    where
        T: Transport + 'static,
    {
        check(&config)?;
        if !transport.has_tls() {
            return Err(LinkError::TlsConfigMissing);
        }
        Ok(Self::assemble(config, Arc::new(transport)))
    }

    fn assemble(config: LinkConfig, transport: Arc<dyn Transport>) -> Self {
        let addrs = config.httplink.http.addresses();
        tracing::info!(
            plugin = "httplink",
            addresses = ?addrs,
            report_url = %config.httplink.report_url,
            desire_url = %config.httplink.desire_url,
            "Http link initialized"
        );

        Self {
            addrs,
            report_url: config.httplink.report_url,
            desire_url: config.httplink.desire_url,
            transport,
        }
    }

    /// Candidate addresses in failover order.
    pub fn addresses(&self) -> &[String] {
        &self.addrs
    }

    /// URL template for a message kind, if the link supports it.
    pub fn url_for(&self, kind: MessageKind) -> Option<&str> {
        match kind {
            MessageKind::Report => Some(&self.report_url),
            MessageKind::Desire => Some(&self.desire_url),
            _ => None,
        }
    }

    /// POST `payload` to `url` on each address in turn.
    ///
    /// Returns the first successful response. If every address fails the
    /// error carries each attempt's text, in address order.
    pub async fn post(
        &self,
        url: &str,
        payload: Bytes,
        headers: &BTreeMap<String, String>,
    ) -> LinkResult<Bytes> {
        let mut errors = Vec::with_capacity(self.addrs.len());

        for addr in &self.addrs {
            match self
                .transport
                .post_json(addr, url, payload.clone(), headers)
                .await
            {
                Ok(data) => return Ok(data),
                Err(e) => {
                    tracing::warn!(plugin = "httplink", address = %addr, error = %e, "Post error, trying next address");
                    metrics::record_address_failure(addr);
                    errors.push(e.to_string());
                }
            }
        }

        Err(LinkError::AllAddressesFailed { errors })
    }

    async fn dispatch(&self, msg: &Message) -> LinkResult<Message> {
        let payload = msg.content.to_json_vec().map_err(LinkError::Serialize)?;
        let url = self
            .url_for(msg.kind)
            .ok_or(LinkError::UnsupportedKind(msg.kind))?;

        let data = self.post(url, Bytes::from(payload), &msg.metadata).await?;
        let data = expand_env(&data)?;
        let content = Content::from_json_slice(&data).map_err(LinkError::Decode)?;

        Ok(Message {
            kind: msg.kind,
            metadata: BTreeMap::new(),
            content,
        })
    }
}

fn check(config: &LinkConfig) -> LinkResult<()> {
    validate_config(config).map_err(|errors| LinkError::Config(ConfigError::Validation(errors)))
}

#[async_trait]
impl Link for HttpLink {
    async fn request(&self, msg: &Message) -> LinkResult<Message> {
        tracing::debug!(
            plugin = "httplink",
            kind = %msg.kind,
            metadata = ?msg.metadata,
            content = %msg.content.as_value(),
            "Http link send request"
        );

        let result = self.dispatch(msg).await;
        metrics::record_request(msg.kind.as_str(), result.is_ok());

        if let Ok(res) = &result {
            tracing::debug!(
                plugin = "httplink",
                kind = %res.kind,
                content = %res.content.as_value(),
                "Http link receive response"
            );
        }
        result
    }

    async fn send(&self, _msg: &Message) -> LinkResult<()> {
        Ok(())
    }

    fn receive(&self) -> (Option<MessageReceiver>, Option<ErrorReceiver>) {
        (None, None)
    }

    fn is_async_supported(&self) -> bool {
        false
    }

    fn close(&self) -> LinkResult<()> {
        Ok(())
    }
}

impl std::fmt::Debug for HttpLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLink")
            .field("addrs", &self.addrs)
            .field("report_url", &self.report_url)
            .field("desire_url", &self.desire_url)
            .finish()
    }
}
