//! Outbound HTTP client.
//!
//! # Responsibilities
//! - Derive client options (timeouts, pool, TLS) from configuration
//! - Build a rustls-backed reqwest client
//! - POST a JSON body to `{address}{path}` with caller headers
//! - Map non-2xx responses to transport errors

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use thiserror::Error;
use url::Url;

use crate::config::HttpClientConfig;
use crate::net::tls::{load_tls, TlsError, TlsMaterials};

/// Failure of one POST attempt against one address.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("[{status}] {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Other(String),
}

/// The send primitive underneath the link.
///
/// The target address is passed on every call, so one instance can serve
/// concurrent requests aimed at different addresses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        address: &str,
        path: &str,
        body: Bytes,
        headers: &BTreeMap<String, String>,
    ) -> Result<Bytes, TransportError>;

    /// Whether the transport was built with TLS material (roots or a
    /// client identity).
    fn has_tls(&self) -> bool;
}

/// Options derived from [`HttpClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub keep_alive: Option<Duration>,
    pub max_idle_conns: usize,
    pub idle_conn_timeout: Duration,
    pub system_proxy: bool,
    pub tls: Option<TlsMaterials>,
}

impl ClientOptions {
    /// Derive options, loading any configured TLS material.
    pub fn from_config(config: &HttpClientConfig) -> Result<Self, TlsError> {
        Ok(Self {
            timeout: Duration::from_secs(config.timeout_secs),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            keep_alive: (config.keep_alive_secs > 0)
                .then(|| Duration::from_secs(config.keep_alive_secs)),
            max_idle_conns: config.max_idle_conns,
            idle_conn_timeout: Duration::from_secs(config.idle_conn_timeout_secs),
            system_proxy: config.system_proxy,
            tls: load_tls(&config.certificate)?,
        })
    }
}

/// Join a base address and a path template.
///
/// A trailing `/` on the address and a missing leading `/` on the path are
/// normalized; any path already on the address is kept.
pub fn endpoint(address: &str, path: &str) -> Result<Url, TransportError> {
    let raw = format!(
        "{}/{}",
        address.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|source| TransportError::InvalidUrl { url: raw, source })
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    tls: bool,
}

impl HttpClient {
    /// Build the underlying client from options.
    pub fn new(options: &ClientOptions) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .tcp_keepalive(options.keep_alive)
            .tcp_nodelay(true)
            .pool_max_idle_per_host(options.max_idle_conns)
            .pool_idle_timeout(options.idle_conn_timeout);

        if !options.system_proxy {
            builder = builder.no_proxy();
        }

        if let Some(tls) = &options.tls {
            for root in &tls.roots {
                builder = builder.add_root_certificate(root.clone());
            }
            if let Some(identity) = &tls.identity {
                builder = builder.identity(identity.clone());
            }
            if tls.insecure_skip_verify {
                tracing::warn!("Server certificate verification disabled");
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        Ok(Self {
            client: builder.build()?,
            tls: options.tls.is_some(),
        })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len() + 1);
    map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[async_trait]
impl Transport for HttpClient {
    async fn post_json(
        &self,
        address: &str,
        path: &str,
        body: Bytes,
        headers: &BTreeMap<String, String>,
    ) -> Result<Bytes, TransportError> {
        let url = endpoint(address, path)?;
        let headers = header_map(headers)?;

        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let data = response.bytes().await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&data).into_owned(),
            });
        }
        Ok(data)
    }

    fn has_tls(&self) -> bool {
        self.tls
    }
}
