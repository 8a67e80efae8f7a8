//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the link.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the http link.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LinkConfig {
    /// Node identity shared with the rest of the host.
    pub node: Certificate,

    /// Link settings (URL templates and HTTP client).
    pub httplink: HttpLinkConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Certificate material, as PEM file paths.
///
/// Empty strings mean "not configured".
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Certificate {
    /// CA bundle used to verify the remote server.
    pub ca: String,

    /// Client certificate (PEM).
    pub cert: String,

    /// Client private key (PEM, PKCS#8 / PKCS#1 / SEC1).
    pub key: String,

    /// Skip server certificate verification.
    pub insecure_skip_verify: bool,
}

impl Certificate {
    /// Returns true if no certificate material is configured at all.
    pub fn is_empty(&self) -> bool {
        self.ca.is_empty() && self.cert.is_empty() && self.key.is_empty()
    }

    /// Take over the CA, certificate and key of another identity.
    ///
    /// `insecure_skip_verify` stays with the receiver.
    pub fn inherit(&mut self, identity: &Certificate) {
        self.ca = identity.ca.clone();
        self.cert = identity.cert.clone();
        self.key = identity.key.clone();
    }
}

/// Link section: URL templates per message kind plus the HTTP client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpLinkConfig {
    /// Path posted to for `report` messages.
    pub report_url: String,

    /// Path posted to for `desire` messages.
    pub desire_url: String,

    /// HTTP client configuration.
    pub http: HttpClientConfig,
}

impl Default for HttpLinkConfig {
    fn default() -> Self {
        Self {
            report_url: "v1/sync/report".to_string(),
            desire_url: "v1/sync/desire".to_string(),
            http: HttpClientConfig::default(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Comma-separated candidate base addresses, in failover order.
    pub address: String,

    /// Total request timeout in seconds.
    pub timeout_secs: u64,

    /// Connect (including TLS handshake) timeout in seconds.
    pub connect_timeout_secs: u64,

    /// TCP keep-alive interval in seconds (0 disables).
    pub keep_alive_secs: u64,

    /// Maximum idle pooled connections per host.
    pub max_idle_conns: usize,

    /// Idle pooled connection timeout in seconds.
    pub idle_conn_timeout_secs: u64,

    /// Honor HTTP(S)_PROXY / NO_PROXY from the environment.
    pub system_proxy: bool,

    /// TLS material. Overwritten by the node identity when the link is built.
    pub certificate: Certificate,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            address: "https://127.0.0.1:30005".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            keep_alive_secs: 30,
            max_idle_conns: 100,
            idle_conn_timeout_secs: 90,
            system_proxy: true,
            certificate: Certificate::default(),
        }
    }
}

impl HttpClientConfig {
    /// Candidate addresses in configured order.
    ///
    /// Entries are trimmed; empty entries are skipped.
    pub fn addresses(&self) -> Vec<String> {
        self.address
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LinkConfig::default();
        assert_eq!(config.httplink.report_url, "v1/sync/report");
        assert_eq!(config.httplink.desire_url, "v1/sync/desire");
        assert_eq!(config.httplink.http.timeout_secs, 30);
        assert!(config.node.is_empty());
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_addresses_keep_order() {
        let http = HttpClientConfig {
            address: "https://c:1, https://a:2,,https://b:3 ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            http.addresses(),
            vec!["https://c:1", "https://a:2", "https://b:3"]
        );
    }

    #[test]
    fn test_inherit_keeps_skip_verify() {
        let mut cert = Certificate {
            ca: "old-ca".into(),
            insecure_skip_verify: true,
            ..Default::default()
        };
        let node = Certificate {
            ca: "ca.pem".into(),
            cert: "client.pem".into(),
            key: "client.key".into(),
            insecure_skip_verify: false,
        };
        cert.inherit(&node);
        assert_eq!(cert.ca, "ca.pem");
        assert_eq!(cert.cert, "client.pem");
        assert_eq!(cert.key, "client.key");
        assert!(cert.insecure_skip_verify);
    }

    #[test]
    fn test_parse_toml() {
        let raw = r#"
            [node]
            ca = "/etc/node/ca.pem"

            [httplink]
            report_url = "/r"

            [httplink.http]
            address = "https://a:1,https://b:2"
            timeout_secs = 5

            [observability]
            log_format = "json"
        "#;
        let config: LinkConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.node.ca, "/etc/node/ca.pem");
        assert_eq!(config.httplink.report_url, "/r");
        // unspecified fields fall back to defaults
        assert_eq!(config.httplink.desire_url, "v1/sync/desire");
        assert_eq!(config.httplink.http.timeout_secs, 5);
        assert_eq!(config.httplink.http.connect_timeout_secs, 10);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
