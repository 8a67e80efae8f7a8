//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate candidate addresses (parseable, http or https)
//! - Validate URL templates and timeouts
//! - Check certificate pairs (cert and key come together)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LinkConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::LinkConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &LinkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let http = &config.httplink.http;

    let addresses = http.addresses();
    if addresses.is_empty() {
        errors.push(ValidationError::new(
            "httplink.http.address",
            "at least one address is required",
        ));
    }
    for addr in &addresses {
        match Url::parse(addr) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                if url.host_str().is_none() {
                    errors.push(ValidationError::new(
                        "httplink.http.address",
                        format!("address '{}' has no host", addr),
                    ));
                }
            }
            Ok(url) => errors.push(ValidationError::new(
                "httplink.http.address",
                format!("address '{}' has unsupported scheme '{}'", addr, url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "httplink.http.address",
                format!("address '{}' is invalid: {}", addr, e),
            )),
        }
    }

    for (field, value) in [
        ("httplink.report_url", &config.httplink.report_url),
        ("httplink.desire_url", &config.httplink.desire_url),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        } else if Url::parse(value).map(|u| u.has_host()).unwrap_or(false) {
            errors.push(ValidationError::new(
                field,
                "must be a path relative to the address, not an absolute URL",
            ));
        }
    }

    if http.timeout_secs == 0 {
        errors.push(ValidationError::new("httplink.http.timeout_secs", "must be > 0"));
    }
    if http.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "httplink.http.connect_timeout_secs",
            "must be > 0",
        ));
    }

    let node = &config.node;
    if node.cert.is_empty() != node.key.is_empty() {
        errors.push(ValidationError::new(
            "node",
            "cert and key must be configured together",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
