//! TLS configuration and certificate loading.

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use reqwest::{Certificate as RootCertificate, Identity};
use thiserror::Error;

use crate::config::Certificate;

/// Errors raised while turning certificate paths into TLS material.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("certificate file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid PEM in {path:?}: {reason}")]
    InvalidPem { path: PathBuf, reason: String },

    #[error("incomplete client identity: {0}")]
    Incomplete(&'static str),
}

/// Client-side TLS material ready to hand to the HTTP client builder.
#[derive(Debug, Clone)]
pub struct TlsMaterials {
    /// Extra trust anchors for the remote server.
    pub roots: Vec<RootCertificate>,
    /// Client identity presented during the handshake.
    pub identity: Option<Identity>,
    /// Accept any server certificate.
    pub insecure_skip_verify: bool,
}

/// Load TLS material described by `cert`.
///
/// Returns `Ok(None)` when no material is configured at all.
pub fn load_tls(cert: &Certificate) -> Result<Option<TlsMaterials>, TlsError> {
    if cert.is_empty() {
        return Ok(None);
    }

    let roots = if cert.ca.is_empty() {
        Vec::new()
    } else {
        load_roots(Path::new(&cert.ca))?
    };

    let identity = match (cert.cert.is_empty(), cert.key.is_empty()) {
        (false, false) => Some(load_identity(Path::new(&cert.cert), Path::new(&cert.key))?),
        (true, true) => None,
        (false, true) => return Err(TlsError::Incomplete("certificate configured without key")),
        (true, false) => return Err(TlsError::Incomplete("key configured without certificate")),
    };

    Ok(Some(TlsMaterials {
        roots,
        identity,
        insecure_skip_verify: cert.insecure_skip_verify,
    }))
}

fn read(path: &Path) -> Result<Vec<u8>, TlsError> {
    if !path.exists() {
        return Err(TlsError::NotFound(path.to_path_buf()));
    }
    fs::read(path).map_err(|source| TlsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(path: &Path, reason: impl Into<String>) -> TlsError {
    TlsError::InvalidPem {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn load_roots(path: &Path) -> Result<Vec<RootCertificate>, TlsError> {
    let pem = read(path)?;
    let ders = rustls_pemfile::certs(&mut BufReader::new(pem.as_slice()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(path, e.to_string()))?;
    if ders.is_empty() {
        return Err(invalid(path, "no certificates found"));
    }

    ders.iter()
        .map(|der| RootCertificate::from_der(der.as_ref()).map_err(|e| invalid(path, e.to_string())))
        .collect()
}

fn load_identity(cert_path: &Path, key_path: &Path) -> Result<Identity, TlsError> {
    let cert_pem = read(cert_path)?;
    let key_pem = read(key_path)?;

    // Check both halves up front so errors name the offending file.
    let certs = rustls_pemfile::certs(&mut BufReader::new(cert_pem.as_slice()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(cert_path, e.to_string()))?;
    if certs.is_empty() {
        return Err(invalid(cert_path, "no certificates found"));
    }
    match rustls_pemfile::private_key(&mut BufReader::new(key_pem.as_slice())) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(invalid(key_path, "no private key found")),
        Err(e) => return Err(invalid(key_path, e.to_string())),
    }

    let mut pem = cert_pem;
    pem.push(b'\n');
    pem.extend_from_slice(&key_pem);
    Identity::from_pem(&pem).map_err(|e| invalid(key_path, e.to_string()))
}
