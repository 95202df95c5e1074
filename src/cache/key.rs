//! Cache key derivation.
//!
//! Two key families, both namespaced by the service identity triple so
//! multiple deployments and versions can share one store:
//!
//! - content key: `{service}:{deployment}:{version}:request:{sha256_hex}`
//! - index key:   `{service}:{deployment}:{version}:puid:{correlation_id}`
//!
//! These formats are stable — external inspection and debug tooling
//! depends on them bit-exactly.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::Result;
use crate::types::ServiceIdentity;

/// Serialize a value to its canonical JSON form.
///
/// Goes through `serde_json::Value`, whose object representation is a
/// BTree map: object keys come out sorted regardless of the source
/// type's field order or a map's insertion order. Equal-by-value inputs
/// therefore always produce the same string.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_value(value)?.to_string())
}

/// Derives content and index keys for one service identity.
///
/// A content key is a pure function of request content and service
/// identity — never of time or of the response. The digest is SHA-256;
/// correctness needs only near-uniqueness, not cryptographic strength,
/// but the digest must be stable across processes (which rules out the
/// std `DefaultHasher`).
#[derive(Debug, Clone)]
pub struct KeyScheme {
    identity: ServiceIdentity,
}

impl KeyScheme {
    pub fn new(identity: ServiceIdentity) -> Self {
        Self { identity }
    }

    /// Content key for a request.
    ///
    /// Fails only if the request fails to serialize.
    pub fn content_key<R: Serialize>(&self, request: &R) -> Result<String> {
        let canonical = canonical_json(request)?;
        let digest = Sha256::digest(canonical.as_bytes());
        Ok(self.content_key_for_digest(&format!("{digest:x}")))
    }

    fn content_key_for_digest(&self, digest: &str) -> String {
        let ServiceIdentity {
            service,
            deployment,
            version,
        } = &self.identity;
        format!("{service}:{deployment}:{version}:request:{digest}")
    }

    /// Glob matching every content key of this identity. Diagnostic use.
    pub fn content_key_pattern(&self) -> String {
        self.content_key_for_digest("*")
    }

    /// Index key mapping a correlation id to the content key that
    /// answered it.
    pub fn index_key(&self, correlation_id: &str) -> String {
        let ServiceIdentity {
            service,
            deployment,
            version,
        } = &self.identity;
        format!("{service}:{deployment}:{version}:puid:{correlation_id}")
    }
}
