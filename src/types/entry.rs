//! The persisted cache unit.

use serde::{Deserialize, Serialize};

use super::Meta;

/// The unit persisted under a content key: the request, the response it
/// produced, and the metadata it was produced under.
///
/// Stored as a self-describing JSON document using the same canonical
/// serialization that hashes the request, so external inspection tooling
/// can decode entries without this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<R, S> {
    pub request: R,
    pub response: S,
    pub meta: Meta,
}

impl<R, S> CacheEntry<R, S> {
    pub fn new(request: R, response: S, meta: Meta) -> Self {
        Self {
            request,
            response,
            meta,
        }
    }
}
