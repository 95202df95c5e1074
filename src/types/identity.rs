//! Service identity used to namespace cache keys.

use serde::{Deserialize, Serialize};

/// The identity triple of the hosting service.
///
/// Namespaces every cache key so multiple deployments and versions can
/// share one backing store without collisions. Supplied by the hosting
/// service as configuration — never derived from the environment inside
/// the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIdentity {
    /// Logical service name.
    pub service: String,
    /// Deployment the service instance belongs to.
    pub deployment: String,
    /// Service version.
    pub version: String,
}

impl ServiceIdentity {
    pub fn new(
        service: impl Into<String>,
        deployment: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            deployment: deployment.into(),
            version: version.into(),
        }
    }
}
