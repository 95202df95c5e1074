//! Caching subsystem.
//!
//! Four cooperating pieces:
//!
//! - [`key::KeyScheme`] — deterministic content/index key derivation from
//!   canonical JSON + SHA-256, namespaced by service identity.
//!
//! - [`policy::CachePolicy`] — per-response cache eligibility.
//!   [`PredictiveUnitPolicy`] restricts population to the deployment's
//!   authoritative unit; [`CacheAll`] is the unconditional policy.
//!
//! - [`response::ResponseCache`] — the store-backed cache: single and
//!   batch get/set, index maintenance, sliding TTL, degraded mode. See
//!   the [`response`] module docs for architecture.
//!
//! - [`feedback::FeedbackResolver`] — read-only resolution of a
//!   correlation id back to the full request/response/metadata triple,
//!   plus feedback reconciliation.

pub mod feedback;
pub mod key;
pub mod policy;
pub mod response;

pub use feedback::FeedbackResolver;
pub use key::KeyScheme;
pub use policy::{CacheAll, CachePolicy, PredictiveUnitPolicy};
pub use response::{CacheConfig, ResponseCache};
