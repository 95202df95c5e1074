//! Telemetry metric name constants.
//!
//! Centralised metric names for muninn operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `muninn_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `operation` — cache operation ("get" | "get_many" | "set" |
//!   "set_many" | "resolve" | "entries")
//! - `outcome` — resolution outcome: "resolved" or "missing"

/// Total cache hits.
///
/// Labels: `operation` ("get" | "get_many").
pub const CACHE_HITS_TOTAL: &str = "muninn_cache_hits_total";

/// Total cache misses.
///
/// Labels: `operation` ("get" | "get_many").
pub const CACHE_MISSES_TOTAL: &str = "muninn_cache_misses_total";

/// Total entries written to the store.
///
/// Labels: `operation` ("set" | "set_many").
pub const CACHE_WRITES_TOTAL: &str = "muninn_cache_writes_total";

/// Total responses rejected by the caching policy (never an error).
///
/// Labels: `operation` ("set" | "set_many").
pub const CACHE_REJECTED_TOTAL: &str = "muninn_cache_rejected_total";

/// Total operations served in degraded mode (store absent or failing).
///
/// Labels: `operation`.
pub const STORE_DEGRADED_TOTAL: &str = "muninn_store_degraded_total";

/// Total feedback resolution attempts.
///
/// Labels: `outcome` ("resolved" | "missing").
pub const FEEDBACK_RESOLUTIONS_TOTAL: &str = "muninn_feedback_resolutions_total";
