//! Public types for the Muninn API.

mod entry;
mod feedback;
mod identity;
mod meta;

pub use entry::CacheEntry;
pub use feedback::Feedback;
pub use identity::ServiceIdentity;
pub use meta::{Meta, PREDICTIVE_UNIT_TAG};
