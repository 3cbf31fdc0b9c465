//! Domain model for container discovery.
//!
//! Container summaries reported by the inventory, the per-process record
//! cache with its eviction policy, and the result of one discovery round.

mod cache;
mod container;
mod error;
mod policy;
mod round;

pub use cache::DiscoveryCache;
pub use container::{ContainerSummary, ExposedPort};
pub use error::ParseEvictionPolicyError;
pub use policy::EvictionPolicy;
pub use round::{DiscoveryRound, RoundStats};
