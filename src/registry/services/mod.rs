//! Registry synchronization services.

mod synchronizer;

pub use synchronizer::{RegistrySynchronizer, SyncFailure, SyncReport};
