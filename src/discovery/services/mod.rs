//! Application services for container discovery.

mod scanner;

pub use scanner::{
    DEFAULT_PROBE_HOST, DiscoveryError, DiscoveryResult, DiscoveryScanner, ScanSettings,
};
