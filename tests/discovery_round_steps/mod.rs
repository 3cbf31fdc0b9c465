//! Step definitions for discovery round scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
