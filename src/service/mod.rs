//! Canonical service records for discovered agents.
//!
//! A [`domain::ServiceRecord`] describes one agent service found behind a
//! container endpoint. Records can be flattened into string-to-string maps
//! for registries that only store flat metadata, and recovered from them.

pub mod domain;

#[cfg(test)]
mod tests;
