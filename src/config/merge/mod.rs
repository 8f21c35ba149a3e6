//! Source merging for configuration.

pub mod merge_policy;
pub mod service;
