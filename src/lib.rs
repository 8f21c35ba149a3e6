//! PhotoAdmin: Hierarchical Review of Photo Records
//!
//! Folds flat, path-keyed photo classification records into a navigable
//! directory tree with rolled-up statistics, and serves that tree together
//! with thumbnails and resized originals to a review front end.

pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod import;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
