//! flowch - Classifier
//!
//! Derives direction, traffic class, and owning user for each flow record
//! from membership in configured network sets.
//!
//! # Model
//!
//! - **local** networks mark the accounting subject's own address space; a
//!   flow touching one resolves a client endpoint and a remote endpoint.
//! - **peering** networks get preferential class over generic internet.
//! - the fixed multicast block `224.0.0.0/4` wins over everything else.
//! - the user table maps the client address (32-bit integer form) to an
//!   owner id.
//!
//! Lookup data comes from inline config, local files, or HTTP endpoints in
//! JSON or delimiter-separated form; see [`LookupSource`]. Individual entries
//! that fail to parse are logged and excluded - a malformed source body is an
//! error.
//!
//! The classifier itself is a pure function over immutable tables: it is
//! built fully before the first record is classified and never changes
//! during a run.
//!
//! # Compatibility note
//!
//! Within the local set the *last* containing prefix in iteration order
//! decides direction and class, not the most specific one. This mirrors the
//! accounting system this feeds and must not be "fixed" to longest-prefix
//! matching without coordinating a schema migration.

mod classify;
mod error;
mod source;

pub use classify::Classifier;
pub use error::ClassifierError;
pub use source::{load_entries, LookupSource, TableSource};

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;
