//! Organization-scoped segment lookup over one raw JSON document.
//!
//! The document is loaded once at process start (by the caller, or via
//! [`SegmentCache::from_path`]) and scanned lazily with `jsonspan`: the
//! first lookup for an organization materializes a parameter → segments
//! map for that organization only, skipping every other organization as a
//! whole span. Concurrent first lookups for the same organization are
//! serialized by a per-key cell, so each organization is built exactly
//! once per cache.
//!
//! Expected document shape: a top-level array of one-key organization
//! objects, each mapping to an array of one-key parameter objects, each
//! mapping to an array of segment entries. A segment entry's first quoted
//! string is its parameter value and its last quoted string its segment
//! id; the shape in between is not interpreted.

mod cache;
mod error;

pub use cache::{SegmentCache, SegmentConfig};
pub use error::CacheError;
