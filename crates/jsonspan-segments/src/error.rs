use thiserror::Error;

/// Errors surfaced while constructing a cache.
///
/// Lookups themselves never fail: a malformed or absent organization
/// resolves to an empty result, definitively for the loaded document.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The segment document could not be read from disk.
    #[error("failed to read segment document: {0}")]
    Io(#[from] std::io::Error),
}
