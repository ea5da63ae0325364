/// Errors produced while scanning a document.
///
/// Both kinds are terminal for the producing call: spans already emitted
/// before the error remain individually valid, but the sequence ends and
/// re-invoking with the same input yields the same outcome. There is no
/// retry or resynchronization at this layer.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Structural violation somewhere in the extraction. The exact offset
    /// is deliberately not surfaced.
    #[error("malformed json input")]
    Malformed,
    /// The document is well formed but the requested key path is absent at
    /// the correct nesting depth.
    #[error("json key path not found")]
    PathNotFound,
}
