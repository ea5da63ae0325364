mod walkers;

/// Shorthand for "no key path" at call sites.
pub(crate) const NO_PATH: &[&str] = &[];
