//! Error types for the markup crate
//!
//! Parsing whole documents is total and cannot fail; only the stricter
//! single-element fragment entry point has error cases.

/// Errors when text cannot be read as a single replacement element.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    /// Input was empty or whitespace only.
    #[error("fragment is empty")]
    Empty,

    /// Input contained text or comments but no element.
    #[error("fragment contains no element")]
    NotAnElement,

    /// Input contained more than one top-level element.
    #[error("fragment has {count} top-level elements, expected one")]
    MultipleRoots {
        /// How many top-level elements were found.
        count: usize,
    },
}
