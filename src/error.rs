use thiserror::Error;

use crate::digest::Phase;

/// Failures surfaced by the digest engine. None of these are transient;
/// nothing is retried internally.
#[derive(Error, Debug)]
pub enum DigestError {
    /// The compression engine's working memory could not be acquired.
    /// Fatal to the instance being constructed.
    #[error("engine working memory allocation failed: {0}")]
    ResourceExhaustion(String),

    /// A caller-supplied offset/length pair or window read exceeds the
    /// actual bounds of the region. Checked before any buffering, so no
    /// partial mutation has occurred.
    #[error("range out of bounds: offset {offset} + length {length} exceeds {available} available bytes")]
    OutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },

    /// An operation was invoked in a lifecycle phase that does not
    /// permit it. A caller bug, not a data error.
    #[error("{operation} is not permitted in the {phase:?} phase")]
    UnsupportedState {
        operation: &'static str,
        phase: Phase,
    },

    /// The compression engine reported an internal fault. The digest in
    /// progress is lost; the instance must be re-initialized.
    #[error("compression engine fault: {0}")]
    Computation(String),
}
