//! Error type shared by every accessor and lens.
//!
//! Reads never fail: an absent host, an absent intermediate value, an
//! out-of-range index or a missing key all read as `None`. Writes, on the
//! other hand, report invalid targets through [`AccessError`].

use thiserror::Error;

/// Failure raised by a write, by an explicit unwrap, or by a throwing accessor.
///
/// # Examples
///
/// ```
/// use lenskit::AccessError;
///
/// let error = AccessError::IndexOutOfBounds { index: 5, length: 2 };
/// assert_eq!(
///     error.to_string(),
///     "index 5 is out of bounds for a sequence of length 2"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A write went through an absent host with a lens that is not null-safe.
    #[error("cannot write through an absent host with a lens that is not null-safe")]
    NullHost,

    /// A write went through an absent intermediate value, or a throwing
    /// accessor read an absent value.
    #[error("the focused value is absent")]
    NullValue,

    /// A sequence write targeted an index outside `0..length`.
    #[error("index {index} is out of bounds for a sequence of length {length}")]
    IndexOutOfBounds {
        /// The rejected index.
        index: usize,
        /// The length of the sequence at the time of the write.
        length: usize,
    },

    /// An explicit unwrap found an empty wrapper.
    #[error("no value present")]
    NoSuchElement,

    /// A foreign failure carried through an accessor, such as the error
    /// side of a `Result`.
    #[error("{0}")]
    Failed(String),
}

impl AccessError {
    /// Wraps any displayable failure as [`AccessError::Failed`].
    #[must_use]
    pub fn failed(cause: impl std::fmt::Display) -> Self {
        Self::Failed(cause.to_string())
    }

    /// Returns `true` for [`AccessError::IndexOutOfBounds`].
    #[must_use]
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. })
    }
}
