//! Deferred host transformations.

use std::fmt;
use std::sync::Arc;

use crate::error::AccessError;

type ChangeFn<H> = Arc<dyn Fn(H) -> Result<H, AccessError> + Send + Sync>;

/// A reusable function from a host to an updated host.
///
/// Built by the `change_*` family on [`AnyLens`](crate::lens::AnyLens) and
/// applied later, possibly many times. Changes compose with
/// [`Change::and_then`].
///
/// # Examples
///
/// ```
/// use lenskit::lens::{AnyLens, ObjectLens};
///
/// let first = ObjectLens::new(|pair: &(i32, i32)| pair.0, |pair: (i32, i32), value| (value, pair.1));
/// let second = ObjectLens::new(|pair: &(i32, i32)| pair.1, |pair: (i32, i32), value| (pair.0, value));
///
/// let reset = first.change_to(0).and_then(&second.change_by(|value| value.unwrap_or(0) * 10));
/// assert_eq!(reset.apply((4, 2)), Ok((0, 20)));
/// ```
pub struct Change<H> {
    run: ChangeFn<H>,
    null_safe: bool,
}

impl<H: 'static> Change<H> {
    /// Wraps a fallible host transformation. The change is null-safe.
    #[must_use]
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(H) -> Result<H, AccessError> + Send + Sync + 'static,
    {
        Self::with_null_safety(run, true)
    }

    /// Wraps an infallible host transformation.
    #[must_use]
    pub fn from_fn<F>(run: F) -> Self
    where
        F: Fn(H) -> H + Send + Sync + 'static,
    {
        Self::new(move |host| Ok(run(host)))
    }

    /// Wraps a fallible host transformation with an explicit policy for
    /// absent hosts.
    #[must_use]
    pub fn with_null_safety<F>(run: F, null_safe: bool) -> Self
    where
        F: Fn(H) -> Result<H, AccessError> + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(run),
            null_safe,
        }
    }

    /// The change that leaves the host untouched.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(Ok)
    }

    /// Applies the change.
    ///
    /// # Errors
    ///
    /// Whatever the underlying write reports.
    pub fn apply(&self, host: H) -> Result<H, AccessError> {
        (self.run)(host)
    }

    /// Applies the change to a possibly absent host.
    ///
    /// # Errors
    ///
    /// [`AccessError::NullHost`] when the host is absent and the change is
    /// not null-safe, otherwise the errors of [`Change::apply`].
    pub fn apply_nullable(&self, host: Option<H>) -> Result<Option<H>, AccessError> {
        match host {
            Some(host) => self.apply(host).map(Some),
            None if self.null_safe => Ok(None),
            None => Err(AccessError::NullHost),
        }
    }

    /// Returns `true` when applying to an absent host is tolerated.
    #[must_use]
    pub const fn is_null_safe(&self) -> bool {
        self.null_safe
    }

    /// Runs this change, then `next`. Stops at the first error.
    #[must_use]
    pub fn and_then(&self, next: &Self) -> Self {
        let first = Arc::clone(&self.run);
        let second = Arc::clone(&next.run);
        Self::with_null_safety(
            move |host| first(host).and_then(|host| second(host)),
            self.null_safe && next.null_safe,
        )
    }
}

impl<H> Clone for Change<H> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
            null_safe: self.null_safe,
        }
    }
}

impl<H> fmt::Debug for Change<H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Change")
            .field("null_safe", &self.null_safe)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_identity_leaves_host() {
        assert_eq!(Change::identity().apply(3), Ok(3));
    }

    #[rstest]
    fn test_from_fn() {
        let double = Change::from_fn(|value: i32| value * 2);
        assert_eq!(double.apply(4), Ok(8));
    }

    #[rstest]
    fn test_and_then_stops_at_first_error() {
        let fail = Change::new(|_: i32| Err(AccessError::NoSuchElement));
        let double = Change::from_fn(|value: i32| value * 2);

        assert_eq!(double.and_then(&double).apply(1), Ok(4));
        assert_eq!(fail.and_then(&double).apply(1), Err(AccessError::NoSuchElement));
    }

    #[rstest]
    #[case(true, Ok(None))]
    #[case(false, Err(AccessError::NullHost))]
    fn test_apply_nullable_absent_host(#[case] null_safe: bool, #[case] expected: Result<Option<i32>, AccessError>) {
        let change = Change::with_null_safety(|value: i32| Ok(value + 1), null_safe);
        assert_eq!(change.apply_nullable(None), expected);
        assert_eq!(change.apply_nullable(Some(1)), Ok(Some(2)));
    }

    #[rstest]
    fn test_and_then_combines_null_safety() {
        let safe = Change::from_fn(|value: i32| value);
        let unsafe_change = Change::with_null_safety(Ok, false);
        assert!(!safe.and_then(&unsafe_change).is_null_safe());
        assert!(safe.and_then(&safe).is_null_safe());
    }
}
