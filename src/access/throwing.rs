//! Accessors that turn absence into an error.

use std::fmt;
use std::sync::Arc;

use crate::error::AccessError;

type ThrowingReadFn<H, D, E> = Arc<dyn Fn(Option<&H>) -> Result<D, E> + Send + Sync>;

/// An accessor whose read fails instead of answering `None`.
///
/// Produced by [`AnyAccess::or_throw`](crate::access::AnyAccess::or_throw),
/// [`AnyAccess::or_throw_with`](crate::access::AnyAccess::or_throw_with) and
/// the `or_else_throw` family on wrapper accessors.
///
/// # Type Parameters
///
/// - `H`: the host type
/// - `D`: the focused value type
/// - `E`: the error raised on absence (defaults to [`AccessError`])
pub struct ThrowingAccess<H, D, E = AccessError> {
    read: ThrowingReadFn<H, D, E>,
}

impl<H, D, E> ThrowingAccess<H, D, E> {
    /// Wraps a fallible read function.
    #[must_use]
    pub fn new<F>(read: F) -> Self
    where
        F: Fn(Option<&H>) -> Result<D, E> + Send + Sync + 'static,
    {
        Self {
            read: Arc::new(read),
        }
    }

    /// Reads the focused value.
    ///
    /// # Errors
    ///
    /// The configured error when the focused value is absent.
    pub fn apply(&self, host: &H) -> Result<D, E> {
        (self.read)(Some(host))
    }

    /// Reads the focused value from a possibly absent host.
    ///
    /// # Errors
    ///
    /// The configured error when the host or the focused value is absent.
    pub fn apply_nullable(&self, host: Option<&H>) -> Result<D, E> {
        (self.read)(host)
    }

    /// Reads the focused value, discarding the error.
    pub fn apply_ok(&self, host: &H) -> Option<D> {
        self.apply(host).ok()
    }
}

impl<H, D, E> Clone for ThrowingAccess<H, D, E> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
        }
    }
}

impl<H, D, E> fmt::Debug for ThrowingAccess<H, D, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ThrowingAccess").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_apply_propagates_error() {
        let access: ThrowingAccess<Vec<i32>, i32> =
            ThrowingAccess::new(|host: Option<&Vec<i32>>| host.and_then(|items| items.first().copied()).ok_or(AccessError::NullValue));

        assert_eq!(access.apply(&vec![1]), Ok(1));
        assert_eq!(access.apply(&vec![]), Err(AccessError::NullValue));
        assert_eq!(access.apply_nullable(None), Err(AccessError::NullValue));
        assert_eq!(access.apply_ok(&vec![]), None);
    }
}
