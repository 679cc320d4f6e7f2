//! The generic concrete accessor.

use std::fmt;
use std::sync::Arc;

use crate::access::{AnyAccess, FromRead};
use crate::spec::{Data, ReadFn, host_reader, reader};

/// An accessor with no type-specific operations.
///
/// # Examples
///
/// ```
/// use lenskit::access::{AnyAccess, ObjectAccess};
///
/// let length = ObjectAccess::of(|text: &String| text.len());
/// assert_eq!(length.apply(&"four".to_string()), Some(4));
/// ```
pub struct ObjectAccess<H, D> {
    read: ReadFn<H, D>,
}

impl<H: 'static, D: Data> ObjectAccess<H, D> {
    /// Creates an accessor for a value that is always present.
    #[must_use]
    pub fn of<F>(read: F) -> Self
    where
        F: Fn(&H) -> D + Send + Sync + 'static,
    {
        Self::from_read(host_reader(move |host: &H| Some(read(host))))
    }

    /// Creates an accessor for a value that may be absent.
    #[must_use]
    pub fn of_optional<F>(read: F) -> Self
    where
        F: Fn(&H) -> Option<D> + Send + Sync + 'static,
    {
        Self::from_read(host_reader(read))
    }
}

impl<H, D> FromRead<H, D> for ObjectAccess<H, D> {
    fn from_read(read: ReadFn<H, D>) -> Self {
        Self { read }
    }
}

impl<H: 'static, D: Data> AnyAccess<H, D> for ObjectAccess<H, D> {
    type Derived = Self;

    fn read_fn(&self) -> &ReadFn<H, D> {
        &self.read
    }
}

impl<H, D> Clone for ObjectAccess<H, D> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
        }
    }
}

impl<H, D> fmt::Debug for ObjectAccess<H, D> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ObjectAccess").finish_non_exhaustive()
    }
}

/// The accessor reading the host itself, as any accessor type.
///
/// # Examples
///
/// ```
/// use lenskit::access::{self, AnyAccess};
/// use lenskit::primitives::{AnyStringAccess, StringAccess};
///
/// let text: StringAccess<String> = access::identity();
/// assert_eq!(text.length().apply(&"abc".to_string()), Some(3));
/// ```
#[must_use]
pub fn identity<H, A>() -> A
where
    H: Data,
    A: FromRead<H, H>,
{
    A::from_read(reader(|host: Option<&H>| host.cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_of_reads_present_value() {
        let access = ObjectAccess::of(|pair: &(i32, i32)| pair.0 + pair.1);
        assert_eq!(access.apply(&(1, 2)), Some(3));
    }

    #[rstest]
    fn test_of_optional_reads_absent_value() {
        let access = ObjectAccess::of_optional(|items: &Vec<i32>| items.last().copied());
        assert_eq!(access.apply(&Vec::new()), None);
    }

    #[rstest]
    fn test_identity() {
        let access: ObjectAccess<i32, i32> = identity();
        assert_eq!(access.apply(&5), Some(5));
        assert_eq!(access.apply_nullable(None), None);
    }

    #[rstest]
    fn test_clone_shares_read() {
        let access = ObjectAccess::of(|value: &i32| value * 2);
        let cloned = access.clone();
        assert_eq!(cloned.apply(&4), access.apply(&4));
    }

    static_assertions::assert_impl_all!(ObjectAccess<String, String>: Send, Sync, Clone);
}
