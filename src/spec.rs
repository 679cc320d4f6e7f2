//! The accessor spec: a read function, a write function and a null-safety flag.
//!
//! A [`LensSpec`] is the raw material every lens in this crate is made of.
//! Reads take an optional host (`None` stands for an absent host) and
//! return an optional value; writes take an owned host and return the
//! rebuilt host, or an [`AccessError`] when the write target is invalid.
//!
//! # Laws
//!
//! For any present host `h`:
//!
//! 1. **`PutGet`**: `spec.read(&spec.write(h, d)?) == Some(d)`
//! 2. **`GetPut`**: if `spec.read(&h) == Some(d)` then `spec.write(h, d)? == h`
//! 3. **`PutPut`**: `spec.write(spec.write(h, d1)?, d2) == spec.write(h, d2)`
//!
//! A spec carries no parent pointer: once composed, the identity of a
//! sub-lens is the pair of closures it captured.
//!
//! # Examples
//!
//! ```
//! use lenskit::spec::LensSpec;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let x = LensSpec::of(|point: &Point| point.x, |point: Point, x| Point { x, ..point });
//!
//! let point = Point { x: 1, y: 2 };
//! assert_eq!(x.read(&point), Some(1));
//! assert_eq!(x.write(point, 10), Ok(Point { x: 10, y: 2 }));
//! assert_eq!(x.read_nullable(None), None);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::compose;
use crate::error::AccessError;

/// Values an accessor can focus on.
///
/// Accessors are shareable closures, so anything they capture or hand out
/// must be cloneable and thread-safe.
pub trait Data: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Data for T {}

/// Read half of an accessor. `None` as input is an absent host; `None` as
/// output is an absent value.
pub type ReadFn<H, D> = Arc<dyn Fn(Option<&H>) -> Option<D> + Send + Sync>;

/// Write half of a lens: rebuilds the host around a new value.
pub type WriteFn<H, D> = Arc<dyn Fn(H, D) -> Result<H, AccessError> + Send + Sync>;

/// Builds a [`ReadFn`] from a closure over an optional host.
pub fn reader<H, D, F>(read: F) -> ReadFn<H, D>
where
    F: Fn(Option<&H>) -> Option<D> + Send + Sync + 'static,
{
    Arc::new(read)
}

/// Builds a [`ReadFn`] that answers `None` for an absent host and
/// delegates to `read` otherwise.
pub fn host_reader<H, D, F>(read: F) -> ReadFn<H, D>
where
    H: 'static,
    F: Fn(&H) -> Option<D> + Send + Sync + 'static,
{
    reader(move |host: Option<&H>| host.and_then(&read))
}

/// Builds a [`WriteFn`] from a fallible closure.
pub fn writer<H, D, F>(write: F) -> WriteFn<H, D>
where
    F: Fn(H, D) -> Result<H, AccessError> + Send + Sync + 'static,
{
    Arc::new(write)
}

/// A read function, a write function and a null-safety policy.
///
/// When `null_safe` is `true`, writing through an absent host yields an
/// absent host instead of an error. Reads never fail regardless of the
/// policy.
pub struct LensSpec<H, D> {
    read: ReadFn<H, D>,
    write: WriteFn<H, D>,
    null_safe: bool,
}

impl<H, D> Clone for LensSpec<H, D> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            write: Arc::clone(&self.write),
            null_safe: self.null_safe,
        }
    }
}

impl<H, D> fmt::Debug for LensSpec<H, D> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LensSpec")
            .field("null_safe", &self.null_safe)
            .finish_non_exhaustive()
    }
}

impl<H: 'static, D: 'static> LensSpec<H, D> {
    /// Assembles a spec from already-built halves.
    #[must_use]
    pub fn from_parts(read: ReadFn<H, D>, write: WriteFn<H, D>, null_safe: bool) -> Self {
        Self {
            read,
            write,
            null_safe,
        }
    }

    /// Creates a null-safe spec for a field that is always present.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenskit::spec::LensSpec;
    ///
    /// let first = LensSpec::of(|pair: &(i32, i32)| pair.0, |pair: (i32, i32), value| (value, pair.1));
    /// assert_eq!(first.write((1, 2), 5), Ok((5, 2)));
    /// ```
    #[must_use]
    pub fn of<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> D + Send + Sync + 'static,
        W: Fn(H, D) -> H + Send + Sync + 'static,
    {
        Self::from_parts(
            host_reader(move |host: &H| Some(read(host))),
            writer(move |host, data| Ok(write(host, data))),
            true,
        )
    }

    /// Creates a null-safe spec whose read may find nothing.
    #[must_use]
    pub fn of_optional<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> Option<D> + Send + Sync + 'static,
        W: Fn(H, D) -> H + Send + Sync + 'static,
    {
        Self::from_parts(
            host_reader(read),
            writer(move |host, data| Ok(write(host, data))),
            true,
        )
    }

    /// Creates a null-safe spec whose write may reject the value.
    #[must_use]
    pub fn of_fallible<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> Option<D> + Send + Sync + 'static,
        W: Fn(H, D) -> Result<H, AccessError> + Send + Sync + 'static,
    {
        Self::from_parts(host_reader(read), writer(write), true)
    }

    /// Reads the focused value from a present host.
    pub fn read(&self, host: &H) -> Option<D> {
        (self.read)(Some(host))
    }

    /// Reads the focused value from a possibly absent host.
    pub fn read_nullable(&self, host: Option<&H>) -> Option<D> {
        (self.read)(host)
    }

    /// Writes `data` into `host`, returning the rebuilt host.
    ///
    /// # Errors
    ///
    /// Whatever the write function reports, typically
    /// [`AccessError::IndexOutOfBounds`] or [`AccessError::NullValue`].
    pub fn write(&self, host: H, data: D) -> Result<H, AccessError> {
        (self.write)(host, data)
    }

    /// Writes `data` into a possibly absent host.
    ///
    /// An absent host stays absent when the spec is null-safe.
    ///
    /// # Errors
    ///
    /// [`AccessError::NullHost`] when the host is absent and the spec is not
    /// null-safe, otherwise the errors of [`LensSpec::write`].
    pub fn write_nullable(&self, host: Option<H>, data: D) -> Result<Option<H>, AccessError> {
        match host {
            Some(host) => self.write(host, data).map(Some),
            None if self.null_safe => {
                tracing::trace!("absent host; null-safe write leaves it absent");
                Ok(None)
            }
            None => Err(AccessError::NullHost),
        }
    }

    /// Returns `true` when writes through an absent host are tolerated.
    #[must_use]
    pub const fn is_null_safe(&self) -> bool {
        self.null_safe
    }

    /// Returns a copy of this spec that tolerates absent hosts.
    #[must_use]
    pub fn to_null_safe(&self) -> Self {
        self.with_null_safety(true)
    }

    /// Returns a copy of this spec that rejects writes through absent hosts.
    #[must_use]
    pub fn to_null_unsafe(&self) -> Self {
        self.with_null_safety(false)
    }

    fn with_null_safety(&self, null_safe: bool) -> Self {
        Self {
            null_safe,
            ..self.clone()
        }
    }

    /// The read half.
    #[must_use]
    pub const fn read_fn(&self) -> &ReadFn<H, D> {
        &self.read
    }

    /// The write half.
    #[must_use]
    pub const fn write_fn(&self) -> &WriteFn<H, D> {
        &self.write
    }

    /// Composes this spec with a spec reaching further into the focused value.
    ///
    /// The result is null-safe only if both specs are.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenskit::spec::LensSpec;
    ///
    /// let outer = LensSpec::of(|pair: &((i32, i32), i32)| pair.0, |pair: ((i32, i32), i32), inner| (inner, pair.1));
    /// let inner = LensSpec::of(|pair: &(i32, i32)| pair.1, |pair: (i32, i32), value| (pair.0, value));
    /// let composed = outer.then(&inner);
    ///
    /// assert_eq!(composed.read(&((1, 2), 3)), Some(2));
    /// assert_eq!(composed.write(((1, 2), 3), 9), Ok(((1, 9), 3)));
    /// ```
    #[must_use]
    pub fn then<B: 'static>(&self, inner: &LensSpec<D, B>) -> LensSpec<H, B> {
        compose::compose_specs(self, inner)
    }
}

impl<H: Data> LensSpec<H, H> {
    /// The spec focusing on the host itself.
    #[must_use]
    pub fn identity() -> Self {
        Self::of(H::clone, |_, replacement| replacement)
    }
}
