//! The generic concrete lens.

use std::fmt;

use crate::access::{AnyAccess, ObjectAccess};
use crate::lens::{AnyLens, FromSpec};
use crate::spec::{Data, LensSpec, ReadFn};

/// A lens with no type-specific operations.
pub struct ObjectLens<H, D> {
    spec: LensSpec<H, D>,
}

impl<H: 'static, D: Data> ObjectLens<H, D> {
    /// Wraps an existing spec.
    #[must_use]
    pub const fn of(spec: LensSpec<H, D>) -> Self {
        Self { spec }
    }

    /// Creates a null-safe lens for a field that is always present.
    #[must_use]
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> D + Send + Sync + 'static,
        W: Fn(H, D) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of(read, write))
    }

    /// Creates a null-safe lens for a field that may be absent.
    #[must_use]
    pub fn optional<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> Option<D> + Send + Sync + 'static,
        W: Fn(H, D) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of_optional(read, write))
    }
}

impl<H, D> FromSpec<H, D> for ObjectLens<H, D> {
    fn from_spec(spec: LensSpec<H, D>) -> Self {
        Self { spec }
    }
}

impl<H: 'static, D: Data> AnyAccess<H, D> for ObjectLens<H, D> {
    type Derived = ObjectAccess<H, D>;

    fn read_fn(&self) -> &ReadFn<H, D> {
        self.spec.read_fn()
    }
}

impl<H: 'static, D: Data> AnyLens<H, D> for ObjectLens<H, D> {
    fn lens_spec(&self) -> &LensSpec<H, D> {
        &self.spec
    }
}

impl<H, D> Clone for ObjectLens<H, D> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
        }
    }
}

impl<H, D> fmt::Debug for ObjectLens<H, D> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ObjectLens").field("spec", &self.spec).finish()
    }
}

/// The lens focusing on the host itself, as any lens type.
#[must_use]
pub fn identity<H, L>() -> L
where
    H: Data,
    L: FromSpec<H, H>,
{
    L::from_spec(LensSpec::identity())
}
