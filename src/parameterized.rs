//! Accessors over containers whose element type is a parameter.
//!
//! A container accessor does not know which concrete accessor its elements
//! should be wrapped in; the caller decides through the `TA` / `TL` type
//! parameter, and [`FromRead`] / [`FromSpec`] build it.

use crate::access::{AnyAccess, FromRead};
use crate::compose;
use crate::lens::{AnyLens, FromSpec};
use crate::spec::{Data, LensSpec, host_reader};

/// Read-side element factory for container accessors.
pub trait ParameterizedAccess<H: 'static, C: Data>: AnyAccess<H, C> {
    /// Builds an element accessor that reads straight from the host.
    ///
    /// The container accessor is bypassed; this is the escape hatch for
    /// elements whose location depends on more than the container.
    fn create_sub_access_from_host<T, TA, F>(&self, read: F) -> TA
    where
        T: 'static,
        TA: FromRead<H, T>,
        F: Fn(&H) -> Option<T> + Send + Sync + 'static,
    {
        TA::from_read(host_reader(read))
    }

    /// Builds an element accessor reading `read(container)` through this
    /// accessor.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenskit::access::AnyAccess;
    /// use lenskit::containers::ListAccess;
    /// use lenskit::parameterized::ParameterizedAccess;
    /// use lenskit::primitives::IntegerAccess;
    ///
    /// let items: ListAccess<Vec<i32>, Vec<i32>, IntegerAccess<Vec<i32>>> = ListAccess::of(|items: &Vec<i32>| items.clone());
    /// let sum: IntegerAccess<Vec<i32>> = items.create_sub_access(|items: &Vec<i32>| Some(items.iter().sum()));
    ///
    /// assert_eq!(sum.apply(&vec![1, 2, 3]), Some(6));
    /// ```
    fn create_sub_access<T, TA, F>(&self, read: F) -> TA
    where
        T: 'static,
        TA: FromRead<H, T>,
        F: Fn(&C) -> Option<T> + Send + Sync + 'static,
    {
        compose::create_sub_access(self.read_fn(), read)
    }
}

/// Write-side element factory for container lenses.
///
/// Element lenses built from a read/write pair go through
/// [`AnyLens::create_sub_lens`]; this trait adds composition with a ready
/// spec over the container.
pub trait ParameterizedLens<H: 'static, C: Data>: AnyLens<H, C> + ParameterizedAccess<H, C> {
    /// Builds an element lens by composing this lens with `spec`.
    fn create_sub_lens_from_spec<T, TL>(&self, spec: &LensSpec<C, T>) -> TL
    where
        T: 'static,
        TL: FromSpec<H, T>,
    {
        TL::from_spec(compose::compose_specs(self.lens_spec(), spec))
    }
}
