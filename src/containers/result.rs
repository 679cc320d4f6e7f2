//! Accessors and lenses over `Result`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::access::{AnyAccess, FromRead, ObjectAccess, ThrowingAccess};
use crate::containers::OptionalAccess;
use crate::error::AccessError;
use crate::lens::{AnyLens, FromSpec};
use crate::parameterized::{ParameterizedAccess, ParameterizedLens};
use crate::primitives::BooleanAccess;
use crate::spec::{Data, LensSpec, ReadFn, host_reader, reader};

/// Read-only operations shared by [`ResultAccess`] and [`ResultLens`].
///
/// The success value reads absent for an `Err`; the error is reached
/// through [`AnyResultAccess::error`].
pub trait AnyResultAccess<H: 'static, T: Data, E: Data>: ParameterizedAccess<H, Result<T, E>> {
    /// The accessor type the success value is read through.
    type Element: FromRead<H, T>;

    /// The error. Absent for `Ok`.
    fn error(&self) -> ObjectAccess<H, E> {
        self.create_sub_access(|result: &Result<T, E>| result.as_ref().err().cloned())
    }

    /// Tests for `Ok`.
    fn is_ok(&self) -> BooleanAccess<H> {
        self.that(Result::is_ok)
    }

    /// Tests for `Err`.
    fn is_err(&self) -> BooleanAccess<H> {
        self.that(Result::is_err)
    }

    /// The success value, or `default` for an `Err`.
    fn or_else(&self, default: T) -> Self::Element {
        self.or_else_get(move || default.clone())
    }

    /// The success value, or the result of `supplier` for an `Err`.
    fn or_else_get<F>(&self, supplier: F) -> Self::Element
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let read = Arc::clone(self.read_fn());
        <Self::Element as FromRead<H, T>>::from_read(reader(move |host: Option<&H>| {
            Some(read(host).and_then(Result::ok).unwrap_or_else(&supplier))
        }))
    }

    /// The success value, failing with the stored error rendered as
    /// [`AccessError::Failed`], or with [`AccessError::NoSuchElement`] when
    /// the host is absent.
    fn or_else_throw(&self) -> ThrowingAccess<H, T>
    where
        E: fmt::Display,
    {
        let read = Arc::clone(self.read_fn());
        ThrowingAccess::new(move |host| match read(host) {
            Some(Ok(value)) => Ok(value),
            Some(Err(error)) => Err(AccessError::failed(error)),
            None => Err(AccessError::NoSuchElement),
        })
    }

    /// The success value, failing with `error(stored)` otherwise. `stored`
    /// is `None` when the host is absent.
    fn or_else_throw_with<X, F>(&self, error: F) -> ThrowingAccess<H, T, X>
    where
        X: 'static,
        F: Fn(Option<E>) -> X + Send + Sync + 'static,
    {
        let read = Arc::clone(self.read_fn());
        ThrowingAccess::new(move |host| match read(host) {
            Some(Ok(value)) => Ok(value),
            Some(Err(stored)) => Err(error(Some(stored))),
            None => Err(error(None)),
        })
    }

    /// Maps the success value.
    fn map<U, UA, F>(&self, mapper: F) -> ResultAccess<H, U, E, UA>
    where
        U: Data,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.map_with(move |result: Result<T, E>| result.map(&mapper))
    }

    /// Maps the success value into another `Result`.
    fn flat_map<U, UA, F>(&self, mapper: F) -> ResultAccess<H, U, E, UA>
    where
        U: Data,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        self.map_with(move |result: Result<T, E>| result.and_then(&mapper))
    }

    /// The success value as an `Option`, discarding the error.
    fn to_optional(&self) -> OptionalAccess<H, T, Self::Element> {
        self.map_with(Result::ok)
    }
}

// =============================================================================
// ResultAccess
// =============================================================================

/// Read-only access to a `Result<T, E>` whose success value is read through
/// `TA`.
pub struct ResultAccess<H, T, E, TA> {
    read: ReadFn<H, Result<T, E>>,
    element: PhantomData<fn() -> TA>,
}

impl<H: 'static, T: Data, E: Data, TA: FromRead<H, T>> ResultAccess<H, T, E, TA> {
    /// Creates an accessor for a `Result` field.
    #[must_use]
    pub fn of<F>(read: F) -> Self
    where
        F: Fn(&H) -> Result<T, E> + Send + Sync + 'static,
    {
        Self::from_read(host_reader(move |host: &H| Some(read(host))))
    }

    /// The success value. Absent for `Err`.
    pub fn get(&self) -> TA {
        self.create_sub_access(|result: &Result<T, E>| result.as_ref().ok().cloned())
    }
}

impl<H, T, E, TA> FromRead<H, Result<T, E>> for ResultAccess<H, T, E, TA> {
    fn from_read(read: ReadFn<H, Result<T, E>>) -> Self {
        Self {
            read,
            element: PhantomData,
        }
    }
}

impl<H: 'static, T: Data, E: Data, TA> AnyAccess<H, Result<T, E>> for ResultAccess<H, T, E, TA> {
    type Derived = Self;

    fn read_fn(&self) -> &ReadFn<H, Result<T, E>> {
        &self.read
    }
}

impl<H: 'static, T: Data, E: Data, TA> ParameterizedAccess<H, Result<T, E>> for ResultAccess<H, T, E, TA> {}

impl<H: 'static, T: Data, E: Data, TA: FromRead<H, T>> AnyResultAccess<H, T, E> for ResultAccess<H, T, E, TA> {
    type Element = TA;
}

impl<H, T, E, TA> Clone for ResultAccess<H, T, E, TA> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            element: PhantomData,
        }
    }
}

impl<H, T, E, TA> fmt::Debug for ResultAccess<H, T, E, TA> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ResultAccess").finish_non_exhaustive()
    }
}

// =============================================================================
// ResultLens
// =============================================================================

/// Read-write access to a `Result<T, E>` whose success value is a lens of
/// type `TL`.
///
/// Writing through [`ResultLens::get`] always stores `Ok(value)`,
/// replacing a stored error.
pub struct ResultLens<H, T, E, TL> {
    spec: LensSpec<H, Result<T, E>>,
    element: PhantomData<fn() -> TL>,
}

impl<H: 'static, T: Data, E: Data, TL: AnyLens<H, T>> ResultLens<H, T, E, TL> {
    /// Wraps an existing spec.
    #[must_use]
    pub const fn of(spec: LensSpec<H, Result<T, E>>) -> Self {
        Self {
            spec,
            element: PhantomData,
        }
    }

    /// Creates a null-safe lens for a `Result` field.
    #[must_use]
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> Result<T, E> + Send + Sync + 'static,
        W: Fn(H, Result<T, E>) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of(read, write))
    }

    /// The success value.
    pub fn get(&self) -> TL {
        self.create_sub_lens(
            |result: &Result<T, E>| result.as_ref().ok().cloned(),
            |_: Result<T, E>, value| Ok(Ok(value)),
        )
    }
}

impl<H, T, E, TL> FromSpec<H, Result<T, E>> for ResultLens<H, T, E, TL> {
    fn from_spec(spec: LensSpec<H, Result<T, E>>) -> Self {
        Self {
            spec,
            element: PhantomData,
        }
    }
}

impl<H: 'static, T: Data, E: Data, TL: AnyAccess<H, T>> AnyAccess<H, Result<T, E>> for ResultLens<H, T, E, TL> {
    type Derived = ResultAccess<H, T, E, TL::Derived>;

    fn read_fn(&self) -> &ReadFn<H, Result<T, E>> {
        self.spec.read_fn()
    }
}

impl<H: 'static, T: Data, E: Data, TL: AnyAccess<H, T>> AnyLens<H, Result<T, E>> for ResultLens<H, T, E, TL> {
    fn lens_spec(&self) -> &LensSpec<H, Result<T, E>> {
        &self.spec
    }
}

impl<H: 'static, T: Data, E: Data, TL: AnyAccess<H, T>> ParameterizedAccess<H, Result<T, E>>
    for ResultLens<H, T, E, TL>
{
}

impl<H: 'static, T: Data, E: Data, TL: AnyAccess<H, T>> ParameterizedLens<H, Result<T, E>>
    for ResultLens<H, T, E, TL>
{
}

impl<H: 'static, T: Data, E: Data, TL: AnyAccess<H, T>> AnyResultAccess<H, T, E> for ResultLens<H, T, E, TL> {
    type Element = TL::Derived;
}

impl<H, T, E, TL> Clone for ResultLens<H, T, E, TL> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            element: PhantomData,
        }
    }
}

impl<H, T, E, TL> fmt::Debug for ResultLens<H, T, E, TL> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ResultLens").field("spec", &self.spec).finish_non_exhaustive()
    }
}
