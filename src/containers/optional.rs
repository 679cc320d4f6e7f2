//! Accessors and lenses over `Option`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::access::{AnyAccess, FromRead, ThrowingAccess};
use crate::error::AccessError;
use crate::lens::{AnyLens, FromSpec};
use crate::parameterized::{ParameterizedAccess, ParameterizedLens};
use crate::primitives::BooleanAccess;
use crate::spec::{Data, LensSpec, ReadFn, host_reader, reader};

/// Read-only operations shared by [`OptionalAccess`] and [`OptionalLens`].
///
/// An empty `Option` and an absent host read alike: both are absent.
pub trait AnyOptionalAccess<H: 'static, T: Data>: ParameterizedAccess<H, Option<T>> {
    /// The accessor type the wrapped value is read through.
    type Element: FromRead<H, T>;

    /// Tests for `Some`.
    fn is_present(&self) -> BooleanAccess<H> {
        self.that(|value: &Option<T>| value.is_some())
    }

    /// Tests for `None`.
    fn is_absent(&self) -> BooleanAccess<H> {
        self.that(|value: &Option<T>| value.is_none())
    }

    /// The wrapped value, or `default` when there is none.
    fn or_else(&self, default: T) -> Self::Element {
        self.or_else_get(move || default.clone())
    }

    /// The wrapped value, or the result of `supplier` when there is none.
    fn or_else_get<F>(&self, supplier: F) -> Self::Element
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let read = Arc::clone(self.read_fn());
        <Self::Element as FromRead<H, T>>::from_read(reader(move |host: Option<&H>| {
            Some(read(host).flatten().unwrap_or_else(&supplier))
        }))
    }

    /// The wrapped value, failing with [`AccessError::NoSuchElement`] when
    /// there is none.
    fn or_else_throw(&self) -> ThrowingAccess<H, T> {
        self.or_else_throw_with(|| AccessError::NoSuchElement)
    }

    /// The wrapped value, failing with the error produced by `error` when
    /// there is none.
    fn or_else_throw_with<E, F>(&self, error: F) -> ThrowingAccess<H, T, E>
    where
        E: 'static,
        F: Fn() -> E + Send + Sync + 'static,
    {
        let read = Arc::clone(self.read_fn());
        ThrowingAccess::new(move |host| read(host).flatten().ok_or_else(&error))
    }

    /// Maps the wrapped value.
    fn map<U, UA, F>(&self, mapper: F) -> OptionalAccess<H, U, UA>
    where
        U: Data,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.map_with(move |value: Option<T>| value.map(&mapper))
    }

    /// Maps the wrapped value into another `Option`.
    fn flat_map<U, UA, F>(&self, mapper: F) -> OptionalAccess<H, U, UA>
    where
        U: Data,
        F: Fn(T) -> Option<U> + Send + Sync + 'static,
    {
        self.map_with(move |value: Option<T>| value.and_then(&mapper))
    }

    /// Keeps the wrapped value only when it matches `predicate`.
    fn filter<P>(&self, predicate: P) -> Self::Derived
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.map_with(move |value: Option<T>| value.filter(|inner| predicate(inner)))
    }
}

// =============================================================================
// OptionalAccess
// =============================================================================

/// Read-only access to an `Option<T>` whose value is read through `TA`.
pub struct OptionalAccess<H, T, TA> {
    read: ReadFn<H, Option<T>>,
    element: PhantomData<fn() -> TA>,
}

impl<H: 'static, T: Data, TA: FromRead<H, T>> OptionalAccess<H, T, TA> {
    /// Creates an accessor for an `Option` field.
    #[must_use]
    pub fn of<F>(read: F) -> Self
    where
        F: Fn(&H) -> Option<T> + Send + Sync + 'static,
    {
        Self::from_read(host_reader(move |host: &H| Some(read(host))))
    }

    /// The wrapped value. Absent for `None`.
    pub fn get(&self) -> TA {
        self.create_sub_access(|value: &Option<T>| value.clone())
    }
}

impl<H, T, TA> FromRead<H, Option<T>> for OptionalAccess<H, T, TA> {
    fn from_read(read: ReadFn<H, Option<T>>) -> Self {
        Self {
            read,
            element: PhantomData,
        }
    }
}

impl<H: 'static, T: Data, TA> AnyAccess<H, Option<T>> for OptionalAccess<H, T, TA> {
    type Derived = Self;

    fn read_fn(&self) -> &ReadFn<H, Option<T>> {
        &self.read
    }
}

impl<H: 'static, T: Data, TA> ParameterizedAccess<H, Option<T>> for OptionalAccess<H, T, TA> {}

impl<H: 'static, T: Data, TA: FromRead<H, T>> AnyOptionalAccess<H, T> for OptionalAccess<H, T, TA> {
    type Element = TA;
}

impl<H, T, TA> Clone for OptionalAccess<H, T, TA> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            element: PhantomData,
        }
    }
}

impl<H, T, TA> fmt::Debug for OptionalAccess<H, T, TA> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("OptionalAccess").finish_non_exhaustive()
    }
}

// =============================================================================
// OptionalLens
// =============================================================================

/// Read-write access to an `Option<T>` whose value is a lens of type `TL`.
///
/// Writing through [`OptionalLens::get`] always stores `Some(value)`, so a
/// `None` becomes populated.
///
/// # Examples
///
/// ```
/// use lenskit::access::AnyAccess;
/// use lenskit::containers::{AnyOptionalAccess, OptionalLens};
/// use lenskit::lens::AnyLens;
/// use lenskit::primitives::StringLens;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Contact {
///     email: Option<String>,
/// }
///
/// let email: OptionalLens<Contact, String, StringLens<Contact>> =
///     OptionalLens::new(|contact: &Contact| contact.email.clone(), |_, email| Contact { email });
/// let unknown = Contact { email: None };
///
/// assert_eq!(email.get().apply(&unknown), None);
/// assert_eq!(email.or_else("n/a".to_string()).apply(&unknown), Some("n/a".to_string()));
/// assert_eq!(
///     email.get().set(unknown, "a@b.c".to_string()),
///     Ok(Contact { email: Some("a@b.c".to_string()) })
/// );
/// ```
pub struct OptionalLens<H, T, TL> {
    spec: LensSpec<H, Option<T>>,
    element: PhantomData<fn() -> TL>,
}

impl<H: 'static, T: Data, TL: AnyLens<H, T>> OptionalLens<H, T, TL> {
    /// Wraps an existing spec.
    #[must_use]
    pub const fn of(spec: LensSpec<H, Option<T>>) -> Self {
        Self {
            spec,
            element: PhantomData,
        }
    }

    /// Creates a null-safe lens for an `Option` field.
    #[must_use]
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> Option<T> + Send + Sync + 'static,
        W: Fn(H, Option<T>) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of(read, write))
    }

    /// The wrapped value.
    pub fn get(&self) -> TL {
        self.create_sub_lens(|value: &Option<T>| value.clone(), |_: Option<T>, value| Ok(Some(value)))
    }
}

impl<H, T, TL> FromSpec<H, Option<T>> for OptionalLens<H, T, TL> {
    fn from_spec(spec: LensSpec<H, Option<T>>) -> Self {
        Self {
            spec,
            element: PhantomData,
        }
    }
}

impl<H: 'static, T: Data, TL: AnyAccess<H, T>> AnyAccess<H, Option<T>> for OptionalLens<H, T, TL> {
    type Derived = OptionalAccess<H, T, TL::Derived>;

    fn read_fn(&self) -> &ReadFn<H, Option<T>> {
        self.spec.read_fn()
    }
}

impl<H: 'static, T: Data, TL: AnyAccess<H, T>> AnyLens<H, Option<T>> for OptionalLens<H, T, TL> {
    fn lens_spec(&self) -> &LensSpec<H, Option<T>> {
        &self.spec
    }
}

impl<H: 'static, T: Data, TL: AnyAccess<H, T>> ParameterizedAccess<H, Option<T>> for OptionalLens<H, T, TL> {}

impl<H: 'static, T: Data, TL: AnyAccess<H, T>> ParameterizedLens<H, Option<T>> for OptionalLens<H, T, TL> {}

impl<H: 'static, T: Data, TL: AnyAccess<H, T>> AnyOptionalAccess<H, T> for OptionalLens<H, T, TL> {
    type Element = TL::Derived;
}

impl<H, T, TL> Clone for OptionalLens<H, T, TL> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            element: PhantomData,
        }
    }
}

impl<H, T, TL> fmt::Debug for OptionalLens<H, T, TL> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("OptionalLens").field("spec", &self.spec).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{AnyNumberAccess, IntegerAccess, IntegerLens, StringAccess};
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Slot {
        level: Option<i32>,
    }

    fn level() -> OptionalLens<Slot, i32, IntegerLens<Slot>> {
        OptionalLens::new(|slot: &Slot| slot.level, |_, level| Slot { level })
    }

    fn slot(level: Option<i32>) -> Slot {
        Slot { level }
    }

    #[rstest]
    #[case(Some(3), Some(3))]
    #[case(None, None)]
    fn test_get_reads(#[case] stored: Option<i32>, #[case] expected: Option<i32>) {
        assert_eq!(level().get().apply(&slot(stored)), expected);
    }

    #[rstest]
    #[case(Some(3))]
    #[case(None)]
    fn test_get_write_populates(#[case] stored: Option<i32>) {
        assert_eq!(level().get().set(slot(stored), 9), Ok(slot(Some(9))));
    }

    #[rstest]
    fn test_get_keeps_element_operations() {
        assert_eq!(level().get().increment().apply(slot(Some(1))), Ok(slot(Some(2))));
        assert_eq!(level().get().increment().apply(slot(None)), Ok(slot(Some(1))));
    }

    #[rstest]
    fn test_presence() {
        assert_eq!(level().is_present().apply(&slot(Some(1))), Some(true));
        assert_eq!(level().is_absent().apply(&slot(None)), Some(true));
        assert_eq!(level().is_present().apply_nullable(None), None);
    }

    #[rstest]
    fn test_or_else_variants() {
        assert_eq!(level().or_else(5).apply(&slot(None)), Some(5));
        assert_eq!(level().or_else(5).apply(&slot(Some(2))), Some(2));
        assert_eq!(level().or_else_get(|| 7).apply_nullable(None), Some(7));
        assert!(level().or_else(5).that_is_positive().apply(&slot(None)).unwrap_or(false));
    }

    #[rstest]
    fn test_or_else_throw() {
        assert_eq!(level().or_else_throw().apply(&slot(Some(4))), Ok(4));
        assert_eq!(level().or_else_throw().apply(&slot(None)), Err(AccessError::NoSuchElement));
        assert_eq!(level().or_else_throw_with(|| "missing").apply(&slot(None)), Err("missing"));
    }

    #[rstest]
    fn test_map_and_flat_map() {
        let label: OptionalAccess<Slot, String, StringAccess<Slot>> = level().map(|value| format!("L{value}"));
        assert_eq!(label.get().apply(&slot(Some(2))), Some("L2".to_string()));
        assert_eq!(label.apply(&slot(None)), Some(None));

        let even: OptionalAccess<Slot, i32, IntegerAccess<Slot>> =
            level().flat_map(|value| (value % 2 == 0).then_some(value));
        assert_eq!(even.get().apply(&slot(Some(3))), None);
        assert_eq!(even.get().apply(&slot(Some(4))), Some(4));
    }

    #[rstest]
    fn test_filter() {
        let high = level().filter(|value| *value > 10);
        assert_eq!(high.get().apply(&slot(Some(11))), Some(11));
        assert_eq!(high.get().apply(&slot(Some(3))), None);
    }

    #[rstest]
    fn test_access_of() {
        let access: OptionalAccess<Vec<i32>, i32, IntegerAccess<Vec<i32>>> =
            OptionalAccess::of(|items: &Vec<i32>| items.first().copied());
        assert_eq!(access.get().apply(&vec![8]), Some(8));
        assert_eq!(access.is_absent().apply(&Vec::new()), Some(true));
    }
}
