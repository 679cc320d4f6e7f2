//! The read capability shared by every accessor and lens.

use std::sync::Arc;

use crate::access::{ObjectAccess, ThrowingAccess};
use crate::compose;
use crate::error::AccessError;
use crate::primitives::{BooleanAccess, NumberAccess, Numeric, StringAccess};
use crate::spec::{Data, ReadFn, reader};

/// Builds a concrete accessor from a raw read function.
///
/// This is the factory that parameterized accessors use to manufacture
/// element accessors, and that builders use to return the same concrete
/// type they were called on.
pub trait FromRead<H, D>: Sized {
    /// Wraps `read` into the implementing accessor type.
    fn from_read(read: ReadFn<H, D>) -> Self;
}

/// Read access from a host `H` to a value `D`.
///
/// Absence is never an error on the read side: an absent host or an absent
/// value simply reads as `None`.
///
/// # Type Parameters
///
/// - `H`: the host type
/// - `D`: the focused value type
pub trait AnyAccess<H: 'static, D: Data>: Sized {
    /// The concrete read-only accessor builders return.
    ///
    /// A read-only accessor usually derives itself; a lens derives its
    /// read-only counterpart.
    type Derived: AnyAccess<H, D> + FromRead<H, D>;

    /// The read function backing this accessor.
    fn read_fn(&self) -> &ReadFn<H, D>;

    /// Builds a [`Self::Derived`] accessor from a read function.
    fn new_access(read: ReadFn<H, D>) -> Self::Derived {
        <Self::Derived as FromRead<H, D>>::from_read(read)
    }

    /// Reads the focused value.
    fn apply(&self, host: &H) -> Option<D> {
        (self.read_fn())(Some(host))
    }

    /// Reads the focused value from a possibly absent host.
    fn apply_nullable(&self, host: Option<&H>) -> Option<D> {
        (self.read_fn())(host)
    }

    /// Reads the focused value, substituting `fallback` when it is absent.
    fn apply_or(&self, host: &H, fallback: D) -> D {
        self.apply(host).unwrap_or(fallback)
    }

    /// A read-only view of this accessor.
    fn to_access(&self) -> Self::Derived {
        Self::new_access(Arc::clone(self.read_fn()))
    }

    /// Substitutes `value` whenever the host or the focused value is absent.
    fn or_default_to(&self, value: D) -> Self::Derived {
        let read = Arc::clone(self.read_fn());
        Self::new_access(reader(move |host: Option<&H>| {
            read(host).or_else(|| Some(value.clone()))
        }))
    }

    /// Substitutes a value produced by `supplier` whenever the host or the
    /// focused value is absent.
    fn or_default_from<F>(&self, supplier: F) -> Self::Derived
    where
        F: Fn() -> D + Send + Sync + 'static,
    {
        let read = Arc::clone(self.read_fn());
        Self::new_access(reader(move |host: Option<&H>| read(host).or_else(|| Some(supplier()))))
    }

    /// Turns absence into [`AccessError::NullValue`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lenskit::AccessError;
    /// use lenskit::access::{AnyAccess, ObjectAccess};
    ///
    /// let first = ObjectAccess::of_optional(|items: &Vec<i32>| items.first().copied());
    /// let strict = first.or_throw();
    ///
    /// assert_eq!(strict.apply(&vec![3]), Ok(3));
    /// assert_eq!(strict.apply(&vec![]), Err(AccessError::NullValue));
    /// ```
    fn or_throw(&self) -> ThrowingAccess<H, D> {
        self.or_throw_with(|| AccessError::NullValue)
    }

    /// Turns absence into the error produced by `error`.
    fn or_throw_with<E, F>(&self, error: F) -> ThrowingAccess<H, D, E>
    where
        E: 'static,
        F: Fn() -> E + Send + Sync + 'static,
    {
        let read = Arc::clone(self.read_fn());
        ThrowingAccess::new(move |host| read(host).ok_or_else(&error))
    }

    /// Maps the focused value into any accessor type.
    ///
    /// The target type is usually inferred from the binding:
    ///
    /// ```
    /// use lenskit::access::{AnyAccess, ObjectAccess};
    /// use lenskit::primitives::StringAccess;
    ///
    /// let count = ObjectAccess::of(|items: &Vec<i32>| items.len());
    /// let label: StringAccess<Vec<i32>> = count.map_with(|count| format!("{count} items"));
    ///
    /// assert_eq!(label.apply(&vec![1, 2]), Some("2 items".to_string()));
    /// ```
    fn map_with<T, TA, F>(&self, mapper: F) -> TA
    where
        T: Data,
        TA: FromRead<H, T>,
        F: Fn(D) -> T + Send + Sync + 'static,
    {
        let read = Arc::clone(self.read_fn());
        TA::from_read(reader(move |host: Option<&H>| read(host).map(&mapper)))
    }

    /// Maps the focused value into a generic accessor.
    fn map_to<T, F>(&self, mapper: F) -> ObjectAccess<H, T>
    where
        T: Data,
        F: Fn(D) -> T + Send + Sync + 'static,
    {
        self.map_with(mapper)
    }

    /// Maps the focused value into a string accessor.
    fn map_to_string<F>(&self, mapper: F) -> StringAccess<H>
    where
        F: Fn(D) -> String + Send + Sync + 'static,
    {
        self.map_with(mapper)
    }

    /// Maps the focused value into a numeric accessor.
    fn map_to_number<N, F>(&self, mapper: F) -> NumberAccess<H, N>
    where
        N: Numeric,
        F: Fn(D) -> N + Send + Sync + 'static,
    {
        self.map_with(mapper)
    }

    /// Maps the focused value into a numeric accessor that reads `default`
    /// when the host or the focused value is absent.
    fn map_to_number_or<N, F>(&self, mapper: F, default: N) -> NumberAccess<H, N>
    where
        N: Numeric,
        F: Fn(D) -> N + Send + Sync + 'static,
    {
        let read = Arc::clone(self.read_fn());
        NumberAccess::from_read(reader(move |host: Option<&H>| {
            Some(read(host).map_or(default, &mapper))
        }))
    }

    /// Maps the focused value into a boolean accessor.
    fn map_to_boolean<F>(&self, mapper: F) -> BooleanAccess<H>
    where
        F: Fn(D) -> bool + Send + Sync + 'static,
    {
        self.map_with(mapper)
    }

    /// Tests the focused value. Absent values stay absent.
    fn that<P>(&self, predicate: P) -> BooleanAccess<H>
    where
        P: Fn(&D) -> bool + Send + Sync + 'static,
    {
        self.map_with(move |value: D| predicate(&value))
    }

    /// Tests the focused value for equality with `expected`.
    fn that_is(&self, expected: D) -> BooleanAccess<H>
    where
        D: PartialEq,
    {
        self.that(move |value| *value == expected)
    }

    /// Tests the focused value for inequality with `unexpected`.
    fn that_is_not(&self, unexpected: D) -> BooleanAccess<H>
    where
        D: PartialEq,
    {
        self.that(move |value| *value != unexpected)
    }

    /// Reads `true` when the focused value is present. Never absent.
    fn that_is_present(&self) -> BooleanAccess<H> {
        let read = Arc::clone(self.read_fn());
        BooleanAccess::from_read(reader(move |host: Option<&H>| Some(read(host).is_some())))
    }

    /// Reads `true` when the focused value is absent. Never absent.
    fn that_is_absent(&self) -> BooleanAccess<H> {
        let read = Arc::clone(self.read_fn());
        BooleanAccess::from_read(reader(move |host: Option<&H>| Some(read(host).is_none())))
    }

    /// Continues reading with an accessor over the focused value.
    fn then_access<B, A2, TA>(&self, inner: &A2) -> TA
    where
        B: Data,
        A2: AnyAccess<D, B>,
        TA: FromRead<H, B>,
    {
        TA::from_read(compose::compose_reads(self.read_fn(), inner.read_fn()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Person {
        name: String,
        nickname: Option<String>,
        age: u32,
    }

    fn ann() -> Person {
        Person {
            name: "Ann".to_string(),
            nickname: None,
            age: 31,
        }
    }

    fn nickname() -> ObjectAccess<Person, String> {
        ObjectAccess::of_optional(|person: &Person| person.nickname.clone())
    }

    #[rstest]
    fn test_apply_and_apply_nullable() {
        let name = ObjectAccess::of(|person: &Person| person.name.clone());
        assert_eq!(name.apply(&ann()), Some("Ann".to_string()));
        assert_eq!(name.apply_nullable(None), None);
    }

    #[rstest]
    fn test_apply_or() {
        assert_eq!(nickname().apply_or(&ann(), "-".to_string()), "-");
    }

    #[rstest]
    fn test_or_default_to_covers_absent_host_and_value() {
        let access = nickname().or_default_to("none".to_string());
        assert_eq!(access.apply(&ann()), Some("none".to_string()));
        assert_eq!(access.apply_nullable(None), Some("none".to_string()));
    }

    #[rstest]
    fn test_or_default_from() {
        let access = nickname().or_default_from(|| "supplied".to_string());
        assert_eq!(access.apply(&ann()), Some("supplied".to_string()));
    }

    #[rstest]
    fn test_or_throw_with_custom_error() {
        let access = nickname().or_throw_with(|| "missing nickname");
        assert_eq!(access.apply(&ann()), Err("missing nickname"));
        assert_eq!(access.apply_nullable(None), Err("missing nickname"));
    }

    #[rstest]
    fn test_predicates() {
        let age = ObjectAccess::of(|person: &Person| person.age);
        assert_eq!(age.that(|age| *age > 30).apply(&ann()), Some(true));
        assert_eq!(age.that_is(31).apply(&ann()), Some(true));
        assert_eq!(age.that_is_not(31).apply(&ann()), Some(false));
        assert_eq!(age.that(|age| *age > 30).apply_nullable(None), None);
    }

    #[rstest]
    fn test_presence_predicates_always_answer() {
        assert_eq!(nickname().that_is_present().apply(&ann()), Some(false));
        assert_eq!(nickname().that_is_absent().apply(&ann()), Some(true));
        assert_eq!(nickname().that_is_absent().apply_nullable(None), Some(true));
    }

    #[rstest]
    fn test_map_to_number_or_defaults() {
        let length = nickname().map_to_number_or(|nickname| nickname.len(), 0_usize);
        assert_eq!(length.apply(&ann()), Some(0));
        assert_eq!(length.apply_nullable(None), Some(0));
    }

    #[rstest]
    fn test_map_to_variants() {
        let name = ObjectAccess::of(|person: &Person| person.name.clone());
        assert_eq!(name.map_to(|name| name.len()).apply(&ann()), Some(3));
        assert_eq!(
            name.map_to_string(|name| name.to_lowercase()).apply(&ann()),
            Some("ann".to_string())
        );
        assert_eq!(name.map_to_number(|name| name.len() as i64).apply(&ann()), Some(3));
        assert_eq!(name.map_to_boolean(|name| name.is_empty()).apply(&ann()), Some(false));
    }

    #[rstest]
    fn test_then_access() {
        let name = ObjectAccess::of(|person: &Person| person.name.clone());
        let length = ObjectAccess::of(|name: &String| name.len());
        let composed: ObjectAccess<Person, usize> = name.then_access(&length);
        assert_eq!(composed.apply(&ann()), Some(3));
    }
}
