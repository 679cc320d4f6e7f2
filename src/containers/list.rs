//! Accessors and lenses over ordered sequences.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::access::{AnyAccess, FromRead};
use crate::containers::{DerivedSequence, Sequence};
use crate::error::AccessError;
use crate::lens::{AnyLens, Change, FromSpec};
use crate::parameterized::{ParameterizedAccess, ParameterizedLens};
use crate::primitives::{BooleanAccess, SizeAccess};
use crate::spec::{Data, LensSpec, ReadFn, host_reader};

/// Read-only operations shared by [`ListAccess`] and [`ListLens`].
///
/// Element accessors returned here are read-only even on a lens: an
/// element found by predicate has no stable position to write back to.
pub trait AnyListAccess<H: 'static, S: Sequence>: ParameterizedAccess<H, S> {
    /// The accessor type elements are wrapped in.
    type Element: FromRead<H, S::Item>;

    /// The first element matching `predicate`.
    fn find_first<P>(&self, predicate: P) -> Self::Element
    where
        P: Fn(&S::Item) -> bool + Send + Sync + 'static,
    {
        self.create_sub_access(move |items: &S| items.iter_items().find(|item| predicate(item)).cloned())
    }

    /// Number of elements.
    fn size(&self) -> SizeAccess<H> {
        self.map_to_number(|items: S| items.size())
    }

    /// Tests for an empty sequence.
    fn is_empty(&self) -> BooleanAccess<H> {
        self.that(|items: &S| items.is_empty())
    }

    /// Tests whether some element equals `value`.
    fn contains(&self, value: S::Item) -> BooleanAccess<H>
    where
        S::Item: PartialEq,
    {
        self.that(move |items: &S| items.iter_items().any(|item| *item == value))
    }

    /// Keeps the elements matching `predicate`, in order.
    fn filter<P>(&self, predicate: P) -> Self::Derived
    where
        P: Fn(&S::Item) -> bool + Send + Sync + 'static,
    {
        self.map_with(move |items: S| {
            S::from_items(items.iter_items().filter(|item| predicate(item)).cloned().collect())
        })
    }

    /// Maps every element through `mapper`.
    ///
    /// The mapping is lazy: it runs when the derived sequence is first
    /// read, once per host read, however many times the result is read.
    fn map_each<T, TB, F>(&self, mapper: F) -> ListAccess<H, DerivedSequence<T>, TB>
    where
        T: Data,
        TB: FromRead<H, T>,
        F: Fn(&S::Item) -> T + Send + Sync + 'static,
    {
        let mapper = Arc::new(mapper);
        self.map_with(move |items: S| {
            let mapper = Arc::clone(&mapper);
            DerivedSequence::new(move || items.iter_items().map(|item| mapper(item)).collect())
        })
    }
}

// =============================================================================
// ListAccess
// =============================================================================

/// Read-only access to a sequence `S` whose elements are read through `TA`.
///
/// # Examples
///
/// ```
/// use lenskit::access::AnyAccess;
/// use lenskit::containers::{AnyListAccess, ListAccess};
/// use lenskit::primitives::{AnyStringAccess, StringAccess};
///
/// let words: ListAccess<Vec<String>, Vec<String>, StringAccess<Vec<String>>> =
///     ListAccess::of(|words: &Vec<String>| words.clone());
/// let host = vec!["alpha".to_string(), "beta".to_string()];
///
/// assert_eq!(words.last().to_upper_case().apply(&host), Some("BETA".to_string()));
/// assert_eq!(words.find_first(|word| word.starts_with('b')).apply(&host), Some("beta".to_string()));
/// assert_eq!(words.size().apply(&host), Some(2));
/// ```
pub struct ListAccess<H, S, TA> {
    read: ReadFn<H, S>,
    element: PhantomData<fn() -> TA>,
}

impl<H: 'static, S: Sequence, TA: FromRead<H, S::Item>> ListAccess<H, S, TA> {
    /// Creates an accessor for a sequence that is always present.
    #[must_use]
    pub fn of<F>(read: F) -> Self
    where
        F: Fn(&H) -> S + Send + Sync + 'static,
    {
        Self::from_read(host_reader(move |host: &H| Some(read(host))))
    }

    /// Creates an accessor for a sequence that may be absent.
    #[must_use]
    pub fn of_optional<F>(read: F) -> Self
    where
        F: Fn(&H) -> Option<S> + Send + Sync + 'static,
    {
        Self::from_read(host_reader(read))
    }

    /// The element at `index`. Absent for an absent or too short sequence.
    pub fn at(&self, index: usize) -> TA {
        self.create_sub_access(move |items: &S| items.get(index).cloned())
    }

    /// The first element.
    pub fn first(&self) -> TA {
        self.at(0)
    }

    /// The last element.
    pub fn last(&self) -> TA {
        self.create_sub_access(|items: &S| last_index(items).and_then(|index| items.get(index)).cloned())
    }
}

fn last_index<S: Sequence>(items: &S) -> Option<usize> {
    items.size().checked_sub(1)
}

impl<H, S, TA> FromRead<H, S> for ListAccess<H, S, TA> {
    fn from_read(read: ReadFn<H, S>) -> Self {
        Self {
            read,
            element: PhantomData,
        }
    }
}

impl<H: 'static, S: Sequence, TA> AnyAccess<H, S> for ListAccess<H, S, TA> {
    type Derived = Self;

    fn read_fn(&self) -> &ReadFn<H, S> {
        &self.read
    }
}

impl<H: 'static, S: Sequence, TA> ParameterizedAccess<H, S> for ListAccess<H, S, TA> {}

impl<H: 'static, S: Sequence, TA: FromRead<H, S::Item>> AnyListAccess<H, S> for ListAccess<H, S, TA> {
    type Element = TA;
}

impl<H, S, TA> Clone for ListAccess<H, S, TA> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            element: PhantomData,
        }
    }
}

impl<H, S, TA> fmt::Debug for ListAccess<H, S, TA> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ListAccess").finish_non_exhaustive()
    }
}

// =============================================================================
// ListLens
// =============================================================================

/// Read-write access to a sequence `S` whose elements are lenses of type
/// `TL`.
///
/// Writing an element replaces it in place and rebuilds the host; an index
/// past the end is rejected with [`AccessError::IndexOutOfBounds`] while the
/// same index only reads as absent.
pub struct ListLens<H, S, TL> {
    spec: LensSpec<H, S>,
    element: PhantomData<fn() -> TL>,
}

impl<H: 'static, S: Sequence, TL: AnyLens<H, S::Item>> ListLens<H, S, TL> {
    /// Wraps an existing spec.
    #[must_use]
    pub const fn of(spec: LensSpec<H, S>) -> Self {
        Self {
            spec,
            element: PhantomData,
        }
    }

    /// Creates a null-safe lens for a sequence that is always present.
    #[must_use]
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> S + Send + Sync + 'static,
        W: Fn(H, S) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of(read, write))
    }

    /// Creates a null-safe lens for a sequence that may be absent.
    #[must_use]
    pub fn optional<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> Option<S> + Send + Sync + 'static,
        W: Fn(H, S) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of_optional(read, write))
    }

    /// The element at `index`.
    pub fn at(&self, index: usize) -> TL {
        self.create_sub_lens(
            move |items: &S| items.get(index).cloned(),
            move |items: S, value| items.with(index, value),
        )
    }

    /// The first element.
    pub fn first(&self) -> TL {
        self.at(0)
    }

    /// The last element, located when read or written.
    pub fn last(&self) -> TL {
        self.create_sub_lens(
            |items: &S| last_index(items).and_then(|index| items.get(index)).cloned(),
            |items: S, value| match last_index(&items) {
                Some(index) => items.with(index, value),
                None => Err(AccessError::IndexOutOfBounds { index: 0, length: 0 }),
            },
        )
    }

    /// A change appending `value`. An absent sequence becomes a sequence of
    /// one element.
    #[must_use]
    pub fn append(&self, value: S::Item) -> Change<H> {
        self.change_by(move |items: Option<S>| {
            items
                .unwrap_or_else(|| S::from_items(Vec::new()))
                .pushed(value.clone())
        })
    }
}

impl<H, S, TL> FromSpec<H, S> for ListLens<H, S, TL> {
    fn from_spec(spec: LensSpec<H, S>) -> Self {
        Self {
            spec,
            element: PhantomData,
        }
    }
}

impl<H: 'static, S: Sequence, TL: AnyAccess<H, S::Item>> AnyAccess<H, S> for ListLens<H, S, TL> {
    type Derived = ListAccess<H, S, TL::Derived>;

    fn read_fn(&self) -> &ReadFn<H, S> {
        self.spec.read_fn()
    }
}

impl<H: 'static, S: Sequence, TL: AnyAccess<H, S::Item>> AnyLens<H, S> for ListLens<H, S, TL> {
    fn lens_spec(&self) -> &LensSpec<H, S> {
        &self.spec
    }
}

impl<H: 'static, S: Sequence, TL: AnyAccess<H, S::Item>> ParameterizedAccess<H, S> for ListLens<H, S, TL> {}

impl<H: 'static, S: Sequence, TL: AnyAccess<H, S::Item>> ParameterizedLens<H, S> for ListLens<H, S, TL> {}

impl<H: 'static, S: Sequence, TL: AnyAccess<H, S::Item>> AnyListAccess<H, S> for ListLens<H, S, TL> {
    type Element = TL::Derived;
}

impl<H, S, TL> Clone for ListLens<H, S, TL> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            element: PhantomData,
        }
    }
}

impl<H, S, TL> fmt::Debug for ListLens<H, S, TL> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("ListLens").field("spec", &self.spec).finish_non_exhaustive()
    }
}
