//! Accessors and lenses over key-value maps.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::access::{AnyAccess, FromRead};
use crate::containers::{KeyValueMap, ListAccess, Tuple2Access};
use crate::lens::{AnyLens, Change, FromSpec};
use crate::parameterized::{ParameterizedAccess, ParameterizedLens};
use crate::primitives::{BooleanAccess, SizeAccess};
use crate::spec::{LensSpec, ReadFn, host_reader};

type Entry<M> = (<M as KeyValueMap>::Key, <M as KeyValueMap>::Value);

/// Read-only operations shared by [`MapAccess`] and [`MapLens`].
pub trait AnyMapAccess<H: 'static, M: KeyValueMap>: ParameterizedAccess<H, M> {
    /// The accessor type keys are wrapped in.
    type KeyAccess: FromRead<H, M::Key>;
    /// The accessor type values are wrapped in.
    type ValueAccess: FromRead<H, M::Value>;

    /// Number of entries.
    fn size(&self) -> SizeAccess<H> {
        self.map_to_number(|map: M| map.size())
    }

    /// Tests for an empty map.
    fn is_empty(&self) -> BooleanAccess<H> {
        self.that(|map: &M| map.is_empty())
    }

    /// Tests whether `key` has a value.
    fn contains_key(&self, key: M::Key) -> BooleanAccess<H> {
        self.that(move |map: &M| map.contains_key(&key))
    }

    /// The keys, in the map's iteration order.
    fn keys(&self) -> ListAccess<H, Vec<M::Key>, Self::KeyAccess> {
        self.map_with(|map: M| map.iter_entries().map(|(key, _)| key.clone()).collect::<Vec<_>>())
    }

    /// The values, in the map's iteration order.
    fn values(&self) -> ListAccess<H, Vec<M::Value>, Self::ValueAccess> {
        self.map_with(|map: M| map.iter_entries().map(|(_, value)| value.clone()).collect::<Vec<_>>())
    }

    /// The entries as a list of pairs, in the map's iteration order.
    #[allow(clippy::type_complexity)]
    fn entries(
        &self,
    ) -> ListAccess<H, Vec<Entry<M>>, Tuple2Access<H, M::Key, M::Value, Self::KeyAccess, Self::ValueAccess>> {
        self.map_with(|map: M| {
            map.iter_entries()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<Vec<_>>()
        })
    }

    /// Keeps the entries matching `predicate`.
    fn filter_entries<P>(&self, predicate: P) -> Self::Derived
    where
        P: Fn(&M::Key, &M::Value) -> bool + Send + Sync + 'static,
    {
        self.map_with(move |map: M| {
            M::from_entries(
                map.iter_entries()
                    .filter(|(key, value)| predicate(key, value))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            )
        })
    }
}

// =============================================================================
// MapAccess
// =============================================================================

/// Read-only access to a map `M`, with keys read through `KA` and values
/// through `VA`.
pub struct MapAccess<H, M, KA, VA> {
    read: ReadFn<H, M>,
    element: PhantomData<fn() -> (KA, VA)>,
}

impl<H, M, KA, VA> MapAccess<H, M, KA, VA>
where
    H: 'static,
    M: KeyValueMap,
    KA: FromRead<H, M::Key>,
    VA: FromRead<H, M::Value>,
{
    /// Creates an accessor for a map that is always present.
    #[must_use]
    pub fn of<F>(read: F) -> Self
    where
        F: Fn(&H) -> M + Send + Sync + 'static,
    {
        Self::from_read(host_reader(move |host: &H| Some(read(host))))
    }

    /// Creates an accessor for a map that may be absent.
    #[must_use]
    pub fn of_optional<F>(read: F) -> Self
    where
        F: Fn(&H) -> Option<M> + Send + Sync + 'static,
    {
        Self::from_read(host_reader(read))
    }

    /// The value under `key`. Absent when the key is.
    pub fn get(&self, key: M::Key) -> VA {
        self.create_sub_access(move |map: &M| map.get(&key).cloned())
    }
}

impl<H, M, KA, VA> FromRead<H, M> for MapAccess<H, M, KA, VA> {
    fn from_read(read: ReadFn<H, M>) -> Self {
        Self {
            read,
            element: PhantomData,
        }
    }
}

impl<H: 'static, M: KeyValueMap, KA, VA> AnyAccess<H, M> for MapAccess<H, M, KA, VA> {
    type Derived = Self;

    fn read_fn(&self) -> &ReadFn<H, M> {
        &self.read
    }
}

impl<H: 'static, M: KeyValueMap, KA, VA> ParameterizedAccess<H, M> for MapAccess<H, M, KA, VA> {}

impl<H, M, KA, VA> AnyMapAccess<H, M> for MapAccess<H, M, KA, VA>
where
    H: 'static,
    M: KeyValueMap,
    KA: FromRead<H, M::Key>,
    VA: FromRead<H, M::Value>,
{
    type KeyAccess = KA;
    type ValueAccess = VA;
}

impl<H, M, KA, VA> Clone for MapAccess<H, M, KA, VA> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            element: PhantomData,
        }
    }
}

impl<H, M, KA, VA> fmt::Debug for MapAccess<H, M, KA, VA> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("MapAccess").finish_non_exhaustive()
    }
}

// =============================================================================
// MapLens
// =============================================================================

/// Read-write access to a map `M`, with keys read through `KA` and values
/// reached through lenses of type `VL`.
///
/// Writing through `get(key)` inserts the key when it is missing and
/// replaces its value otherwise.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use lenskit::access::AnyAccess;
/// use lenskit::containers::{AnyMapAccess, MapLens};
/// use lenskit::lens::{self, AnyLens};
/// use lenskit::primitives::{IntegerLens, StringAccess};
///
/// type Stock = BTreeMap<String, i32>;
///
/// let stock: MapLens<Stock, Stock, StringAccess<Stock>, IntegerLens<Stock>> = lens::identity();
/// let apples = stock.get("apple".to_string());
///
/// let empty = Stock::new();
/// assert_eq!(apples.apply(&empty), None);
///
/// let filled = apples.set(empty, 3).unwrap();
/// assert_eq!(apples.apply(&filled), Some(3));
/// assert_eq!(stock.size().apply(&filled), Some(1));
/// ```
pub struct MapLens<H, M, KA, VL> {
    spec: LensSpec<H, M>,
    element: PhantomData<fn() -> (KA, VL)>,
}

impl<H, M, KA, VL> MapLens<H, M, KA, VL>
where
    H: 'static,
    M: KeyValueMap,
    KA: FromRead<H, M::Key>,
    VL: AnyLens<H, M::Value>,
{
    /// Wraps an existing spec.
    #[must_use]
    pub const fn of(spec: LensSpec<H, M>) -> Self {
        Self {
            spec,
            element: PhantomData,
        }
    }

    /// Creates a null-safe lens for a map that is always present.
    #[must_use]
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> M + Send + Sync + 'static,
        W: Fn(H, M) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of(read, write))
    }

    /// Creates a null-safe lens for a map that may be absent.
    #[must_use]
    pub fn optional<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> Option<M> + Send + Sync + 'static,
        W: Fn(H, M) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of_optional(read, write))
    }

    /// The value under `key`.
    pub fn get(&self, key: M::Key) -> VL {
        let read_key = key.clone();
        self.create_sub_lens(
            move |map: &M| map.get(&read_key).cloned(),
            move |map: M, value| Ok(map.with(key.clone(), value)),
        )
    }

    /// A change inserting or replacing the value under `key`. An absent map
    /// becomes a map of one entry.
    #[must_use]
    pub fn put(&self, key: M::Key, value: M::Value) -> Change<H> {
        self.change_by(move |map: Option<M>| {
            map.unwrap_or_else(|| M::from_entries(Vec::new()))
                .with(key.clone(), value.clone())
        })
    }

    /// A change removing `key`. An absent map stays absent.
    #[must_use]
    pub fn remove(&self, key: M::Key) -> Change<H> {
        let spec = self.spec.clone();
        Change::with_null_safety(
            move |host: H| match spec.read(&host) {
                Some(map) => spec.write(host, map.without(&key)),
                None => Ok(host),
            },
            self.is_null_safe(),
        )
    }
}

impl<H, M, KA, VL> FromSpec<H, M> for MapLens<H, M, KA, VL> {
    fn from_spec(spec: LensSpec<H, M>) -> Self {
        Self {
            spec,
            element: PhantomData,
        }
    }
}

impl<H, M, KA, VL> AnyAccess<H, M> for MapLens<H, M, KA, VL>
where
    H: 'static,
    M: KeyValueMap,
    VL: AnyAccess<H, M::Value>,
{
    type Derived = MapAccess<H, M, KA, VL::Derived>;

    fn read_fn(&self) -> &ReadFn<H, M> {
        self.spec.read_fn()
    }
}

impl<H, M, KA, VL> AnyLens<H, M> for MapLens<H, M, KA, VL>
where
    H: 'static,
    M: KeyValueMap,
    VL: AnyAccess<H, M::Value>,
{
    fn lens_spec(&self) -> &LensSpec<H, M> {
        &self.spec
    }
}

impl<H, M, KA, VL> ParameterizedAccess<H, M> for MapLens<H, M, KA, VL>
where
    H: 'static,
    M: KeyValueMap,
    VL: AnyAccess<H, M::Value>,
{
}

impl<H, M, KA, VL> ParameterizedLens<H, M> for MapLens<H, M, KA, VL>
where
    H: 'static,
    M: KeyValueMap,
    VL: AnyAccess<H, M::Value>,
{
}

impl<H, M, KA, VL> AnyMapAccess<H, M> for MapLens<H, M, KA, VL>
where
    H: 'static,
    M: KeyValueMap,
    KA: FromRead<H, M::Key>,
    VL: AnyAccess<H, M::Value>,
{
    type KeyAccess = KA;
    type ValueAccess = VL::Derived;
}

impl<H, M, KA, VL> Clone for MapLens<H, M, KA, VL> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            element: PhantomData,
        }
    }
}

impl<H, M, KA, VL> fmt::Debug for MapLens<H, M, KA, VL> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("MapLens").field("spec", &self.spec).finish_non_exhaustive()
    }
}
