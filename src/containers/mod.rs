//! Container adapters: accessors and lenses that reach into sequences,
//! maps, pairs, `Option` and `Result`.
//!
//! Every element accessor an adapter hands out (`at(i)`, `get(key)`,
//! `first()`, ...) is a full accessor of the element's own type, built
//! through the composition core, so it can be composed further. The
//! concrete element type is the adapter's last type parameter.
//!
//! The adapters only rely on the collaborator traits defined here:
//! [`Sequence`] for ordered sequences and [`KeyValueMap`] for maps.
//!
//! # Examples
//!
//! ```
//! use lenskit::access::AnyAccess;
//! use lenskit::containers::ListLens;
//! use lenskit::lens::AnyLens;
//! use lenskit::primitives::StringLens;
//! use lenskit::AccessError;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Record { name: String, tags: Vec<String> }
//!
//! let tags: ListLens<Record, Vec<String>, StringLens<Record>> =
//!     ListLens::new(|record: &Record| record.tags.clone(), |record: Record, tags| Record { tags, ..record });
//!
//! let record = Record { name: "Ann".to_string(), tags: vec!["x".to_string(), "y".to_string()] };
//! assert_eq!(tags.at(0).apply(&record), Some("x".to_string()));
//! assert_eq!(tags.at(5).apply(&record), None);
//! assert_eq!(
//!     tags.at(5).set(record.clone(), "z".to_string()),
//!     Err(AccessError::IndexOutOfBounds { index: 5, length: 2 })
//! );
//!
//! let updated = tags.at(0).set(record, "z".to_string()).unwrap();
//! assert_eq!(updated.tags, vec!["z".to_string(), "y".to_string()]);
//! assert_eq!(updated.name, "Ann");
//! ```

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use crate::control::Memoized;
use crate::error::AccessError;
use crate::spec::Data;

mod list;
mod map;
mod optional;
mod result;
mod tuple;

pub use list::{AnyListAccess, ListAccess, ListLens};
pub use map::{AnyMapAccess, MapAccess, MapLens};
pub use optional::{AnyOptionalAccess, OptionalAccess, OptionalLens};
pub use result::{AnyResultAccess, ResultAccess, ResultLens};
pub use tuple::{Tuple2Access, Tuple2Lens};

// =============================================================================
// Sequence
// =============================================================================

/// An immutable ordered sequence.
///
/// `with` consumes the sequence and returns a rebuilt one; implementations
/// for shared storage copy on write.
pub trait Sequence: Data {
    /// The element type.
    type Item: Data;

    /// Number of elements.
    fn size(&self) -> usize;

    /// The element at `index`, if any.
    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// Replaces the element at `index`.
    ///
    /// # Errors
    ///
    /// [`AccessError::IndexOutOfBounds`] when `index >= self.size()`.
    fn with(self, index: usize, value: Self::Item) -> Result<Self, AccessError>;

    /// Appends `value` at the end.
    #[must_use]
    fn pushed(self, value: Self::Item) -> Self;

    /// Builds a sequence from its elements, in order.
    fn from_items(items: Vec<Self::Item>) -> Self;

    /// Iterates the elements in order.
    fn iter_items(&self) -> impl Iterator<Item = &Self::Item>;

    /// Returns `true` when there are no elements.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

fn out_of_bounds(index: usize, length: usize) -> AccessError {
    tracing::debug!(index, length, "sequence write rejected: index out of bounds");
    AccessError::IndexOutOfBounds { index, length }
}

impl<T: Data> Sequence for Vec<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn with(mut self, index: usize, value: T) -> Result<Self, AccessError> {
        let length = self.len();
        let slot = self.get_mut(index).ok_or_else(|| out_of_bounds(index, length))?;
        *slot = value;
        Ok(self)
    }

    fn pushed(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    fn from_items(items: Vec<T>) -> Self {
        items
    }

    fn iter_items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: Data> Sequence for VecDeque<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        Self::get(self, index)
    }

    fn with(mut self, index: usize, value: T) -> Result<Self, AccessError> {
        let length = self.len();
        let slot = self.get_mut(index).ok_or_else(|| out_of_bounds(index, length))?;
        *slot = value;
        Ok(self)
    }

    fn pushed(mut self, value: T) -> Self {
        self.push_back(value);
        self
    }

    fn from_items(items: Vec<T>) -> Self {
        items.into()
    }

    fn iter_items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: Data> Sequence for Arc<[T]> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_ref().get(index)
    }

    fn with(self, index: usize, value: T) -> Result<Self, AccessError> {
        self.to_vec().with(index, value).map(Self::from)
    }

    fn pushed(self, value: T) -> Self {
        let mut items = self.to_vec();
        items.push(value);
        items.into()
    }

    fn from_items(items: Vec<T>) -> Self {
        items.into()
    }

    fn iter_items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

// =============================================================================
// DerivedSequence
// =============================================================================

/// A sequence whose elements are computed on first access.
///
/// Produced by [`AnyListAccess::map_each`]: the upstream transform runs at
/// most once per derived sequence, however many times it is read and from
/// however many threads. Clones share the cached elements.
pub struct DerivedSequence<T> {
    items: Arc<Memoized<Vec<T>>>,
}

impl<T: Data> DerivedSequence<T> {
    /// Defers `compute` until the elements are first needed.
    pub fn new<F>(compute: F) -> Self
    where
        F: FnOnce() -> Vec<T> + Send + 'static,
    {
        Self {
            items: Arc::new(Memoized::new(compute)),
        }
    }

    /// Wraps already-computed elements.
    pub fn ready(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(Memoized::ready(items)),
        }
    }

    /// The elements, computing them if needed.
    ///
    /// # Panics
    ///
    /// If the upstream transform panics, or panicked on an earlier access.
    pub fn as_slice(&self) -> &[T] {
        self.items.force()
    }

    /// Returns `true` once the elements have been computed.
    pub fn is_materialized(&self) -> bool {
        self.items.is_initialized()
    }
}

impl<T: Data> Sequence for DerivedSequence<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn with(self, index: usize, value: T) -> Result<Self, AccessError> {
        self.as_slice().to_vec().with(index, value).map(Self::ready)
    }

    fn pushed(self, value: T) -> Self {
        Self::ready(self.as_slice().to_vec().pushed(value))
    }

    fn from_items(items: Vec<T>) -> Self {
        Self::ready(items)
    }

    fn iter_items(&self) -> impl Iterator<Item = &T> {
        self.as_slice().iter()
    }
}

impl<T> Clone for DerivedSequence<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Data + PartialEq> PartialEq for DerivedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DerivedSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("DerivedSequence").field(&self.items).finish()
    }
}

// =============================================================================
// KeyValueMap
// =============================================================================

/// An immutable key-value map.
pub trait KeyValueMap: Data {
    /// The key type.
    type Key: Data;
    /// The value type.
    type Value: Data;

    /// Number of entries.
    fn size(&self) -> usize;

    /// The value stored under `key`, if any.
    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Returns `true` when `key` has a value.
    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or replaces the value under `key`.
    #[must_use]
    fn with(self, key: Self::Key, value: Self::Value) -> Self;

    /// Removes `key` if present.
    #[must_use]
    fn without(self, key: &Self::Key) -> Self;

    /// Builds a map from its entries. Later duplicates win.
    fn from_entries(entries: Vec<(Self::Key, Self::Value)>) -> Self;

    /// Iterates the entries.
    fn iter_entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;

    /// Returns `true` when there are no entries.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl<K, V, S> KeyValueMap for HashMap<K, V, S>
where
    K: Data + Eq + Hash,
    V: Data,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
{
    type Key = K;
    type Value = V;

    fn size(&self) -> usize {
        self.len()
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        Self::contains_key(self, key)
    }

    fn with(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    fn without(mut self, key: &K) -> Self {
        self.remove(key);
        self
    }

    fn from_entries(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }

    fn iter_entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K, V> KeyValueMap for BTreeMap<K, V>
where
    K: Data + Ord,
    V: Data,
{
    type Key = K;
    type Value = V;

    fn size(&self) -> usize {
        self.len()
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        Self::contains_key(self, key)
    }

    fn with(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    fn without(mut self, key: &K) -> Self {
        self.remove(key);
        self
    }

    fn from_entries(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }

    fn iter_entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}
