//! Accessors and lenses over pairs.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::access::{AnyAccess, FromRead};
use crate::lens::{AnyLens, FromSpec};
use crate::parameterized::{ParameterizedAccess, ParameterizedLens};
use crate::spec::{Data, LensSpec, ReadFn, host_reader};

/// Read-only access to a pair `(A, B)` whose slots are read through `AA`
/// and `BA`.
pub struct Tuple2Access<H, A, B, AA, BA> {
    read: ReadFn<H, (A, B)>,
    slots: PhantomData<fn() -> (AA, BA)>,
}

impl<H, A, B, AA, BA> Tuple2Access<H, A, B, AA, BA>
where
    H: 'static,
    A: Data,
    B: Data,
    AA: FromRead<H, A>,
    BA: FromRead<H, B>,
{
    /// Creates an accessor for a pair that is always present.
    #[must_use]
    pub fn of<F>(read: F) -> Self
    where
        F: Fn(&H) -> (A, B) + Send + Sync + 'static,
    {
        Self::from_read(host_reader(move |host: &H| Some(read(host))))
    }

    /// Creates an accessor for a pair that may be absent.
    #[must_use]
    pub fn of_optional<F>(read: F) -> Self
    where
        F: Fn(&H) -> Option<(A, B)> + Send + Sync + 'static,
    {
        Self::from_read(host_reader(read))
    }

    /// The first slot.
    pub fn first(&self) -> AA {
        self.create_sub_access(|pair: &(A, B)| Some(pair.0.clone()))
    }

    /// The second slot.
    pub fn second(&self) -> BA {
        self.create_sub_access(|pair: &(A, B)| Some(pair.1.clone()))
    }

    /// The pair with its slots exchanged.
    pub fn swapped(&self) -> Tuple2Access<H, B, A, BA, AA> {
        self.map_with(|(first, second): (A, B)| (second, first))
    }
}

impl<H, A, B, AA, BA> FromRead<H, (A, B)> for Tuple2Access<H, A, B, AA, BA> {
    fn from_read(read: ReadFn<H, (A, B)>) -> Self {
        Self {
            read,
            slots: PhantomData,
        }
    }
}

impl<H: 'static, A: Data, B: Data, AA, BA> AnyAccess<H, (A, B)> for Tuple2Access<H, A, B, AA, BA> {
    type Derived = Self;

    fn read_fn(&self) -> &ReadFn<H, (A, B)> {
        &self.read
    }
}

impl<H: 'static, A: Data, B: Data, AA, BA> ParameterizedAccess<H, (A, B)> for Tuple2Access<H, A, B, AA, BA> {}

impl<H, A, B, AA, BA> Clone for Tuple2Access<H, A, B, AA, BA> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            slots: PhantomData,
        }
    }
}

impl<H, A, B, AA, BA> fmt::Debug for Tuple2Access<H, A, B, AA, BA> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Tuple2Access").finish_non_exhaustive()
    }
}

/// Read-write access to a pair `(A, B)` whose slots are lenses of type `AL`
/// and `BL`.
///
/// Writing one slot rebuilds the pair around the untouched other slot.
///
/// # Examples
///
/// ```
/// use lenskit::access::AnyAccess;
/// use lenskit::containers::Tuple2Lens;
/// use lenskit::lens::{self, AnyLens};
/// use lenskit::primitives::{IntegerLens, StringLens};
///
/// type Entry = (String, i32);
///
/// let entry: Tuple2Lens<Entry, String, i32, StringLens<Entry>, IntegerLens<Entry>> = lens::identity();
///
/// let host = ("apples".to_string(), 3);
/// assert_eq!(entry.second().apply(&host), Some(3));
/// assert_eq!(entry.first().set(host, "pears".to_string()), Ok(("pears".to_string(), 3)));
/// ```
pub struct Tuple2Lens<H, A, B, AL, BL> {
    spec: LensSpec<H, (A, B)>,
    slots: PhantomData<fn() -> (AL, BL)>,
}

impl<H, A, B, AL, BL> Tuple2Lens<H, A, B, AL, BL>
where
    H: 'static,
    A: Data,
    B: Data,
    AL: AnyLens<H, A>,
    BL: AnyLens<H, B>,
{
    /// Wraps an existing spec.
    #[must_use]
    pub const fn of(spec: LensSpec<H, (A, B)>) -> Self {
        Self {
            spec,
            slots: PhantomData,
        }
    }

    /// Creates a null-safe lens for a pair that is always present.
    #[must_use]
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> (A, B) + Send + Sync + 'static,
        W: Fn(H, (A, B)) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of(read, write))
    }

    /// Creates a null-safe lens for a pair that may be absent.
    #[must_use]
    pub fn optional<R, W>(read: R, write: W) -> Self
    where
        R: Fn(&H) -> Option<(A, B)> + Send + Sync + 'static,
        W: Fn(H, (A, B)) -> H + Send + Sync + 'static,
    {
        Self::of(LensSpec::of_optional(read, write))
    }

    /// The first slot.
    pub fn first(&self) -> AL {
        self.create_sub_lens(
            |pair: &(A, B)| Some(pair.0.clone()),
            |(_, second): (A, B), first| Ok((first, second)),
        )
    }

    /// The second slot.
    pub fn second(&self) -> BL {
        self.create_sub_lens(
            |pair: &(A, B)| Some(pair.1.clone()),
            |(first, _): (A, B), second| Ok((first, second)),
        )
    }

    /// A read-only view of the pair with its slots exchanged.
    pub fn swapped(&self) -> Tuple2Access<H, B, A, BL::Derived, AL::Derived> {
        self.map_with(|(first, second): (A, B)| (second, first))
    }
}

impl<H, A, B, AL, BL> FromSpec<H, (A, B)> for Tuple2Lens<H, A, B, AL, BL> {
    fn from_spec(spec: LensSpec<H, (A, B)>) -> Self {
        Self {
            spec,
            slots: PhantomData,
        }
    }
}

impl<H, A, B, AL, BL> AnyAccess<H, (A, B)> for Tuple2Lens<H, A, B, AL, BL>
where
    H: 'static,
    A: Data,
    B: Data,
    AL: AnyAccess<H, A>,
    BL: AnyAccess<H, B>,
{
    type Derived = Tuple2Access<H, A, B, AL::Derived, BL::Derived>;

    fn read_fn(&self) -> &ReadFn<H, (A, B)> {
        self.spec.read_fn()
    }
}

impl<H, A, B, AL, BL> AnyLens<H, (A, B)> for Tuple2Lens<H, A, B, AL, BL>
where
    H: 'static,
    A: Data,
    B: Data,
    AL: AnyAccess<H, A>,
    BL: AnyAccess<H, B>,
{
    fn lens_spec(&self) -> &LensSpec<H, (A, B)> {
        &self.spec
    }
}

impl<H, A, B, AL, BL> ParameterizedAccess<H, (A, B)> for Tuple2Lens<H, A, B, AL, BL>
where
    H: 'static,
    A: Data,
    B: Data,
    AL: AnyAccess<H, A>,
    BL: AnyAccess<H, B>,
{
}

impl<H, A, B, AL, BL> ParameterizedLens<H, (A, B)> for Tuple2Lens<H, A, B, AL, BL>
where
    H: 'static,
    A: Data,
    B: Data,
    AL: AnyAccess<H, A>,
    BL: AnyAccess<H, B>,
{
}

impl<H, A, B, AL, BL> Clone for Tuple2Lens<H, A, B, AL, BL> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            slots: PhantomData,
        }
    }
}

impl<H, A, B, AL, BL> fmt::Debug for Tuple2Lens<H, A, B, AL, BL> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Tuple2Lens").field("spec", &self.spec).finish_non_exhaustive()
    }
}
