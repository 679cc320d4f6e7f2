use std::fmt;

use crate::access::AnyAccess;
use crate::lens::{AnyLens, Change};
use crate::primitives::BooleanAccess;
use crate::spec::Data;

/// Numeric value kinds an accessor can do arithmetic on.
///
/// Arithmetic saturates for integers so that an accessor never panics on
/// overflow; floating point follows IEEE semantics.
pub trait Numeric: Data + Copy + PartialOrd + fmt::Display {
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;

    /// `self + other`, clamped at the type bounds.
    #[must_use]
    fn add_saturating(self, other: Self) -> Self;

    /// `self - other`, clamped at the type bounds.
    #[must_use]
    fn sub_saturating(self, other: Self) -> Self;

    /// `self * other`, clamped at the type bounds.
    #[must_use]
    fn mul_saturating(self, other: Self) -> Self;
}

macro_rules! impl_numeric_for_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                fn add_saturating(self, other: Self) -> Self {
                    self.saturating_add(other)
                }

                fn sub_saturating(self, other: Self) -> Self {
                    self.saturating_sub(other)
                }

                fn mul_saturating(self, other: Self) -> Self {
                    self.saturating_mul(other)
                }
            }
        )*
    };
}

macro_rules! impl_numeric_for_floats {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                fn add_saturating(self, other: Self) -> Self {
                    self + other
                }

                fn sub_saturating(self, other: Self) -> Self {
                    self - other
                }

                fn mul_saturating(self, other: Self) -> Self {
                    self * other
                }
            }
        )*
    };
}

impl_numeric_for_integers!(i32, i64, u32, u64, usize);
impl_numeric_for_floats!(f32, f64);

define_primitive! {
    /// Focuses on a number.
    Number [N: Numeric] => N
}

macro_rules! define_numeric_aliases {
    ($($name:ident => $ty:ty),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Focuses on an `", stringify!($ty), "`.")]
                pub type [<$name Access>]<H> = NumberAccess<H, $ty>;

                #[doc = concat!("Reads and writes an `", stringify!($ty), "`.")]
                pub type [<$name Lens>]<H> = NumberLens<H, $ty>;
            )*
        }
    };
}

define_numeric_aliases!(Integer => i32, Long => i64, Double => f64, Size => usize);

/// Arithmetic and comparisons on a focused number.
pub trait AnyNumberAccess<H: 'static, N: Numeric>: AnyAccess<H, N> {
    /// Adds `amount` to the focused value.
    fn plus(&self, amount: N) -> Self::Derived {
        self.map_with(move |value: N| value.add_saturating(amount))
    }

    /// Subtracts `amount` from the focused value.
    fn minus(&self, amount: N) -> Self::Derived {
        self.map_with(move |value: N| value.sub_saturating(amount))
    }

    /// Multiplies the focused value by `factor`.
    fn times(&self, factor: N) -> Self::Derived {
        self.map_with(move |value: N| value.mul_saturating(factor))
    }

    /// Tests `value > bound`.
    fn that_is_greater_than(&self, bound: N) -> BooleanAccess<H> {
        self.that(move |value| *value > bound)
    }

    /// Tests `value < bound`.
    fn that_is_less_than(&self, bound: N) -> BooleanAccess<H> {
        self.that(move |value| *value < bound)
    }

    /// Tests `value == 0`.
    fn that_is_zero(&self) -> BooleanAccess<H> {
        self.that(|value| *value == N::ZERO)
    }

    /// Tests `value > 0`.
    fn that_is_positive(&self) -> BooleanAccess<H> {
        self.that_is_greater_than(N::ZERO)
    }

    /// Tests `value < 0`.
    fn that_is_negative(&self) -> BooleanAccess<H> {
        self.that_is_less_than(N::ZERO)
    }
}

impl<H: 'static, N: Numeric> AnyNumberAccess<H, N> for NumberAccess<H, N> {}
impl<H: 'static, N: Numeric> AnyNumberAccess<H, N> for NumberLens<H, N> {}

impl<H: 'static, N: Numeric> NumberLens<H, N> {
    /// A change adding one. An absent value counts as zero.
    #[must_use]
    pub fn increment(&self) -> Change<H> {
        self.add(N::ONE)
    }

    /// A change subtracting one. An absent value counts as zero.
    #[must_use]
    pub fn decrement(&self) -> Change<H> {
        self.change_by(|value: Option<N>| value.unwrap_or(N::ZERO).sub_saturating(N::ONE))
    }

    /// A change adding `amount`. An absent value counts as zero.
    #[must_use]
    pub fn add(&self, amount: N) -> Change<H> {
        self.change_by(move |value: Option<N>| value.unwrap_or(N::ZERO).add_saturating(amount))
    }
}
