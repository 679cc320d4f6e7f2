//! Accessors and lenses specialised for strings, numbers and booleans.
//!
//! Each value kind comes as a pair: an accessor (`StringAccess`) and a lens
//! (`StringLens`). Builders called on either return the accessor, so
//! `lens.to_upper_case().length()` keeps offering typed operations all the
//! way down.
//!
//! # Examples
//!
//! ```
//! use lenskit::access::AnyAccess;
//! use lenskit::lens::AnyLens;
//! use lenskit::primitives::{AnyNumberAccess, AnyStringAccess, IntegerLens, StringAccess};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Player { name: String, score: i32 }
//!
//! let name = StringAccess::of(|player: &Player| player.name.clone());
//! let score = IntegerLens::new(|player: &Player| player.score, |player: Player, score| Player { score, ..player });
//!
//! let player = Player { name: " Bo ".to_string(), score: 9 };
//! assert_eq!(name.trim().length().apply(&player), Some(2));
//! assert_eq!(score.plus(1).that_is_greater_than(9).apply(&player), Some(true));
//! assert_eq!(score.increment().apply(player).map(|player| player.score), Ok(10));
//! ```

/// Generates the accessor/lens pair for one value kind.
///
/// `Name [Params] => Value` expands to `NameAccess<H, Params..>` and
/// `NameLens<H, Params..>` with their constructors and the capability
/// trait impls. The lens derives the accessor.
macro_rules! define_primitive {
    (
        $(#[$meta:meta])*
        $name:ident [$($param:ident: $bound:ident),*] => $value:ty
    ) => {
        paste::paste! {
            $(#[$meta])*
            #[doc = ""]
            #[doc = "Read-only variant."]
            pub struct [<$name Access>]<H $(, $param)*> {
                read: $crate::spec::ReadFn<H, $value>,
            }

            impl<H: 'static $(, $param: $bound)*> [<$name Access>]<H $(, $param)*> {
                /// Creates an accessor for a value that is always present.
                #[must_use]
                pub fn of<F>(read: F) -> Self
                where
                    F: Fn(&H) -> $value + Send + Sync + 'static,
                {
                    <Self as $crate::access::FromRead<H, $value>>::from_read(
                        $crate::spec::host_reader(move |host: &H| Some(read(host))),
                    )
                }

                /// Creates an accessor for a value that may be absent.
                #[must_use]
                pub fn of_optional<F>(read: F) -> Self
                where
                    F: Fn(&H) -> Option<$value> + Send + Sync + 'static,
                {
                    <Self as $crate::access::FromRead<H, $value>>::from_read(
                        $crate::spec::host_reader(read),
                    )
                }
            }

            impl<H $(, $param)*> $crate::access::FromRead<H, $value> for [<$name Access>]<H $(, $param)*> {
                fn from_read(read: $crate::spec::ReadFn<H, $value>) -> Self {
                    Self { read }
                }
            }

            impl<H: 'static $(, $param: $bound)*> $crate::access::AnyAccess<H, $value> for [<$name Access>]<H $(, $param)*> {
                type Derived = Self;

                fn read_fn(&self) -> &$crate::spec::ReadFn<H, $value> {
                    &self.read
                }
            }

            impl<H $(, $param)*> Clone for [<$name Access>]<H $(, $param)*> {
                fn clone(&self) -> Self {
                    Self {
                        read: std::sync::Arc::clone(&self.read),
                    }
                }
            }

            impl<H $(, $param)*> std::fmt::Debug for [<$name Access>]<H $(, $param)*> {
                fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    formatter.debug_struct(stringify!([<$name Access>])).finish_non_exhaustive()
                }
            }

            $(#[$meta])*
            #[doc = ""]
            #[doc = "Read-write variant."]
            pub struct [<$name Lens>]<H $(, $param)*> {
                spec: $crate::spec::LensSpec<H, $value>,
            }

            impl<H: 'static $(, $param: $bound)*> [<$name Lens>]<H $(, $param)*> {
                /// Wraps an existing spec.
                #[must_use]
                pub const fn of(spec: $crate::spec::LensSpec<H, $value>) -> Self {
                    Self { spec }
                }

                /// Creates a null-safe lens for a field that is always present.
                #[must_use]
                pub fn new<R, W>(read: R, write: W) -> Self
                where
                    R: Fn(&H) -> $value + Send + Sync + 'static,
                    W: Fn(H, $value) -> H + Send + Sync + 'static,
                {
                    Self::of($crate::spec::LensSpec::of(read, write))
                }

                /// Creates a null-safe lens for a field that may be absent.
                #[must_use]
                pub fn optional<R, W>(read: R, write: W) -> Self
                where
                    R: Fn(&H) -> Option<$value> + Send + Sync + 'static,
                    W: Fn(H, $value) -> H + Send + Sync + 'static,
                {
                    Self::of($crate::spec::LensSpec::of_optional(read, write))
                }
            }

            impl<H $(, $param)*> $crate::lens::FromSpec<H, $value> for [<$name Lens>]<H $(, $param)*> {
                fn from_spec(spec: $crate::spec::LensSpec<H, $value>) -> Self {
                    Self { spec }
                }
            }

            impl<H: 'static $(, $param: $bound)*> $crate::access::AnyAccess<H, $value> for [<$name Lens>]<H $(, $param)*> {
                type Derived = [<$name Access>]<H $(, $param)*>;

                fn read_fn(&self) -> &$crate::spec::ReadFn<H, $value> {
                    self.spec.read_fn()
                }
            }

            impl<H: 'static $(, $param: $bound)*> $crate::lens::AnyLens<H, $value> for [<$name Lens>]<H $(, $param)*> {
                fn lens_spec(&self) -> &$crate::spec::LensSpec<H, $value> {
                    &self.spec
                }
            }

            impl<H $(, $param)*> Clone for [<$name Lens>]<H $(, $param)*> {
                fn clone(&self) -> Self {
                    Self {
                        spec: self.spec.clone(),
                    }
                }
            }

            impl<H $(, $param)*> std::fmt::Debug for [<$name Lens>]<H $(, $param)*> {
                fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    formatter
                        .debug_struct(stringify!([<$name Lens>]))
                        .field("spec", &self.spec)
                        .finish()
                }
            }
        }
    };
}

mod boolean;
mod number;
mod string;

pub use boolean::AnyBooleanAccess;
pub use boolean::BooleanAccess;
pub use boolean::BooleanLens;
pub use number::AnyNumberAccess;
pub use number::DoubleAccess;
pub use number::DoubleLens;
pub use number::IntegerAccess;
pub use number::IntegerLens;
pub use number::LongAccess;
pub use number::LongLens;
pub use number::NumberAccess;
pub use number::NumberLens;
pub use number::Numeric;
pub use number::SizeAccess;
pub use number::SizeLens;
pub use string::AnyStringAccess;
pub use string::StringAccess;
pub use string::StringLens;
