//! # lenskit
//!
//! Typed, composable accessors and lenses for immutable data.
//!
//! ## Overview
//!
//! An accessor reads a value out of a host; a lens also writes it back,
//! producing a rebuilt host. Both compose: a lens over a field of a field
//! is derived from the outer lens, and every derived accessor keeps the
//! concrete type of the value it focuses on, so type-specific operations
//! stay available at any depth.
//!
//! - **Specs**: [`spec::LensSpec`], the read/write pair and its null-safety
//!   policy
//! - **Accessors**: read-only views ([`access`]) with defaults, predicates
//!   and mapping
//! - **Lenses**: read-write views ([`lens`]) with setters and deferred
//!   [`lens::Change`]s
//! - **Composition**: [`compose`] and [`parameterized`], the machinery
//!   every derived accessor goes through
//! - **Primitives**: string, number and boolean accessors ([`primitives`])
//! - **Containers**: sequences, maps, pairs, `Option` and `Result`
//!   (`containers`)
//!
//! Reads never fail: an absent host or an absent intermediate value reads
//! as `None`. Writes return `Result<H, AccessError>`; a null-safe lens
//! leaves the host unchanged where a null-unsafe one reports the absence.
//!
//! ## Feature Flags
//!
//! - `control`: `Memoized`, a thread-safe compute-once cell
//! - `containers`: container adapters (requires `control`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lenskit::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Address { city: String }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct User { name: String, address: Address }
//!
//! let address: ObjectLens<User, Address> =
//!     ObjectLens::new(|user: &User| user.address.clone(), |user: User, address| User { address, ..user });
//! let city: StringLens<User> =
//!     address.field(|address: &Address| address.city.clone(), |_, city| Address { city });
//!
//! let user = User { name: "Ann".to_string(), address: Address { city: "Oslo".to_string() } };
//!
//! assert_eq!(city.to_upper_case().apply(&user), Some("OSLO".to_string()));
//! assert_eq!(city.set(user, "Bergen".to_string()).map(|user| user.address.city), Ok("Bergen".to_string()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Element readers spell out their closure argument types for inference.
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the accessor and lens types together with the capability
/// traits their methods live on.
///
/// # Usage
///
/// ```rust
/// use lenskit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::access::{AnyAccess, FromRead, ObjectAccess, ThrowingAccess};
    pub use crate::error::AccessError;
    pub use crate::lens::{AnyLens, Change, FromSpec, ObjectLens};
    pub use crate::parameterized::{ParameterizedAccess, ParameterizedLens};
    pub use crate::primitives::*;
    pub use crate::spec::{Data, LensSpec};

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "containers")]
    pub use crate::containers::*;
}

pub mod access;
pub mod compose;
pub mod error;
pub mod lens;
pub mod parameterized;
pub mod primitives;
pub mod spec;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "containers")]
pub mod containers;

pub use error::AccessError;
