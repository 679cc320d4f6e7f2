//! Read-write accessors ("lenses").
//!
//! A lens owns a [`LensSpec`](crate::spec::LensSpec) and adds writes on top
//! of the read capability of [`AnyAccess`](crate::access::AnyAccess). Writes
//! never mutate: they consume the host and return a rebuilt one.
//!
//! # Laws
//!
//! Every lens must satisfy three laws for any present host:
//!
//! 1. **`PutGet`**: `lens.apply(&lens.set(host, value)?) == Some(value)`
//! 2. **`GetPut`**: if `lens.apply(&host) == Some(value)` then
//!    `lens.set(host.clone(), value)? == host`
//! 3. **`PutPut`**: `lens.set(lens.set(host, v1)?, v2) == lens.set(host, v2)`
//!
//! # Examples
//!
//! ```
//! use lenskit::access::AnyAccess;
//! use lenskit::lens::{AnyLens, ObjectLens};
//! use lenskit::primitives::StringLens;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Address { city: String }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Person { name: String, address: Address }
//!
//! let address = ObjectLens::new(|person: &Person| person.address.clone(), |person: Person, address| Person { address, ..person });
//! let city: StringLens<Person> = address.field(|address: &Address| address.city.clone(), |_, city| Address { city });
//!
//! let ann = Person { name: "Ann".to_string(), address: Address { city: "Oslo".to_string() } };
//! assert_eq!(city.apply(&ann), Some("Oslo".to_string()));
//!
//! let moved = city.set(ann, "Lima".to_string()).unwrap();
//! assert_eq!(moved.address.city, "Lima");
//! assert_eq!(moved.name, "Ann");
//! ```

mod any;
mod change;
mod object;

pub use any::AnyLens;
pub use any::FromSpec;
pub use change::Change;
pub use object::ObjectLens;
pub use object::identity;
