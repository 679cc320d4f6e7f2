//! Read-only accessors.
//!
//! An accessor is a shareable function from a host to an optional value.
//! [`AnyAccess`] is the capability every accessor and every lens exposes;
//! [`FromRead`] is the factory that lets a builder return the concrete
//! accessor type it started from, so that a string accessor turned to upper
//! case still offers string operations afterwards.
//!
//! # Examples
//!
//! ```
//! use lenskit::access::{AnyAccess, ObjectAccess};
//! use lenskit::primitives::{AnyStringAccess, StringAccess};
//!
//! #[derive(Clone)]
//! struct Person { name: String, nickname: Option<String> }
//!
//! let nickname: StringAccess<Person> = StringAccess::of_optional(|person: &Person| person.nickname.clone());
//! let display = nickname.or_default_to("anonymous".to_string()).to_upper_case();
//!
//! let person = Person { name: "Ann".to_string(), nickname: None };
//! assert_eq!(display.apply(&person), Some("ANONYMOUS".to_string()));
//! assert_eq!(display.length().apply(&person), Some(9));
//!
//! let name = ObjectAccess::of(|person: &Person| person.name.clone());
//! assert_eq!(name.apply_nullable(None), None);
//! ```

mod any;
mod object;
mod throwing;

pub use any::AnyAccess;
pub use any::FromRead;
pub use object::ObjectAccess;
pub use object::identity;
pub use throwing::ThrowingAccess;
