//! Control structures shared by the container adapters.
//!
//! - [`Memoized`]: a thread-safe value computed at most once, on first access

mod memoized;

pub use memoized::{Memoized, MemoizedPoisonedError};
