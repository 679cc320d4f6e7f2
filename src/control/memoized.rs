//! Thread-safe memoization of a one-shot computation.
//!
//! [`Memoized`] defers a computation until the value is first needed and
//! then caches it. Reads after initialization are lock-free; the
//! initializer itself runs under a lock so that it runs at most once, even
//! when several threads race to force the value.
//!
//! # Poisoning
//!
//! If the initializer panics, the value is poisoned: [`Memoized::force`]
//! panics on every later call and [`Memoized::try_force`] returns
//! [`MemoizedPoisonedError`].
//!
//! # Examples
//!
//! ```rust
//! use lenskit::control::Memoized;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let memoized = Arc::new(Memoized::new(|| (1..=10).sum::<i32>()));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let memoized = Arc::clone(&memoized);
//!         thread::spawn(move || *memoized.force())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), 55);
//! }
//! ```

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use thiserror::Error;

type Initializer<T> = Box<dyn FnOnce() -> T + Send>;

/// Returned by [`Memoized::try_force`] once the initializer has panicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Memoized: initializer panicked; the value is poisoned")]
pub struct MemoizedPoisonedError;

/// A value computed at most once, on first access.
///
/// # Thread Safety
///
/// `Memoized<T>` is `Send + Sync` whenever `T` is. The initializer must be
/// `Send` because whichever thread forces first runs it.
pub struct Memoized<T> {
    value: OnceLock<T>,
    initializer: Mutex<Option<Initializer<T>>>,
    poisoned: AtomicBool,
}

impl<T> Memoized<T> {
    /// Creates a memoized value from its initializer. Nothing runs yet.
    pub fn new<F>(initializer: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self {
            value: OnceLock::new(),
            initializer: Mutex::new(Some(Box::new(initializer))),
            poisoned: AtomicBool::new(false),
        }
    }

    /// Creates an already-computed value.
    pub fn ready(value: T) -> Self {
        Self {
            value: OnceLock::from(value),
            initializer: Mutex::new(None),
            poisoned: AtomicBool::new(false),
        }
    }

    /// Returns the value, computing it on first call.
    ///
    /// # Panics
    ///
    /// - If the initializer panics; the panic is propagated after the value
    ///   is marked poisoned.
    /// - If the value was poisoned by an earlier call.
    pub fn force(&self) -> &T {
        match self.try_force() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    /// Returns the value, computing it on first call, or an error if the
    /// value is poisoned.
    ///
    /// # Errors
    ///
    /// [`MemoizedPoisonedError`] if an earlier initialization panicked.
    ///
    /// # Panics
    ///
    /// If the initializer panics during this call.
    pub fn try_force(&self) -> Result<&T, MemoizedPoisonedError> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let mut slot = self.initializer.lock();
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let Some(initializer) = slot.take() else {
            return Err(MemoizedPoisonedError);
        };

        tracing::trace!("materializing memoized value");
        match catch_unwind(AssertUnwindSafe(initializer)) {
            Ok(value) => Ok(self.value.get_or_init(|| value)),
            Err(payload) => {
                self.poisoned.store(true, Ordering::Release);
                tracing::debug!("memoized initializer panicked; value poisoned");
                drop(slot);
                resume_unwind(payload)
            }
        }
    }

    /// Returns the value if it has been computed.
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Returns `true` once the value has been computed.
    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }

    /// Returns `true` if the initializer panicked.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.load(Ordering::Acquire)
    }

    /// Consumes the memoized value and returns the computed value.
    ///
    /// # Errors
    ///
    /// [`MemoizedPoisonedError`] if an earlier initialization panicked.
    pub fn into_inner(self) -> Result<T, MemoizedPoisonedError> {
        if let Some(value) = self.value.into_inner() {
            return Ok(value);
        }
        self.initializer
            .into_inner()
            .map(|initializer| initializer())
            .ok_or(MemoizedPoisonedError)
    }
}

impl<T: fmt::Debug> fmt::Debug for Memoized<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => formatter.debug_tuple("Memoized").field(value).finish(),
            None if self.is_poisoned() => formatter.debug_tuple("Memoized").field(&"<poisoned>").finish(),
            None => formatter.debug_tuple("Memoized").field(&"<pending>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    #[rstest]
    fn test_nothing_runs_before_force() {
        let memoized = Memoized::new(|| 1);
        assert!(!memoized.is_initialized());
        assert_eq!(memoized.get(), None);
    }

    #[rstest]
    fn test_force_caches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memoized = Memoized::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            7
        });

        assert_eq!(*memoized.force(), 7);
        assert_eq!(*memoized.force(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_ready_is_initialized() {
        let memoized = Memoized::ready("x".to_string());
        assert!(memoized.is_initialized());
        assert_eq!(memoized.into_inner(), Ok("x".to_string()));
    }

    #[rstest]
    fn test_into_inner_runs_pending_initializer() {
        let memoized = Memoized::new(|| vec![1, 2]);
        assert_eq!(memoized.into_inner(), Ok(vec![1, 2]));
    }

    #[rstest]
    fn test_concurrent_force_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memoized = Arc::new(Memoized::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::yield_now();
            42
        }));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let memoized = Arc::clone(&memoized);
                thread::spawn(move || *memoized.force())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn test_panicking_initializer_poisons() {
        let memoized: Memoized<i32> = Memoized::new(|| panic!("boom"));
        let outcome = catch_unwind(AssertUnwindSafe(|| *memoized.force()));

        assert!(outcome.is_err());
        assert!(memoized.is_poisoned());
        assert_eq!(memoized.try_force(), Err(MemoizedPoisonedError));
        assert_eq!(format!("{memoized:?}"), "Memoized(\"<poisoned>\")");
    }

    static_assertions::assert_impl_all!(Memoized<Vec<String>>: Send, Sync);
}
