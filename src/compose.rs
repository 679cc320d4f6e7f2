//! The composition core.
//!
//! Every sub-accessor in this crate, whether a user field, a tuple slot, a
//! list element, a map value or the content of an `Option`, is produced by
//! the functions in this module.
//!
//! Given a parent reaching `A` from `H` and a child pair reaching `B` from
//! `A`, [`derive_sub_lens`] produces a spec reaching `B` from `H`:
//!
//! ```text
//! read(h)     = parent.read(h)?.then(sub_read)
//! write(h, b) = match parent.read(&h) {
//!                   Some(a)                 => parent.write(h, sub_write(a, b)?)
//!                   None if parent.null_safe => Ok(h)
//!                   None                     => Err(NullValue)
//!               }
//! ```
//!
//! The write re-reads the intermediate value from the original host and
//! rebuilds every ancestor from the top down: hosts are immutable, so there
//! is nothing to patch in place.

use std::sync::Arc;

use crate::access::FromRead;
use crate::error::AccessError;
use crate::lens::FromSpec;
use crate::spec::{Data, LensSpec, ReadFn, WriteFn, reader, writer};

/// Reads through `parent`, then through `sub_read`.
///
/// The child read is skipped when the parent value is absent.
pub fn derive_sub_read<H, A, B, R>(parent: &ReadFn<H, A>, sub_read: R) -> ReadFn<H, B>
where
    H: 'static,
    A: 'static,
    R: Fn(&A) -> Option<B> + Send + Sync + 'static,
{
    let parent = Arc::clone(parent);
    reader(move |host: Option<&H>| parent(host).and_then(|value| sub_read(&value)))
}

/// Like [`derive_sub_read`], but yields `default` when the parent value is
/// absent.
pub fn derive_sub_read_or<H, A, B, R>(parent: &ReadFn<H, A>, sub_read: R, default: B) -> ReadFn<H, B>
where
    H: 'static,
    A: 'static,
    B: Data,
    R: Fn(&A) -> Option<B> + Send + Sync + 'static,
{
    let parent = Arc::clone(parent);
    reader(move |host: Option<&H>| {
        parent(host).map_or_else(|| Some(default.clone()), |value| sub_read(&value))
    })
}

/// Chains two read functions.
pub fn compose_reads<H, A, B>(outer: &ReadFn<H, A>, inner: &ReadFn<A, B>) -> ReadFn<H, B>
where
    H: 'static,
    A: 'static,
    B: 'static,
{
    let inner = Arc::clone(inner);
    derive_sub_read(outer, move |value: &A| inner(Some(value)))
}

/// Derives a spec reaching `B` from `H` out of a parent spec and a child
/// read/write pair.
///
/// The result is null-safe only when both the parent and `null_safe` are.
///
/// # Examples
///
/// ```
/// use lenskit::compose::derive_sub_lens;
/// use lenskit::spec::LensSpec;
///
/// let root = LensSpec::<(i32, String), (i32, String)>::identity();
/// let name = derive_sub_lens(
///     &root,
///     |pair: &(i32, String)| Some(pair.1.clone()),
///     |pair: (i32, String), name: String| Ok((pair.0, name)),
///     true,
/// );
///
/// assert_eq!(name.read(&(1, "a".to_string())), Some("a".to_string()));
/// assert_eq!(name.write((1, "a".to_string()), "b".to_string()), Ok((1, "b".to_string())));
/// ```
pub fn derive_sub_lens<H, A, B, R, W>(
    parent: &LensSpec<H, A>,
    sub_read: R,
    sub_write: W,
    null_safe: bool,
) -> LensSpec<H, B>
where
    H: 'static,
    A: 'static,
    B: 'static,
    R: Fn(&A) -> Option<B> + Send + Sync + 'static,
    W: Fn(A, B) -> Result<A, AccessError> + Send + Sync + 'static,
{
    let parent_null_safe = parent.is_null_safe();
    let read = derive_sub_read(parent.read_fn(), sub_read);
    let write = derive_sub_write(parent, sub_write);
    LensSpec::from_parts(read, write, parent_null_safe && null_safe)
}

fn derive_sub_write<H, A, B, W>(parent: &LensSpec<H, A>, sub_write: W) -> WriteFn<H, B>
where
    H: 'static,
    A: 'static,
    B: 'static,
    W: Fn(A, B) -> Result<A, AccessError> + Send + Sync + 'static,
{
    let parent_null_safe = parent.is_null_safe();
    let parent_read = Arc::clone(parent.read_fn());
    let parent_write = Arc::clone(parent.write_fn());
    writer(move |host: H, value: B| match parent_read(Some(&host)) {
        Some(current) => {
            let updated = sub_write(current, value)?;
            parent_write(host, updated)
        }
        None if parent_null_safe => {
            tracing::trace!("absent intermediate value; null-safe write leaves the host unchanged");
            Ok(host)
        }
        None => Err(AccessError::NullValue),
    })
}

/// Composes two specs end to end.
pub fn compose_specs<H, A, B>(outer: &LensSpec<H, A>, inner: &LensSpec<A, B>) -> LensSpec<H, B>
where
    H: 'static,
    A: 'static,
    B: 'static,
{
    let inner_read = Arc::clone(inner.read_fn());
    let inner_write = Arc::clone(inner.write_fn());
    derive_sub_lens(
        outer,
        move |value: &A| inner_read(Some(value)),
        move |value: A, data: B| inner_write(value, data),
        inner.is_null_safe(),
    )
}

/// Builds a typed sub-accessor from a parent read and an element-reaching
/// function.
pub fn create_sub_access<H, A, B, TA, R>(parent: &ReadFn<H, A>, sub_read: R) -> TA
where
    H: 'static,
    A: 'static,
    TA: FromRead<H, B>,
    R: Fn(&A) -> Option<B> + Send + Sync + 'static,
{
    TA::from_read(derive_sub_read(parent, sub_read))
}

/// Builds a typed sub-lens from a parent spec and a child read/write pair.
///
/// The sub-lens inherits the parent's null-safety.
pub fn create_sub_lens<H, A, B, TL, R, W>(parent: &LensSpec<H, A>, sub_read: R, sub_write: W) -> TL
where
    H: 'static,
    A: 'static,
    B: 'static,
    TL: FromSpec<H, B>,
    R: Fn(&A) -> Option<B> + Send + Sync + 'static,
    W: Fn(A, B) -> Result<A, AccessError> + Send + Sync + 'static,
{
    TL::from_spec(derive_sub_lens(parent, sub_read, sub_write, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::host_reader;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Inner {
        value: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Middle {
        inner: Option<Inner>,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Outer {
        middle: Middle,
    }

    fn middle() -> LensSpec<Outer, Middle> {
        LensSpec::of(|outer: &Outer| outer.middle.clone(), |_, middle| Outer { middle })
    }

    fn inner() -> LensSpec<Middle, Inner> {
        LensSpec::of_optional(
            |middle: &Middle| middle.inner.clone(),
            |_, inner| Middle { inner: Some(inner) },
        )
    }

    fn value() -> LensSpec<Inner, i32> {
        LensSpec::of(|inner: &Inner| inner.value, |_, value| Inner { value })
    }

    fn present() -> Outer {
        Outer {
            middle: Middle {
                inner: Some(Inner { value: 1 }),
            },
        }
    }

    fn missing() -> Outer {
        Outer {
            middle: Middle { inner: None },
        }
    }

    #[rstest]
    fn test_composed_read_reaches_leaf() {
        let spec = middle().then(&inner()).then(&value());
        assert_eq!(spec.read(&present()), Some(1));
    }

    #[rstest]
    fn test_composed_read_skips_absent_intermediate() {
        let spec = middle().then(&inner()).then(&value());
        assert_eq!(spec.read(&missing()), None);
    }

    #[rstest]
    fn test_composed_write_rebuilds_path() {
        let spec = middle().then(&inner()).then(&value());
        let written = spec.write(present(), 5);
        assert_eq!(written.map(|outer| outer.middle.inner), Ok(Some(Inner { value: 5 })));
    }

    #[rstest]
    fn test_null_safe_write_through_absent_intermediate_is_noop() {
        let spec = middle().then(&inner()).then(&value());
        assert_eq!(spec.write(missing(), 5), Ok(missing()));
    }

    #[rstest]
    fn test_null_unsafe_write_through_absent_intermediate_fails() {
        let spec = middle().then(&inner().to_null_unsafe()).then(&value());
        assert_eq!(spec.write(missing(), 5), Err(AccessError::NullValue));
    }

    #[rstest]
    fn test_sub_lens_cannot_be_safer_than_parent() {
        let parent = middle().to_null_unsafe();
        let derived = derive_sub_lens(
            &parent,
            |middle: &Middle| middle.inner.clone(),
            |_, inner: Inner| Ok(Middle { inner: Some(inner) }),
            true,
        );
        assert!(!derived.is_null_safe());
    }

    #[rstest]
    fn test_sub_lens_respects_caller_intent() {
        let derived = derive_sub_lens(
            &middle(),
            |middle: &Middle| middle.inner.clone(),
            |_, inner: Inner| Ok(Middle { inner: Some(inner) }),
            false,
        );
        assert!(!derived.is_null_safe());
    }

    #[rstest]
    fn test_derive_sub_read_or_defaults_on_absent_parent() {
        let parent: ReadFn<Middle, Inner> = host_reader(|middle: &Middle| middle.inner.clone());
        let read = derive_sub_read_or(&parent, |inner: &Inner| Some(inner.value), -1);

        assert_eq!(read(Some(&Middle { inner: None })), Some(-1));
        assert_eq!(read(None), Some(-1));
        assert_eq!(read(Some(&Middle { inner: Some(Inner { value: 3 }) })), Some(3));
    }

    #[rstest]
    fn test_compose_reads() {
        let outer = Arc::clone(middle().read_fn());
        let inner_read = Arc::clone(inner().read_fn());
        let read = compose_reads(&outer, &inner_read);
        assert_eq!(read(Some(&present())), Some(Inner { value: 1 }));
        assert_eq!(read(None), None);
    }
}
