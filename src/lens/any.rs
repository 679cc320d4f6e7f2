//! The write capability shared by every lens.

use crate::access::AnyAccess;
use crate::compose;
use crate::error::AccessError;
use crate::lens::Change;
use crate::spec::{Data, LensSpec};

/// Builds a concrete lens from a spec.
///
/// Parameterized lenses use this factory to manufacture element lenses of
/// the right concrete type, and self-typed builders such as
/// [`AnyLens::to_null_safe`] use it to rebuild themselves.
pub trait FromSpec<H, D>: Sized {
    /// Wraps `spec` into the implementing lens type.
    fn from_spec(spec: LensSpec<H, D>) -> Self;
}

/// Read and write access from a host `H` to a value `D`.
///
/// Writes consume the host and return the rebuilt one. Every "change"
/// builder returns a [`Change`], a host-to-host function that can be applied
/// later or chained with other changes.
pub trait AnyLens<H: 'static, D: Data>: AnyAccess<H, D> + FromSpec<H, D> {
    /// The spec backing this lens.
    fn lens_spec(&self) -> &LensSpec<H, D>;

    /// Builds a lens of the same concrete type from `spec`.
    fn new_lens(spec: LensSpec<H, D>) -> Self {
        Self::from_spec(spec)
    }

    /// Writes `data` into `host`.
    ///
    /// # Errors
    ///
    /// Whatever the underlying write reports, for example
    /// [`AccessError::IndexOutOfBounds`] for a sequence element.
    fn set(&self, host: H, data: D) -> Result<H, AccessError> {
        self.lens_spec().write(host, data)
    }

    /// Writes `data` into a possibly absent host.
    ///
    /// # Errors
    ///
    /// [`AccessError::NullHost`] when the host is absent and the lens is not
    /// null-safe, otherwise the errors of [`AnyLens::set`].
    fn set_nullable(&self, host: Option<H>, data: D) -> Result<Option<H>, AccessError> {
        self.lens_spec().write_nullable(host, data)
    }

    /// Replaces the focused value with `updater(current)`.
    ///
    /// # Errors
    ///
    /// The errors of [`AnyLens::set`].
    fn update<F>(&self, host: H, updater: F) -> Result<H, AccessError>
    where
        F: FnOnce(Option<D>) -> D,
    {
        let current = self.apply(&host);
        self.set(host, updater(current))
    }

    /// A change writing `data`.
    fn change_to(&self, data: D) -> Change<H> {
        let spec = self.lens_spec().clone();
        Change::with_null_safety(move |host| spec.write(host, data.clone()), self.is_null_safe())
    }

    /// A change writing whatever `supplier` produces at application time.
    fn change_to_from<F>(&self, supplier: F) -> Change<H>
    where
        F: Fn() -> D + Send + Sync + 'static,
    {
        let spec = self.lens_spec().clone();
        Change::with_null_safety(move |host| spec.write(host, supplier()), self.is_null_safe())
    }

    /// A change writing `transform(current)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenskit::lens::{AnyLens, ObjectLens};
    ///
    /// let counter = ObjectLens::new(|pair: &(String, u32)| pair.1, |pair: (String, u32), count| (pair.0, count));
    /// let bump = counter.change_by(|count| count.unwrap_or(0) + 1);
    ///
    /// assert_eq!(bump.apply(("a".to_string(), 1)), Ok(("a".to_string(), 2)));
    /// ```
    fn change_by<F>(&self, transform: F) -> Change<H>
    where
        F: Fn(Option<D>) -> D + Send + Sync + 'static,
    {
        let spec = self.lens_spec().clone();
        Change::with_null_safety(
            move |host: H| {
                let next = transform(spec.read(&host));
                spec.write(host, next)
            },
            self.is_null_safe(),
        )
    }

    /// A change writing `transform(host, current)`.
    fn change_by_host<F>(&self, transform: F) -> Change<H>
    where
        F: Fn(&H, Option<D>) -> D + Send + Sync + 'static,
    {
        let spec = self.lens_spec().clone();
        Change::with_null_safety(
            move |host: H| {
                let next = transform(&host, spec.read(&host));
                spec.write(host, next)
            },
            self.is_null_safe(),
        )
    }

    /// Returns `true` when writes through an absent host are tolerated.
    fn is_null_safe(&self) -> bool {
        self.lens_spec().is_null_safe()
    }

    /// The same lens, tolerating writes through absent hosts.
    fn to_null_safe(&self) -> Self {
        Self::new_lens(self.lens_spec().to_null_safe())
    }

    /// The same lens, rejecting writes through absent hosts.
    fn to_null_unsafe(&self) -> Self {
        Self::new_lens(self.lens_spec().to_null_unsafe())
    }

    /// Derives a lens for an always-present field of the focused value.
    fn field<B, L, R, W>(&self, read: R, write: W) -> L
    where
        B: Data,
        L: FromSpec<H, B>,
        R: Fn(&D) -> B + Send + Sync + 'static,
        W: Fn(D, B) -> D + Send + Sync + 'static,
    {
        compose::create_sub_lens(
            self.lens_spec(),
            move |value: &D| Some(read(value)),
            move |value: D, data: B| Ok(write(value, data)),
        )
    }

    /// Derives a lens for a field of the focused value that may be absent.
    fn optional_field<B, L, R, W>(&self, read: R, write: W) -> L
    where
        B: Data,
        L: FromSpec<H, B>,
        R: Fn(&D) -> Option<B> + Send + Sync + 'static,
        W: Fn(D, B) -> D + Send + Sync + 'static,
    {
        compose::create_sub_lens(self.lens_spec(), read, move |value: D, data: B| {
            Ok(write(value, data))
        })
    }

    /// Derives a sub-lens from an arbitrary read/write pair over the focused
    /// value. The write may reject the new value.
    fn create_sub_lens<B, L, R, W>(&self, read: R, write: W) -> L
    where
        B: Data,
        L: FromSpec<H, B>,
        R: Fn(&D) -> Option<B> + Send + Sync + 'static,
        W: Fn(D, B) -> Result<D, AccessError> + Send + Sync + 'static,
    {
        compose::create_sub_lens(self.lens_spec(), read, write)
    }

    /// Composes this lens with a lens over the focused value.
    fn then<B, L2, L>(&self, inner: &L2) -> L
    where
        B: Data,
        L2: AnyLens<D, B>,
        L: FromSpec<H, B>,
    {
        L::from_spec(self.lens_spec().then(inner.lens_spec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::ObjectLens;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn x_lens() -> ObjectLens<Point, i32> {
        ObjectLens::new(|point: &Point| point.x, |point: Point, x| Point { x, ..point })
    }

    #[rstest]
    fn test_set_and_apply() {
        let updated = x_lens().set(Point { x: 1, y: 2 }, 10);
        assert_eq!(updated, Ok(Point { x: 10, y: 2 }));
    }

    #[rstest]
    fn test_update_sees_current_value() {
        let updated = x_lens().update(Point { x: 4, y: 0 }, |x| x.unwrap_or(0) * 2);
        assert_eq!(updated, Ok(Point { x: 8, y: 0 }));
    }

    #[rstest]
    fn test_set_nullable_policy() {
        assert_eq!(x_lens().set_nullable(None, 1), Ok(None));
        assert_eq!(x_lens().to_null_unsafe().set_nullable(None, 1), Err(AccessError::NullHost));
    }

    #[rstest]
    fn test_change_builders() {
        let point = Point { x: 1, y: 2 };

        assert_eq!(x_lens().change_to(7).apply(point.clone()), Ok(Point { x: 7, y: 2 }));
        assert_eq!(x_lens().change_to_from(|| 9).apply(point.clone()), Ok(Point { x: 9, y: 2 }));
        assert_eq!(
            x_lens().change_by(|x| x.unwrap_or(0) - 1).apply(point.clone()),
            Ok(Point { x: 0, y: 2 })
        );
        assert_eq!(
            x_lens().change_by_host(|host, x| host.y + x.unwrap_or(0)).apply(point),
            Ok(Point { x: 3, y: 2 })
        );
    }

    #[rstest]
    fn test_change_is_deferred_and_reusable() {
        let change = x_lens().change_by(|x| x.unwrap_or(0) + 1);
        let once = change.apply(Point { x: 0, y: 0 });
        let twice = once.and_then(|point| change.apply(point));
        assert_eq!(twice, Ok(Point { x: 2, y: 0 }));
    }

    #[rstest]
    fn test_null_safety_toggle_is_self_typed() {
        let lens: ObjectLens<Point, i32> = x_lens().to_null_unsafe();
        assert!(!lens.is_null_safe());
        assert!(lens.to_null_safe().is_null_safe());
    }

    #[rstest]
    fn test_field_and_then_agree() {
        let pair = ObjectLens::new(|pair: &(Point, i32)| pair.0.clone(), |pair: (Point, i32), point| (point, pair.1));
        let via_field: ObjectLens<(Point, i32), i32> =
            pair.field(|point: &Point| point.y, |point, y| Point { y, ..point });
        let via_then: ObjectLens<(Point, i32), i32> =
            pair.then(&ObjectLens::new(|point: &Point| point.y, |point: Point, y| Point { y, ..point }));

        let host = (Point { x: 1, y: 2 }, 3);
        assert_eq!(via_field.apply(&host), via_then.apply(&host));
        assert_eq!(via_field.set(host.clone(), 5), via_then.set(host, 5));
    }

    #[rstest]
    fn test_create_sub_lens_propagates_write_error() {
        let items = ObjectLens::new(|host: &(Vec<i32>,)| host.0.clone(), |_, items| (items,));
        let second: ObjectLens<(Vec<i32>,), i32> = items.create_sub_lens(
            |items: &Vec<i32>| items.get(1).copied(),
            |mut items: Vec<i32>, value| {
                let length = items.len();
                let slot = items
                    .get_mut(1)
                    .ok_or(AccessError::IndexOutOfBounds { index: 1, length })?;
                *slot = value;
                Ok(items)
            },
        );

        assert_eq!(second.apply(&(vec![1],)), None);
        assert_eq!(
            second.set((vec![1],), 5),
            Err(AccessError::IndexOutOfBounds { index: 1, length: 1 })
        );
        assert_eq!(second.set((vec![1, 2],), 5), Ok((vec![1, 5],)));
    }

    #[rstest]
    fn test_optional_field() {
        let root: ObjectLens<Option<i32>, Option<i32>> = crate::lens::identity();
        let inner: ObjectLens<Option<i32>, i32> = root.optional_field(|value: &Option<i32>| *value, |_, value| Some(value));
        assert_eq!(inner.apply(&None), None);
        assert_eq!(inner.set(None, 3), Ok(Some(3)));
    }
}
