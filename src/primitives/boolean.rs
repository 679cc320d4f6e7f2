use std::sync::Arc;

use crate::access::AnyAccess;
use crate::lens::{AnyLens, Change};
use crate::spec::{ReadFn, reader};

define_primitive! {
    /// Focuses on a `bool`.
    Boolean [] => bool
}

/// Logic on a focused boolean.
pub trait AnyBooleanAccess<H: 'static>: AnyAccess<H, bool> {
    /// Negates the focused value.
    fn negate(&self) -> Self::Derived {
        self.map_with(|value: bool| !value)
    }

    /// Conjunction with another boolean read from the same host. Absent if
    /// either side is absent.
    fn and<A>(&self, other: &A) -> Self::Derived
    where
        A: AnyAccess<H, bool>,
    {
        Self::new_access(combine(self.read_fn(), other.read_fn(), |left, right| left && right))
    }

    /// Disjunction with another boolean read from the same host. Absent if
    /// either side is absent.
    fn or<A>(&self, other: &A) -> Self::Derived
    where
        A: AnyAccess<H, bool>,
    {
        Self::new_access(combine(self.read_fn(), other.read_fn(), |left, right| left || right))
    }
}

fn combine<H, F>(left: &ReadFn<H, bool>, right: &ReadFn<H, bool>, operator: F) -> ReadFn<H, bool>
where
    H: 'static,
    F: Fn(bool, bool) -> bool + Send + Sync + 'static,
{
    let left = Arc::clone(left);
    let right = Arc::clone(right);
    reader(move |host: Option<&H>| {
        let left = left(host)?;
        let right = right(host)?;
        Some(operator(left, right))
    })
}

impl<H: 'static> AnyBooleanAccess<H> for BooleanAccess<H> {}
impl<H: 'static> AnyBooleanAccess<H> for BooleanLens<H> {}

impl<H: 'static> BooleanLens<H> {
    /// A change flipping the focused value. An absent value counts as
    /// `false`.
    #[must_use]
    pub fn toggle(&self) -> Change<H> {
        self.change_by(|value: Option<bool>| !value.unwrap_or(false))
    }
}
