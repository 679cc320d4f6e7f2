use std::sync::Arc;

use crate::access::AnyAccess;
use crate::lens::{AnyLens, Change};
use crate::primitives::{BooleanAccess, SizeAccess};
use crate::spec::reader;

define_primitive! {
    /// Focuses on a `String`.
    String [] => String
}

/// Text operations on a focused string.
///
/// Transformations return [`AnyAccess::Derived`], which for both
/// [`StringAccess`] and [`StringLens`] is [`StringAccess`], so they can be
/// chained.
pub trait AnyStringAccess<H: 'static>: AnyAccess<H, String> {
    /// The length in characters.
    fn length(&self) -> SizeAccess<H> {
        self.map_to_number(|text: String| text.chars().count())
    }

    /// Tests for the empty string.
    fn is_empty_string(&self) -> BooleanAccess<H> {
        self.that(String::is_empty)
    }

    /// Tests for a string made only of whitespace.
    fn is_blank(&self) -> BooleanAccess<H> {
        self.that(|text: &String| text.trim().is_empty())
    }

    /// Upper-cases the focused string.
    fn to_upper_case(&self) -> Self::Derived {
        self.map_with(|text: String| text.to_uppercase())
    }

    /// Lower-cases the focused string.
    fn to_lower_case(&self) -> Self::Derived {
        self.map_with(|text: String| text.to_lowercase())
    }

    /// Strips leading and trailing whitespace.
    fn trim(&self) -> Self::Derived {
        self.map_with(|text: String| text.trim().to_string())
    }

    /// Appends `suffix` to the focused string.
    fn concat(&self, suffix: &str) -> Self::Derived {
        let suffix = suffix.to_string();
        self.map_with(move |text: String| text + &suffix)
    }

    /// Appends the string read by `other` from the same host. Absent if
    /// either side is absent.
    fn concat_access<A>(&self, other: &A) -> Self::Derived
    where
        A: AnyAccess<H, String>,
    {
        let left = Arc::clone(self.read_fn());
        let right = Arc::clone(other.read_fn());
        Self::new_access(reader(move |host: Option<&H>| {
            left(host).zip(right(host)).map(|(left, right)| left + &right)
        }))
    }

    /// Tests whether the focused string contains `needle`.
    fn contains(&self, needle: &str) -> BooleanAccess<H> {
        let needle = needle.to_string();
        self.that(move |text: &String| text.contains(needle.as_str()))
    }

    /// Tests whether the focused string starts with `prefix`.
    fn starts_with(&self, prefix: &str) -> BooleanAccess<H> {
        let prefix = prefix.to_string();
        self.that(move |text: &String| text.starts_with(prefix.as_str()))
    }

    /// Tests whether the focused string ends with `suffix`.
    fn ends_with(&self, suffix: &str) -> BooleanAccess<H> {
        let suffix = suffix.to_string();
        self.that(move |text: &String| text.ends_with(suffix.as_str()))
    }
}

impl<H: 'static> AnyStringAccess<H> for StringAccess<H> {}
impl<H: 'static> AnyStringAccess<H> for StringLens<H> {}

impl<H: 'static> StringLens<H> {
    /// A change appending `suffix`. An absent string counts as empty.
    #[must_use]
    pub fn append_str(&self, suffix: &str) -> Change<H> {
        let suffix = suffix.to_string();
        self.change_by(move |text: Option<String>| text.unwrap_or_default() + &suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        label: String,
        note: Option<String>,
    }

    fn label() -> StringLens<Tag> {
        StringLens::new(|tag: &Tag| tag.label.clone(), |tag: Tag, label| Tag { label, ..tag })
    }

    fn note() -> StringAccess<Tag> {
        StringAccess::of_optional(|tag: &Tag| tag.note.clone())
    }

    fn tag(label: &str) -> Tag {
        Tag {
            label: label.to_string(),
            note: None,
        }
    }

    #[rstest]
    fn test_transformations_chain() {
        let shout = label().trim().to_upper_case().concat("!");
        assert_eq!(shout.apply(&tag("  hey ")), Some("HEY!".to_string()));
        assert_eq!(label().to_lower_case().apply(&tag("HeY")), Some("hey".to_string()));
    }

    #[rstest]
    #[case("", true, true)]
    #[case("   ", false, true)]
    #[case("a", false, false)]
    fn test_emptiness(#[case] text: &str, #[case] empty: bool, #[case] blank: bool) {
        assert_eq!(label().is_empty_string().apply(&tag(text)), Some(empty));
        assert_eq!(label().is_blank().apply(&tag(text)), Some(blank));
    }

    #[rstest]
    fn test_substring_predicates() {
        let host = tag("lenskit");
        assert_eq!(label().contains("nsk").apply(&host), Some(true));
        assert_eq!(label().starts_with("lens").apply(&host), Some(true));
        assert_eq!(label().ends_with("lens").apply(&host), Some(false));
    }

    #[rstest]
    fn test_length_counts_characters() {
        assert_eq!(label().length().apply(&tag("héllo")), Some(5));
    }

    #[rstest]
    fn test_absent_string_stays_absent() {
        assert_eq!(note().to_upper_case().apply(&tag("x")), None);
        assert_eq!(note().length().apply(&tag("x")), None);
    }

    #[rstest]
    fn test_concat_access() {
        let host = Tag {
            label: "a".to_string(),
            note: Some("b".to_string()),
        };
        assert_eq!(label().concat_access(&note()).apply(&host), Some("ab".to_string()));
        assert_eq!(label().concat_access(&note()).apply(&tag("a")), None);
    }

    #[rstest]
    fn test_append_str() {
        let appended = label().append_str("-2").apply(tag("v1"));
        assert_eq!(appended, Ok(tag("v1-2")));
    }
}
