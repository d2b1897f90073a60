//! String orderings used to sort word lists.
//!
//! Sorting never consults the process locale; callers pass a [`Collation`]
//! explicitly so that two builds of the same input always agree.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub trait Collation {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Plain code point order, equivalent to the `C` locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodepointCollation;

impl Collation for CodepointCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// Dictionary order for Lomaji.
///
/// Strings compare first by their base letters (case and diacritics
/// ignored), then by their decomposed form so that tone marks break ties,
/// and finally by code point.
#[derive(Debug, Clone, Copy, Default)]
pub struct LomajiCollation;

impl LomajiCollation {
    fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
    }
}

impl Collation for LomajiCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        Self::base_letters(a)
            .cmp(Self::base_letters(b))
            .then_with(|| a.nfd().cmp(b.nfd()))
            .then_with(|| a.cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(collation: &dyn Collation, words: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = words.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| collation.compare(a, b));
        v
    }

    #[test]
    fn test_codepoint_order() {
        assert_eq!(sorted(&CodepointCollation, &["á", "b", "a"]), ["a", "b", "á"]);
    }

    #[test]
    fn test_lomaji_groups_tones_with_base_letters() {
        assert_eq!(
            sorted(&LomajiCollation, &["b", "á", "a", "à"]),
            ["a", "à", "á", "b"]
        );
    }

    #[test]
    fn test_lomaji_ignores_case_first() {
        assert_eq!(sorted(&LomajiCollation, &["b", "A", "a"]), ["A", "a", "b"]);
    }

    #[test]
    fn test_lomaji_is_total() {
        assert_eq!(LomajiCollation.compare("má", "má"), Ordering::Equal);
        assert_ne!(LomajiCollation.compare("ma\u{0301}", "má"), Ordering::Equal);
    }
}
