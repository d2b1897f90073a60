use std::collections::HashSet;

use tracing::{debug, debug_span};

use super::{conversion_order, word_order, Conversion, Word};
use crate::collation::Collation;

/// Keep only words that have at least one conversion and conversions whose
/// input is a known word, then put both lists in their canonical order.
///
/// Rows without a counterpart on the other side are dropped entirely. The
/// sorts are stable, so rows that compare equal keep their input order.
pub fn intersect(
    words: Vec<Word>,
    conversions: Vec<Conversion>,
    collation: &dyn Collation,
) -> (Vec<Word>, Vec<Conversion>) {
    let _span = debug_span!("intersect").entered();

    let word_inputs: HashSet<String> = words.iter().map(|w| w.input.clone()).collect();
    let conversion_inputs: HashSet<String> =
        conversions.iter().map(|c| c.input.clone()).collect();

    let (words_in, conversions_in) = (words.len(), conversions.len());

    let mut words: Vec<Word> = words
        .into_iter()
        .filter(|w| conversion_inputs.contains(&w.input))
        .collect();
    let mut conversions: Vec<Conversion> = conversions
        .into_iter()
        .filter(|c| word_inputs.contains(&c.input))
        .collect();

    words.sort_by(word_order);
    conversions.sort_by(|a, b| conversion_order(collation, a, b));

    debug!(
        words_dropped = words_in - words.len(),
        conversions_dropped = conversions_in - conversions.len(),
        "reconciled"
    );

    (words, conversions)
}
