//! The word/conversion dataset and the stages that turn raw input tables
//! into id-bearing rows.
//!
//! `source` reads the raw tables, `reconcile` keeps only inputs present on
//! both sides, `assemble` assigns ids and generates key sequences, and
//! `pipeline` runs the whole build in order.

pub mod assemble;
pub mod pipeline;
pub mod reconcile;
pub mod source;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use tracing::debug;

use crate::collation::Collation;

pub use assemble::assemble;
pub use pipeline::{build, BuildOptions, RawInputs};
pub use reconcile::intersect;

/// One spelling from the frequency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub input: String,
    pub freq: i64,
    pub priority_id: i64,
}

/// One output candidate for a spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: String,
    pub output: String,
    pub weight: i64,
    pub category: Option<i64>,
    pub annotation: Option<String>,
}

/// Row of the passthrough `symbols` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub input: String,
    pub output: String,
    pub category: Option<i64>,
}

/// Row of the passthrough `emoji` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    pub id: i64,
    pub emoji: String,
    pub short_name: String,
    pub category: i64,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyRow {
    pub id: i64,
    pub input: String,
    pub freq: i64,
    pub priority: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRow {
    pub input_id: i64,
    pub output: String,
    pub weight: i64,
    pub category: Option<i64>,
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeySequenceRow {
    pub input_id: i64,
    pub numeric: String,
    pub telex: String,
    pub n_syls: i64,
    pub fuzzy_tone: bool,
    pub p: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableRow {
    pub input: String,
}

/// A finished build, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub frequency: Vec<FrequencyRow>,
    pub conversions: Vec<ConversionRow>,
    pub key_sequences: Vec<KeySequenceRow>,
    pub syllables: Vec<SyllableRow>,
    pub symbols: Option<Vec<Symbol>>,
    pub emoji: Option<Vec<Emoji>>,
}

/// Most frequent first; ties go to the lower priority id.
pub fn word_order(a: &Word, b: &Word) -> Ordering {
    b.freq
        .cmp(&a.freq)
        .then_with(|| a.priority_id.cmp(&b.priority_id))
}

/// Inputs in collation order; heavier conversions first within an input.
pub fn conversion_order(collation: &dyn Collation, a: &Conversion, b: &Conversion) -> Ordering {
    collation
        .compare(&a.input, &b.input)
        .then_with(|| b.weight.cmp(&a.weight))
}

/// Keep the first item for every key, in iteration order. Later duplicates
/// are dropped, never merged.
pub fn dedupe_by_key<T, K, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let before = items.len();
    let mut seen = HashSet::with_capacity(before);
    items.retain(|item| seen.insert(key(item)));
    if items.len() < before {
        debug!(dropped = before - items.len(), "dropped duplicate rows");
    }
    items
}
