//! Readers for the raw input tables.
//!
//! - frequencies CSV: `input`, `freq`, `chhan_id`
//! - conversions CSV: `input`, `output`, `weight`, `category`, `annotation`
//!   (`color` and `hint` are accepted as older column names)
//! - syllables: plain text, one syllable per line
//! - symbols TSV: `input`, `output`, `category`
//! - emoji CSV: `id`, `emoji`, `short_name`, `category`, `code`
//!
//! Every `input` column is normalized on the way in. A missing column or an
//! unparsable field aborts the whole read.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, debug_span};

use super::{Emoji, RawInputs, Symbol, Word};
use crate::lomaji::normalize;
use crate::BuildError;

/// A conversion as it appears in the file, before the weight policy is
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConversion {
    pub input: String,
    pub output: String,
    pub weight: Option<i64>,
    pub category: Option<i64>,
    pub annotation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FrequencyRecord {
    input: String,
    freq: i64,
    #[serde(alias = "priority")]
    chhan_id: i64,
}

#[derive(Debug, Deserialize)]
struct ConversionRecord {
    input: String,
    output: String,
    #[serde(default)]
    weight: Option<i64>,
    #[serde(default, alias = "color")]
    category: Option<i64>,
    #[serde(default, alias = "hint")]
    annotation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SymbolRecord {
    input: String,
    output: String,
    #[serde(default)]
    category: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct EmojiRecord {
    id: i64,
    emoji: String,
    short_name: String,
    category: i64,
    code: String,
}

fn read_records<T, R>(reader: R, origin: &str, delimiter: u8) -> Result<Vec<T>, BuildError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| BuildError::DataFormat {
            origin: origin.to_string(),
            source,
        })
}

/// Read the frequency list. `origin` names the source in error messages.
pub fn read_frequencies<R: Read>(reader: R, origin: &str) -> Result<Vec<Word>, BuildError> {
    let records: Vec<FrequencyRecord> = read_records(reader, origin, b',')?;
    records
        .into_iter()
        .map(|r| {
            if r.freq < 0 {
                return Err(BuildError::NegativeFrequency {
                    input: r.input,
                    freq: r.freq,
                });
            }
            Ok(Word {
                input: normalize(&r.input, false),
                freq: r.freq,
                priority_id: r.chhan_id,
            })
        })
        .collect()
}

pub fn read_conversions<R: Read>(
    reader: R,
    origin: &str,
) -> Result<Vec<RawConversion>, BuildError> {
    let records: Vec<ConversionRecord> = read_records(reader, origin, b',')?;
    Ok(records
        .into_iter()
        .map(|r| RawConversion {
            input: normalize(&r.input, false),
            output: r.output,
            weight: r.weight,
            category: r.category,
            annotation: r.annotation,
        })
        .collect())
}

/// Read a syllable list, one per line. Trailing whitespace is dropped and
/// blank lines are skipped; normalization happens in the pipeline.
pub fn read_syllables<R: BufRead>(reader: R) -> Result<Vec<String>, BuildError> {
    let mut syllables = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let syllable = line.trim_end();
        if !syllable.is_empty() {
            syllables.push(syllable.to_string());
        }
    }
    Ok(syllables)
}

pub fn read_symbols<R: Read>(reader: R, origin: &str) -> Result<Vec<Symbol>, BuildError> {
    let records: Vec<SymbolRecord> = read_records(reader, origin, b'\t')?;
    Ok(records
        .into_iter()
        .map(|r| Symbol {
            input: r.input,
            output: r.output,
            category: r.category,
        })
        .collect())
}

pub fn read_emoji<R: Read>(reader: R, origin: &str) -> Result<Vec<Emoji>, BuildError> {
    let records: Vec<EmojiRecord> = read_records(reader, origin, b',')?;
    Ok(records
        .into_iter()
        .map(|r| Emoji {
            id: r.id,
            emoji: r.emoji,
            short_name: r.short_name,
            category: r.category,
            code: r.code,
        })
        .collect())
}

/// Paths of the input files for one build.
#[derive(Debug, Clone, Default)]
pub struct InputFiles {
    pub frequencies: PathBuf,
    pub conversions: PathBuf,
    pub syllables: Option<PathBuf>,
    pub symbols: Option<PathBuf>,
    pub emoji: Option<PathBuf>,
}

fn open(path: &Path) -> Result<BufReader<File>, BuildError> {
    let file = File::open(path).map_err(|e| {
        BuildError::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display())))
    })?;
    Ok(BufReader::new(file))
}

impl InputFiles {
    /// Read every input file into memory.
    pub fn load(&self) -> Result<RawInputs, BuildError> {
        let _span = debug_span!("load_inputs").entered();

        let origin = self.frequencies.display().to_string();
        let words = read_frequencies(open(&self.frequencies)?, &origin)?;

        let origin = self.conversions.display().to_string();
        let conversions = read_conversions(open(&self.conversions)?, &origin)?;

        let syllables = match &self.syllables {
            Some(path) => read_syllables(open(path)?)?,
            None => Vec::new(),
        };

        let symbols = self
            .symbols
            .as_deref()
            .map(|path| read_symbols(open(path)?, &path.display().to_string()))
            .transpose()?;

        let emoji = self
            .emoji
            .as_deref()
            .map(|path| read_emoji(open(path)?, &path.display().to_string()))
            .transpose()?;

        debug!(
            words = words.len(),
            conversions = conversions.len(),
            syllables = syllables.len(),
            "inputs loaded"
        );

        Ok(RawInputs {
            words,
            conversions,
            syllables,
            symbols,
            emoji,
        })
    }
}
