use std::io;

use crate::settings::SettingsError;

/// Everything that can abort a database build.
///
/// Duplicate rows are not errors; they are dropped during assembly.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed rows or missing required columns in an input table.
    #[error("data format error in {origin}: {source}")]
    DataFormat {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("negative frequency {freq} for {input:?}")]
    NegativeFrequency { input: String, freq: i64 },

    #[error("total frequency overflows at {input:?}")]
    FrequencyOverflow { input: String },

    #[error("conversion {input:?} -> {output:?} has no weight")]
    MissingWeight { input: String, output: String },

    /// The transliteration produced a tone digit outside the fixed alphabet.
    #[error("tone digit {digit:?} in syllable {syllable:?} has no telex mapping")]
    UnmappedTone { syllable: String, digit: char },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}
