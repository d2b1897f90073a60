//! Materialization of a [`Dataset`](crate::dataset::Dataset) as SQLite
//! tables, either as a SQL script or written straight into a database file.
//!
//! Both paths share the statement templates in [`schema`] and the typed
//! [`SqlValue`] parameters, so no value is ever formatted into SQL by hand.

pub mod schema;
pub mod script;
pub mod sqlite;

use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

use crate::dataset::{
    ConversionRow, Emoji, FrequencyRow, KeySequenceRow, Symbol, SyllableRow,
};

pub use script::write_script;
pub use sqlite::write_database;

/// A single bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    /// Render as an SQL literal. Text is single-quoted with embedded quotes
    /// doubled.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(i) => i.to_string(),
            SqlValue::Real(f) => format!("{f:?}"),
            SqlValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Integer(v as i64)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlValue::Real(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// A row type with an insert statement template using `?1`, `?2`, ...
/// placeholders in the order of [`TableRow::values`].
pub trait TableRow {
    const INSERT: &'static str;

    fn values(&self) -> Vec<SqlValue>;
}

impl TableRow for FrequencyRow {
    const INSERT: &'static str = schema::INSERT_FREQUENCY;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.input.as_str().into(),
            self.freq.into(),
            self.priority.into(),
        ]
    }
}

impl TableRow for ConversionRow {
    const INSERT: &'static str = schema::INSERT_CONVERSION;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.input_id.into(),
            self.output.as_str().into(),
            self.weight.into(),
            self.category.into(),
            self.annotation.as_deref().into(),
        ]
    }
}

impl TableRow for KeySequenceRow {
    const INSERT: &'static str = schema::INSERT_KEY_SEQUENCE;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.input_id.into(),
            self.numeric.as_str().into(),
            self.telex.as_str().into(),
            self.n_syls.into(),
            self.fuzzy_tone.into(),
            self.p.into(),
        ]
    }
}

impl TableRow for SyllableRow {
    const INSERT: &'static str = schema::INSERT_SYLLABLE;

    fn values(&self) -> Vec<SqlValue> {
        vec![self.input.as_str().into()]
    }
}

impl TableRow for Symbol {
    const INSERT: &'static str = schema::INSERT_SYMBOL;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.input.as_str().into(),
            self.output.as_str().into(),
            self.category.into(),
        ]
    }
}

impl TableRow for Emoji {
    const INSERT: &'static str = schema::INSERT_EMOJI;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.emoji.as_str().into(),
            self.short_name.as_str().into(),
            self.category.into(),
            self.code.as_str().into(),
        ]
    }
}
