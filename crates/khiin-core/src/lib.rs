//! Builder for the Khiin IME lexical database.
//!
//! Raw frequency and conversion lists go in; a reconciled set of words,
//! conversions and typed key sequences comes out, ready to be written as an
//! SQL script or an SQLite file.

pub mod collation;
pub mod dataset;
pub mod db;
mod error;
pub mod lomaji;
pub mod settings;
pub mod unicode;

pub use error::BuildError;
