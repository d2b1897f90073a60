//! Build settings loaded from TOML.
//!
//! - Default values are embedded via `include_str!("default_settings.toml")`
//! - `parse_settings_toml(toml)` parses and validates a custom file
//! - The parsed `Settings` value is handed to the pipeline explicitly

use serde::Deserialize;

use crate::collation::{CodepointCollation, Collation, LomajiCollation};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub weights: WeightSettings,
    pub tones: ToneSettings,
    pub collation: CollationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

/// Fixed conversion weights for ideographic and romanized outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightSettings {
    pub hanji: i64,
    pub lomaji: i64,
}

/// Values given to rows generated from the syllable list.
#[derive(Debug, Clone, Deserialize)]
pub struct ToneSettings {
    pub priority_id: i64,
    pub weight: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollationSettings {
    pub kind: CollationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollationKind {
    Lomaji,
    Codepoint,
}

impl CollationKind {
    pub fn collation(self) -> Box<dyn Collation> {
        match self {
            CollationKind::Lomaji => Box::new(LomajiCollation),
            CollationKind::Codepoint => Box::new(CodepointCollation),
        }
    }
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if s.$section.$field < 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        };
    }

    check_non_negative!(weights.hanji);
    check_non_negative!(weights.lomaji);
    check_non_negative!(tones.priority_id);
    check_non_negative!(tones.weight);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.weights.hanji, 1000);
        assert_eq!(s.weights.lomaji, 900);
        assert_eq!(s.tones.priority_id, 99999);
        assert_eq!(s.tones.weight, 900);
        assert_eq!(s.collation.kind, CollationKind::Lomaji);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[weights]
hanji = 500
lomaji = 400

[tones]
priority_id = 1
weight = 10

[collation]
kind = "codepoint"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.weights.hanji, 500);
        assert_eq!(s.tones.weight, 10);
        assert_eq!(s.collation.kind, CollationKind::Codepoint);
    }

    #[test]
    fn error_negative_weight() {
        let toml = r#"
[weights]
hanji = -1
lomaji = 900

[tones]
priority_id = 99999
weight = 900

[collation]
kind = "lomaji"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("weights.hanji"));
    }

    #[test]
    fn error_unknown_collation() {
        let toml = r#"
[weights]
hanji = 1000
lomaji = 900

[tones]
priority_id = 99999
weight = 900

[collation]
kind = "en_US"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[weights]
hanji = 1000
lomaji = 900
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
