use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

pub const DEFAULT_KEY_FIELD: usize = 0;
pub const DEFAULT_VALUE_FIELD: usize = 1;
pub const DEFAULT_DELIMITER: &str = ";";

/// `[users]` and `[networks]` sections.
///
/// Each table can mix inline entries with one fetched source. For the user
/// table keys are addresses and values are user ids, for the network table
/// keys are CIDRs and values are class tags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupTableConfig {
    /// HTTP endpoint serving the table, JSON or delimiter-separated.
    pub url: Option<String>,
    /// Local file holding the table, format picked by extension.
    pub file: Option<PathBuf>,
    /// Key column index for delimiter-separated rows.
    pub key_field: usize,
    /// Value column index for delimiter-separated rows.
    pub value_field: usize,
    /// Field delimiter for delimiter-separated rows, exactly one character.
    pub delimiter: String,
    /// Inline key/value entries, layered under any fetched source.
    #[serde(rename = "static")]
    pub entries: BTreeMap<String, String>,
}

impl Default for LookupTableConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            key_field: DEFAULT_KEY_FIELD,
            value_field: DEFAULT_VALUE_FIELD,
            delimiter: DEFAULT_DELIMITER.to_string(),
            entries: BTreeMap::new(),
        }
    }
}

impl LookupTableConfig {
    /// Returns the delimiter as a single character.
    pub fn delimiter_char(&self, section: &str) -> Result<char> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConfigError::invalid(
                format!("{section}.delimiter"),
                "must be exactly one character",
            )),
        }
    }

    /// True when the table has a file or URL to fetch from.
    pub fn has_fetch(&self) -> bool {
        self.url.is_some() || self.file.is_some()
    }

    pub(crate) fn validate(&self, section: &str) -> Result<()> {
        self.delimiter_char(section)?;
        if self.key_field == self.value_field {
            return Err(ConfigError::invalid(
                format!("{section}.key_field"),
                "must differ from value_field",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LookupTableConfig::default();
        assert_eq!(cfg.key_field, 0);
        assert_eq!(cfg.value_field, 1);
        assert_eq!(cfg.delimiter_char("users").unwrap(), ';');
        assert!(!cfg.has_fetch());
        assert!(cfg.validate("users").is_ok());
    }

    #[test]
    fn parses_static_entries() {
        let cfg: LookupTableConfig = toml::from_str(
            r#"
            delimiter = ","
            [static]
            "10.0.0.1" = "42"
            "10.0.0.2" = "43"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.entries.len(), 2);
        assert_eq!(cfg.entries.get("10.0.0.1").map(String::as_str), Some("42"));
        assert_eq!(cfg.delimiter_char("users").unwrap(), ',');
    }

    #[test]
    fn rejects_multichar_delimiter() {
        let cfg = LookupTableConfig {
            delimiter: "||".to_string(),
            ..Default::default()
        };
        assert!(cfg.validate("networks").is_err());
    }

    #[test]
    fn rejects_colliding_fields() {
        let cfg = LookupTableConfig {
            value_field: 0,
            ..Default::default()
        };
        assert!(cfg.validate("users").is_err());
    }
}
