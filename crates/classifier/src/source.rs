//! Lookup table sources
//!
//! Loads user and network mapping data from inline config, local files, or
//! HTTP endpoints. Two wire formats: a JSON object of key/value strings, or
//! delimiter-separated rows with configured field indexes. Files pick the
//! format by extension, HTTP responses by Content-Type.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::info;

use crate::error::ClassifierError;

/// One fetchable lookup source.
///
/// For the user table the key is an address and the value a user id; for the
/// network table the key is a CIDR and the value a class tag.
#[derive(Debug, Clone)]
pub struct LookupSource {
    /// HTTP endpoint to fetch from
    pub url: Option<String>,

    /// Local file to read
    pub file: Option<PathBuf>,

    /// Key column index for delimiter-separated rows
    pub key_field: usize,

    /// Value column index for delimiter-separated rows
    pub value_field: usize,

    /// Field delimiter for delimiter-separated rows
    pub delimiter: char,
}

/// A complete input for one table: inline entries plus an optional source.
///
/// Loaded entries are merged over the inline ones, later keys overwriting
/// earlier, and the result is applied in sorted key order so table builds
/// are deterministic.
#[derive(Debug, Clone, Default)]
pub struct TableSource {
    /// Inline key/value entries from configuration
    pub entries: BTreeMap<String, String>,

    /// Optional file or HTTP source
    pub fetch: Option<LookupSource>,
}

impl TableSource {
    /// Resolve this input into the final ordered entry list.
    pub async fn resolve(&self) -> Result<Vec<(String, String)>, ClassifierError> {
        let mut merged = self.entries.clone();

        if let Some(source) = &self.fetch {
            for (key, value) in load_entries(source).await? {
                merged.insert(key, value);
            }
        }

        Ok(merged.into_iter().collect())
    }
}

/// Load key/value entries from a file or HTTP source.
///
/// When both are configured the URL is fetched first and the file applied
/// on top, matching how inline entries layer under sources.
pub async fn load_entries(
    source: &LookupSource,
) -> Result<Vec<(String, String)>, ClassifierError> {
    let mut entries = Vec::new();

    if let Some(url) = &source.url {
        info!(url = %url, "fetching lookup table");

        let response = reqwest::get(url).await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.text().await?;

        if content_type.contains("application/json") {
            entries.extend(parse_json(&body)?);
        } else if content_type.contains("text/csv") {
            entries.extend(parse_delimited(&body, source)?);
        } else {
            return Err(ClassifierError::UnsupportedFormat(format!(
                "content type {:?} for {}",
                content_type, url
            )));
        }

        info!(url = %url, entries = entries.len(), "lookup table fetched");
    }

    if let Some(path) = &source.file {
        info!(path = %path.display(), "reading lookup table");

        let body = std::fs::read_to_string(path).map_err(|e| ClassifierError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let before = entries.len();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => entries.extend(parse_json(&body)?),
            Some("csv") => entries.extend(parse_delimited(&body, source)?),
            other => {
                return Err(ClassifierError::UnsupportedFormat(format!(
                    "file extension {:?} for {}",
                    other,
                    path.display()
                )))
            }
        }

        info!(path = %path.display(), entries = entries.len() - before, "lookup table read");
    }

    Ok(entries)
}

/// Parse a JSON object of string keys to string values.
///
/// A `BTreeMap` keeps the entry order deterministic regardless of how the
/// producer serialized the object.
fn parse_json(body: &str) -> Result<Vec<(String, String)>, ClassifierError> {
    let map: BTreeMap<String, String> = serde_json::from_str(body)?;
    Ok(map.into_iter().collect())
}

/// Parse delimiter-separated rows using the source's field indexes.
///
/// Rows are taken in line order. A row missing a configured field is an
/// error, not a skip - a truncated lookup table must not half-load.
fn parse_delimited(
    body: &str,
    source: &LookupSource,
) -> Result<Vec<(String, String)>, ClassifierError> {
    let mut entries = Vec::new();

    for (idx, line) in body.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(source.delimiter).collect();
        let needed = source.key_field.max(source.value_field);
        if fields.len() <= needed {
            return Err(ClassifierError::BadRow {
                line: idx + 1,
                reason: format!("expected at least {} fields, got {}", needed + 1, fields.len()),
            });
        }

        entries.push((
            fields[source.key_field].trim().to_string(),
            fields[source.value_field].trim().to_string(),
        ));
    }

    Ok(entries)
}
