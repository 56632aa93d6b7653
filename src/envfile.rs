//! Shell-sourceable env file loading.
//!
//! The API keys the runner pushes into Secrets Manager come from a local
//! `.env` style file, the same file the original service sources at
//! startup. The parser accepts the subset of shell syntax such files
//! actually use: `KEY=value` lines, blank lines, `#` comments, an optional
//! `export ` prefix, and single- or double-quoted values.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::sensitive::SensitiveString;

/// Parsed contents of an env file.
///
/// All values are held as [`SensitiveString`] so nothing read from the
/// file can leak into logs or reports.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
    values: HashMap<String, SensitiveString>,
}

impl EnvFile {
    /// Load and parse an env file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvFile`] if the file is absent, unreadable, or
    /// contains a line that is not a comment, blank, or assignment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::env_file(&path, e.to_string()))?;
        Self::parse(&path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut values = HashMap::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line).trim_start();

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::env_file(
                    path,
                    format!("line {}: expected KEY=value, got '{}'", idx + 1, raw_line),
                ));
            };

            let key = key.trim();
            if !is_valid_key(key) {
                return Err(Error::env_file(
                    path,
                    format!("line {}: invalid variable name '{}'", idx + 1, key),
                ));
            }

            values.insert(key.to_string(), SensitiveString::new(parse_value(value)));
        }

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// Path the file was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&SensitiveString> {
        self.values.get(key)
    }

    /// Look up a value that must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingValue`] when the key is absent or its value
    /// is the empty string. Required values are checked before any remote
    /// call is issued.
    pub fn require(&self, key: &str) -> Result<&SensitiveString> {
        match self.values.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::missing_value(key, &self.path)),
        }
    }

    /// Number of parsed assignments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the file contained no assignments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Unquote a raw value the way a shell assignment would.
fn parse_value(raw: &str) -> String {
    let trimmed = raw.trim();

    // Quoted values keep their content verbatim, including '#'
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }

    // Unquoted: a '#' preceded by whitespace starts a trailing comment
    let without_comment = match trimmed.find(" #") {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    };
    without_comment.trim().to_string()
}
