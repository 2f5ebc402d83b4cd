//! Env file parsing.
//!
//! Settings may be seeded from a file of `KEY=value` lines, the same format
//! the original deployment kept next to the binary.
//!
//! # Supported Formats
//!
//! - Simple: `KEY=value`
//! - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
//! - Empty: `KEY=`
//! - Comments: `# This is a comment`
//! - Whitespace around equals: `KEY = value`
//! - Values containing equals signs: `EVICHECK_WEBSITE=https://example.com?a=b`

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// Parses env files into a map of settings keys.
///
/// # Example
///
/// ```
/// use evicheck::config::EnvFile;
///
/// let content = r#"
/// # Checklist site
/// EVICHECK_WEBSITE=https://immi.homeaffairs.gov.au/visas/web-evidentiary-tool
/// EVICHECK_PROVIDER1="University of Newcastle"
/// EVICHECK_SHEET=
/// "#;
///
/// let vars = EnvFile::parse(content);
/// assert_eq!(
///     vars.get("EVICHECK_PROVIDER1"),
///     Some(&"University of Newcastle".to_string())
/// );
/// assert_eq!(vars.get("EVICHECK_SHEET"), Some(&"".to_string()));
/// ```
pub struct EnvFile;

impl EnvFile {
    /// Parse env file content into a map of variables.
    pub fn parse(content: &str) -> HashMap<String, String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::parse_line)
            .collect()
    }

    /// Load and parse an env file from a path.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let eq_pos = line.find('=')?;
        let key = line[..eq_pos].trim();
        if key.is_empty() {
            return None;
        }
        let value = Self::unquote(line[eq_pos + 1..].trim());
        Some((key.to_string(), value))
    }

    fn unquote(value: &str) -> String {
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }
}
