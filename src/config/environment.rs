//! Environment-backed settings layer.
//!
//! Resolves each `EVICHECK_*` key against the process environment first and
//! an optional env file second, so a deployment can pin everything in a
//! `.env` next to the binary while still allowing one-off overrides on the
//! command line.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::settings::{
    FieldIds, RunSettings, DEFAULT_CHECKLIST_URL, DEFAULT_OUTPUT_FILE, DEFAULT_WEBDRIVER_URL,
};
use crate::error::Result;

/// Recognized environment keys.
pub mod keys {
    pub const INPUT_FILE: &str = "EVICHECK_INPUT_FILE";
    pub const SHEET: &str = "EVICHECK_SHEET";
    pub const WEBSITE: &str = "EVICHECK_WEBSITE";
    pub const PROVIDER1: &str = "EVICHECK_PROVIDER1";
    pub const PROVIDER2: &str = "EVICHECK_PROVIDER2";
    pub const OUTPUT_FILE: &str = "EVICHECK_OUTPUT_FILE";
    pub const WEBDRIVER_URL: &str = "EVICHECK_WEBDRIVER_URL";
    pub const PASSPORT_FIELD: &str = "EVICHECK_PASSPORT_FIELD";
    pub const PROVIDER_FIELD: &str = "EVICHECK_PROVIDER_FIELD";
    pub const RADIO_ID: &str = "EVICHECK_RADIO_ID";
    pub const SUBMIT_ID: &str = "EVICHECK_SUBMIT_ID";
}

/// Settings resolved from the environment and an optional env file.
///
/// Precedence per key: process environment, then env file, then the
/// built-in default.
#[derive(Debug, Default)]
pub struct EnvLayer {
    file_vars: HashMap<String, String>,
}

impl EnvLayer {
    /// Load the layer, parsing `path` when it exists.
    ///
    /// A missing env file is not an error; the original tool also ran
    /// happily without one.
    pub fn load(path: &Path) -> Result<Self> {
        let file_vars = if path.exists() {
            tracing::debug!("Loading settings from {}", path.display());
            crate::config::EnvFile::load(path)?
        } else {
            tracing::debug!("No env file at {}", path.display());
            HashMap::new()
        };
        Ok(Self { file_vars })
    }

    /// Build a layer from explicit variables (for testing).
    pub fn from_vars(file_vars: HashMap<String, String>) -> Self {
        Self { file_vars }
    }

    /// Resolve a key: process environment wins over the env file.
    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| self.file_vars.get(key).cloned())
            .filter(|v| !v.trim().is_empty())
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Form-control identifiers, with the ids observed on the checklist
    /// site as defaults.
    pub fn field_ids(&self) -> FieldIds {
        let defaults = FieldIds::default();
        FieldIds {
            passport: self.get_or(keys::PASSPORT_FIELD, &defaults.passport),
            provider: self.get_or(keys::PROVIDER_FIELD, &defaults.provider),
            radio: self.get_or(keys::RADIO_ID, &defaults.radio),
            submit: self.get_or(keys::SUBMIT_ID, &defaults.submit),
        }
    }

    /// Seed a settings record from this layer alone.
    ///
    /// User-facing fields without an environment value stay empty; the
    /// collector either prefills prompts with them or, in non-interactive
    /// mode, rejects the record during validation.
    pub fn seed_settings(&self) -> RunSettings {
        RunSettings {
            input_file: PathBuf::from(self.get_or(keys::INPUT_FILE, "")),
            sheet_name: self.get_or(keys::SHEET, ""),
            website_url: self.get_or(keys::WEBSITE, DEFAULT_CHECKLIST_URL),
            provider1: self.get_or(keys::PROVIDER1, ""),
            provider2: self.get_or(keys::PROVIDER2, ""),
            output_file: PathBuf::from(self.get_or(keys::OUTPUT_FILE, DEFAULT_OUTPUT_FILE)),
            webdriver_url: self.get_or(keys::WEBDRIVER_URL, DEFAULT_WEBDRIVER_URL),
            headless: false,
            fields: self.field_ids(),
        }
    }
}
