//! Run settings and validation.
//!
//! Everything the original read from module-level environment lookups lives
//! in one explicit record handed to each component at construction.

use std::path::PathBuf;

use crate::error::{EvicheckError, Result};

/// The checklist site driven by default.
pub const DEFAULT_CHECKLIST_URL: &str =
    "https://immi.homeaffairs.gov.au/visas/web-evidentiary-tool";

/// Default export target when the user does not pick one.
pub const DEFAULT_OUTPUT_FILE: &str = "country.xlsx";

/// Default WebDriver endpoint (a locally running chromedriver).
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Identifiers of the form controls on the checklist page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    /// Searchable dropdown holding the passport country.
    pub passport: String,
    /// Searchable dropdown holding the education provider.
    pub provider: String,
    /// Radio option picked for every lookup.
    pub radio: String,
    /// The display-evidence submit button.
    pub submit: String,
}

impl Default for FieldIds {
    fn default() -> Self {
        Self {
            passport: "ddlCountryOfPassport".to_string(),
            provider: "ddlEducationProvider".to_string(),
            radio: "01".to_string(),
            submit: "btnSubmitEvidence".to_string(),
        }
    }
}

/// Complete configuration for one run, immutable once collected.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Workbook holding the country list.
    pub input_file: PathBuf,
    /// Sheet within the workbook.
    pub sheet_name: String,
    /// Checklist website to drive.
    pub website_url: String,
    /// First education provider to check.
    pub provider1: String,
    /// Second education provider to check.
    pub provider2: String,
    /// Where the results workbook is exported.
    pub output_file: PathBuf,
    /// WebDriver endpoint URL.
    pub webdriver_url: String,
    /// Run the browser headless.
    pub headless: bool,
    /// Form-control identifiers on the checklist page.
    pub fields: FieldIds,
}

impl RunSettings {
    /// The two provider names in pass order.
    pub fn providers(&self) -> [&str; 2] {
        [&self.provider1, &self.provider2]
    }

    /// Check every field rule, failing on the first violation.
    ///
    /// Reads file metadata for the input-file existence rule but never
    /// creates or mutates anything; the collector performs the
    /// output-directory side effect only after the user confirms.
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Self::invalid("input file path must not be empty");
        }
        if !self.input_file.exists() {
            return Self::invalid(&format!(
                "input file '{}' does not exist",
                self.input_file.display()
            ));
        }
        if self.sheet_name.trim().is_empty() {
            return Self::invalid("sheet name must not be empty");
        }
        if !has_url_scheme(&self.website_url) {
            return Self::invalid(&format!(
                "website URL '{}' must start with http:// or https://",
                self.website_url
            ));
        }
        if self.provider1.trim().is_empty() {
            return Self::invalid("provider 1 name must not be empty");
        }
        if self.provider2.trim().is_empty() {
            return Self::invalid("provider 2 name must not be empty");
        }
        if self.output_file.as_os_str().is_empty() {
            return Self::invalid("output file path must not be empty");
        }
        Ok(())
    }

    fn invalid(message: &str) -> Result<()> {
        Err(EvicheckError::SettingsValidation {
            message: message.to_string(),
        })
    }
}

/// Whether a URL carries one of the recognized scheme prefixes.
pub fn has_url_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
