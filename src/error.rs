//! Error types for evicheck operations.
//!
//! This module defines [`EvicheckError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems are caught before any browser or file work
//! - Workbook errors are fatal and raised to the caller
//! - Per-step automation errors are caught by the pass loop and degrade to
//!   the default verdict; nothing is retried
//! - Use `anyhow::Error` (via `EvicheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for evicheck operations.
#[derive(Debug, Error)]
pub enum EvicheckError {
    /// A run setting is missing or malformed.
    #[error("Invalid configuration: {message}")]
    SettingsValidation { message: String },

    /// The input workbook could not be opened.
    #[error("Failed to open workbook {path}: {message}")]
    WorkbookOpen { path: PathBuf, message: String },

    /// The requested sheet does not exist in the workbook.
    #[error("Sheet '{sheet}' not found in {path}")]
    SheetNotFound { sheet: String, path: PathBuf },

    /// Writing a workbook failed.
    #[error("Failed to write workbook {path}: {message}")]
    WorkbookWrite { path: PathBuf, message: String },

    /// The WebDriver endpoint refused the session.
    #[error("Failed to start a browser session at {url}: {message}")]
    WebDriverConnect { url: String, message: String },

    /// An element lookup exhausted its wait budget.
    #[error("Timed out during '{step}': {message}")]
    InteractionTimeout { step: String, message: String },

    /// A browser interaction failed for a reason other than a timeout.
    #[error("Automation step '{step}' failed: {message}")]
    Automation { step: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for evicheck operations.
pub type Result<T> = std::result::Result<T, EvicheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_validation_displays_message() {
        let err = EvicheckError::SettingsValidation {
            message: "sheet name must not be empty".into(),
        };
        assert!(err.to_string().contains("sheet name must not be empty"));
    }

    #[test]
    fn workbook_open_displays_path_and_message() {
        let err = EvicheckError::WorkbookOpen {
            path: PathBuf::from("/data/countries.xlsx"),
            message: "no such file".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/countries.xlsx"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn sheet_not_found_displays_sheet_and_path() {
        let err = EvicheckError::SheetNotFound {
            sheet: "Countries".into(),
            path: PathBuf::from("in.xlsx"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Countries"));
        assert!(msg.contains("in.xlsx"));
    }

    #[test]
    fn interaction_timeout_displays_step() {
        let err = EvicheckError::InteractionTimeout {
            step: "select country".into(),
            message: "element not found within 10s".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("select country"));
        assert!(msg.contains("10s"));
    }

    #[test]
    fn automation_displays_step_and_message() {
        let err = EvicheckError::Automation {
            step: "submit evidence".into(),
            message: "element is stale".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("submit evidence"));
        assert!(msg.contains("stale"));
    }

    #[test]
    fn webdriver_connect_displays_url() {
        let err = EvicheckError::WebDriverConnect {
            url: "http://localhost:9515".into(),
            message: "connection refused".into(),
        };
        assert!(err.to_string().contains("http://localhost:9515"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: EvicheckError = io_err.into();
        assert!(matches!(err, EvicheckError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(EvicheckError::SettingsValidation {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
