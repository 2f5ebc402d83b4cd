//! evicheck - Country evidence-checklist automation.
//!
//! For each country listed in a spreadsheet, evicheck drives a browser
//! against a government document-checklist website, selects the country and
//! an education-provider option, submits the form, and records whether
//! evidence-requirement text appears in the response. Results are written
//! back into the source spreadsheet and exported to a new workbook.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`collector`] - Pre-run configuration form
//! - [`config`] - Settings records, env-file parsing, environment layer
//! - [`error`] - Error types and result alias
//! - [`excel`] - Workbook load, update, persist, and export
//! - [`runner`] - Run orchestration
//! - [`session`] - WebDriver form-filling session and the provider pass
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use evicheck::session::headings_contain_evidence;
//!
//! let headings = ["Evidence of financial capacity"];
//! assert!(headings_contain_evidence(&headings));
//! ```

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod excel;
pub mod runner;
pub mod session;
pub mod ui;

pub use error::{EvicheckError, Result};
