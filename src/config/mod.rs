//! Run configuration.
//!
//! Configuration flows from three layers, strongest first: process
//! environment variables, an optional env file (`.env` by default), and
//! built-in defaults. The result seeds the prompt defaults used by the
//! [`crate::collector`] and, in non-interactive mode, becomes the
//! configuration outright.

pub mod env_file;
pub mod environment;
pub mod settings;

pub use env_file::EnvFile;
pub use environment::{keys, EnvLayer};
pub use settings::{
    has_url_scheme, FieldIds, RunSettings, DEFAULT_CHECKLIST_URL, DEFAULT_OUTPUT_FILE,
    DEFAULT_WEBDRIVER_URL,
};
