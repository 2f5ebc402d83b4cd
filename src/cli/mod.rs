//! Command-line interface for evicheck.

pub mod args;

pub use args::Cli;
