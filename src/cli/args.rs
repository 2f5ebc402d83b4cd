//! CLI argument definitions.
//!
//! A single-purpose tool: one implicit run command, configured by flags.

use clap::Parser;
use std::path::PathBuf;

/// evicheck - Country evidence-checklist automation.
#[derive(Debug, Parser)]
#[command(name = "evicheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to an env file with EVICHECK_* settings
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Answer prompts from the environment instead of interactively
    #[arg(long)]
    pub non_interactive: bool,

    /// Run the browser headless
    #[arg(long)]
    pub headless: bool,

    /// WebDriver endpoint to drive
    #[arg(long, env = "EVICHECK_WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_interactive() {
        let cli = Cli::parse_from(["evicheck"]);
        assert!(!cli.non_interactive);
        assert!(!cli.headless);
        assert_eq!(cli.env_file, PathBuf::from(".env"));
        assert_eq!(cli.webdriver_url, None);
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::parse_from([
            "evicheck",
            "--non-interactive",
            "--headless",
            "--webdriver-url",
            "http://localhost:4444",
        ]);
        assert!(cli.non_interactive);
        assert!(cli.headless);
        assert_eq!(
            cli.webdriver_url,
            Some("http://localhost:4444".to_string())
        );
    }

    #[test]
    fn parses_env_file_override() {
        let cli = Cli::parse_from(["evicheck", "--env-file", "deploy.env"]);
        assert_eq!(cli.env_file, PathBuf::from("deploy.env"));
    }

    #[test]
    fn verbosity_flags_parse() {
        let cli = Cli::parse_from(["evicheck", "--quiet"]);
        assert!(cli.quiet);
        let cli = Cli::parse_from(["evicheck", "-v"]);
        assert!(cli.verbose);
    }
}
