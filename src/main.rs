//! evicheck CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use evicheck::cli::Cli;
use evicheck::collector::ConfigCollector;
use evicheck::config::EnvLayer;
use evicheck::runner;
use evicheck::ui::{create_ui, OutputMode, UserInterface};
use evicheck::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("evicheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("evicheck=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Check if running under CI.
fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("evicheck starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let is_interactive = !cli.non_interactive && !is_ci();
    let mut ui = create_ui(is_interactive, output_mode);

    match run(&cli, ui.as_mut()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, ui: &mut dyn UserInterface) -> Result<()> {
    ui.show_header("evicheck · country evidence checklist");

    let env = EnvLayer::load(&cli.env_file)?;
    let mut defaults = env.seed_settings();
    if let Some(url) = &cli.webdriver_url {
        defaults.webdriver_url = url.clone();
    }
    if cli.headless {
        defaults.headless = true;
    }

    let collector = ConfigCollector::new(defaults);
    let Some(settings) = collector.collect(ui)? else {
        ui.message("Operation cancelled by user.");
        return Ok(());
    };

    let outcome = runner::run(&settings, ui)?;
    ui.success(&format!(
        "Checklist run complete: {} countries checked for both providers",
        outcome.countries
    ));
    Ok(())
}
