//! Output verbosity modes.

/// How much the UI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Errors and final results only.
    Quiet,
    /// Status messages, spinners, summaries.
    #[default]
    Normal,
    /// Everything, including per-country detail.
    Verbose,
}

impl OutputMode {
    /// Whether status messages should print.
    pub fn shows_status(&self) -> bool {
        !matches!(self, OutputMode::Quiet)
    }

    /// Whether spinners should render.
    pub fn shows_spinners(&self) -> bool {
        !matches!(self, OutputMode::Quiet)
    }

    /// Whether per-country detail should print.
    pub fn shows_detail(&self) -> bool {
        matches!(self, OutputMode::Verbose)
    }
}
