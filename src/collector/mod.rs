//! Configuration collection.
//!
//! A single `collect` capability drives the whole pre-run form over the
//! [`UserInterface`] abstraction: a TTY gets interactive prompts with
//! re-prompting on invalid input, a headless run answers every prompt from
//! environment overrides and defaults and treats invalid input as fatal.
//! Field order and validation rules follow the original configuration form.

use std::path::{Path, PathBuf};

use crate::config::{has_url_scheme, RunSettings};
use crate::error::{EvicheckError, Result};
use crate::excel::CountryStore;
use crate::ui::{Prompt, PromptOption, UserInterface};

/// Collects a validated [`RunSettings`] from the user.
pub struct ConfigCollector {
    defaults: RunSettings,
}

impl ConfigCollector {
    /// Create a collector whose prompts are prefilled from `defaults`
    /// (typically seeded from the environment layer).
    pub fn new(defaults: RunSettings) -> Self {
        Self { defaults }
    }

    /// Run the configuration form.
    ///
    /// Returns `Ok(None)` when the user declines the final confirmation;
    /// nothing has been mutated at that point. On confirmation the output
    /// file's parent directory is created if absent.
    pub fn collect(&self, ui: &mut dyn UserInterface) -> Result<Option<RunSettings>> {
        let input_file = self.ask_input_file(ui)?;
        let sheet_name = self.ask_sheet_name(ui, &input_file)?;
        let website_url = self.ask_website_url(ui)?;
        let provider1 = self.ask_provider(ui, "provider1", "Provider 1 name", &self.defaults.provider1)?;
        let provider2 = self.ask_provider(ui, "provider2", "Provider 2 name", &self.defaults.provider2)?;
        let output_file = self.ask_output_file(ui)?;

        let settings = RunSettings {
            input_file: PathBuf::from(&input_file),
            sheet_name,
            website_url,
            provider1,
            provider2,
            output_file: PathBuf::from(&output_file),
            webdriver_url: self.defaults.webdriver_url.clone(),
            headless: self.defaults.headless,
            fields: self.defaults.fields.clone(),
        };
        settings.validate()?;

        ui.message("");
        ui.message("Configuration summary:");
        ui.message(&format!("  Input file:   {}", settings.input_file.display()));
        ui.message(&format!("  Sheet name:   {}", settings.sheet_name));
        ui.message(&format!("  Website URL:  {}", settings.website_url));
        ui.message(&format!("  Provider 1:   {}", settings.provider1));
        ui.message(&format!("  Provider 2:   {}", settings.provider2));
        ui.message(&format!("  Output file:  {}", settings.output_file.display()));

        let confirmed = ui
            .prompt(&Prompt::confirm(
                "start",
                "Start the checklist run with these settings?",
                true,
            ))?
            .as_bool()
            .unwrap_or(false);

        if !confirmed {
            ui.message("Configuration cancelled.");
            return Ok(None);
        }

        ensure_output_dir(&settings.output_file)?;
        Ok(Some(settings))
    }

    fn ask_input_file(&self, ui: &mut dyn UserInterface) -> Result<String> {
        let default = path_default(&self.defaults.input_file);
        let prompt = Prompt::input("input_file", "Path to the input workbook", default.as_deref());
        self.ask(ui, prompt, |value| {
            if value.is_empty() {
                Err("input file path must not be empty".to_string())
            } else if !Path::new(value).exists() {
                Err(format!("input file '{}' does not exist", value))
            } else {
                Ok(())
            }
        })
    }

    /// Sheet auto-detection: a single sheet is taken as-is, several offer a
    /// selection, and an unreadable workbook falls back to free text.
    fn ask_sheet_name(&self, ui: &mut dyn UserInterface, input_file: &str) -> Result<String> {
        match CountryStore::sheet_names(Path::new(input_file)) {
            Ok(names) if names.len() == 1 => {
                ui.message(&format!("Auto-detected sheet: {}", names[0]));
                Ok(names[0].clone())
            }
            Ok(names) if !names.is_empty() => {
                let default = if names.iter().any(|n| *n == self.defaults.sheet_name) {
                    self.defaults.sheet_name.clone()
                } else {
                    names[0].clone()
                };
                let options = names.iter().map(|n| PromptOption::plain(n)).collect();
                let mut prompt = Prompt::select("sheet", "Select the sheet to read", options);
                prompt.default = Some(default);
                Ok(ui.prompt(&prompt)?.as_string())
            }
            Ok(_) | Err(_) => {
                ui.warning("Could not list sheets; enter the sheet name manually");
                let default = non_empty(&self.defaults.sheet_name);
                let prompt = Prompt::input("sheet", "Sheet name", default.as_deref());
                self.ask(ui, prompt, |value| {
                    if value.is_empty() {
                        Err("sheet name must not be empty".to_string())
                    } else {
                        Ok(())
                    }
                })
            }
        }
    }

    fn ask_website_url(&self, ui: &mut dyn UserInterface) -> Result<String> {
        let prompt = Prompt::input(
            "website_url",
            "Document checklist website URL",
            Some(&self.defaults.website_url),
        );
        self.ask(ui, prompt, |value| {
            if has_url_scheme(value) {
                Ok(())
            } else {
                Err(format!(
                    "website URL '{}' must start with http:// or https://",
                    value
                ))
            }
        })
    }

    fn ask_provider(
        &self,
        ui: &mut dyn UserInterface,
        key: &str,
        question: &str,
        default: &str,
    ) -> Result<String> {
        let default = non_empty(default);
        let prompt = Prompt::input(key, question, default.as_deref());
        self.ask(ui, prompt, |value| {
            if value.is_empty() {
                Err(format!("{} must not be empty", question.to_lowercase()))
            } else {
                Ok(())
            }
        })
    }

    fn ask_output_file(&self, ui: &mut dyn UserInterface) -> Result<String> {
        let default = path_default(&self.defaults.output_file);
        let prompt = Prompt::input("output_file", "Output workbook path", default.as_deref());
        self.ask(ui, prompt, |value| {
            if value.is_empty() {
                Err("output file path must not be empty".to_string())
            } else {
                Ok(())
            }
        })
    }

    /// Ask until the answer validates. Interactive mode re-prompts with the
    /// specific message; non-interactive mode fails on the first invalid
    /// answer.
    fn ask(
        &self,
        ui: &mut dyn UserInterface,
        prompt: Prompt,
        validate: impl Fn(&str) -> std::result::Result<(), String>,
    ) -> Result<String> {
        loop {
            let answer = ui.prompt(&prompt)?.as_string();
            let answer = answer.trim();
            match validate(answer) {
                Ok(()) => return Ok(answer.to_string()),
                Err(message) if ui.is_interactive() => ui.error(&message),
                Err(message) => return Err(EvicheckError::SettingsValidation { message }),
            }
        }
    }
}

/// Create the output file's parent directory when it does not exist yet.
fn ensure_output_dir(output_file: &Path) -> Result<()> {
    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::debug!(dir = %parent.display(), "Created output directory");
        }
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn path_default(path: &Path) -> Option<String> {
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path.display().to_string())
    }
}
