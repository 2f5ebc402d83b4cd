//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses, including queues for prompts that
//! repeat (re-prompt loops).
//!
//! # Example
//!
//! ```
//! use evicheck::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("sheet", "Countries");
//!
//! ui.message("Loading workbook");
//! ui.success("Done!");
//!
//! assert!(ui.messages().contains(&"Loading workbook".to_string()));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::error::{EvicheckError, Result};

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    progress: Vec<(usize, usize)>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
    spinner_log: Arc<Mutex<Vec<String>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode, interactive by default.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            interactive: true,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order; after the queue is exhausted the
    /// single response set via [`Self::set_prompt_response`] applies.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Keys of all prompts shown, in order.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Messages set on spinners, in order.
    pub fn spinner_messages(&self) -> Vec<String> {
        self.spinner_log.lock().expect("spinner log lock").clone()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let response = self
            .prompt_queues
            .get_mut(&prompt.key)
            .and_then(|q| q.pop_front())
            .or_else(|| self.prompt_responses.get(&prompt.key).cloned())
            .or_else(|| prompt.default.clone());

        match response {
            Some(value) => match prompt.prompt_type {
                PromptType::Confirm => {
                    let yes = value.to_lowercase() == "true" || value == "y" || value == "yes";
                    Ok(PromptResult::Bool(yes))
                }
                _ => Ok(PromptResult::String(value)),
            },
            None => Err(EvicheckError::SettingsValidation {
                message: format!("MockUI has no response for prompt '{}'", prompt.key),
            }),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let log = Arc::clone(&self.spinner_log);
        log.lock().expect("spinner log lock").push(message.to_string());
        Box::new(MockSpinner { log })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        self.progress.push((current, total));
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner that records every message it is given.
pub struct MockSpinner {
    log: Arc<Mutex<Vec<String>>>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.log.lock().expect("spinner log lock").push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.log
            .lock()
            .expect("spinner log lock")
            .push(format!("✓ {}", msg));
    }

    fn finish_error(&mut self, msg: &str) {
        self.log
            .lock()
            .expect("spinner log lock")
            .push(format!("✗ {}", msg));
    }
}
