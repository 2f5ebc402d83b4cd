//! The form-filling browser session.
//!
//! This module provides:
//! - [`ChecklistForm`] trait, the seam between the pass loop and the page,
//!   so the loop is testable without a browser
//! - [`run_provider_pass`], one sweep over the country list for a provider
//! - [`FormSession`], the WebDriver-backed implementation, driving a
//!   running chromedriver through `thirtyfour`
//!
//! The WebDriver client is async; the session owns a dedicated
//! current-thread tokio runtime and exposes a blocking API so the rest of
//! the program stays synchronous. Every element lookup is a bounded
//! wait-for-condition query; there are no fixed sleeps and no retries.

pub mod evidence;

pub use evidence::{headings_contain_evidence, EVIDENCE_PHRASES};

use std::future::Future;
use std::time::Duration;

use thirtyfour::prelude::*;
use thirtyfour::Key;

use crate::config::FieldIds;
use crate::error::{EvicheckError, Result};
use crate::excel::{CountryStore, Verdict};
use crate::ui::SpinnerHandle;

/// How long an element lookup may wait before timing out.
const WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Poll interval for element lookups.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// CSS class of the search box select2 opens for a searchable dropdown.
const SEARCH_FIELD_CLASS: &str = "select2-search__field";

/// CSS class of the visible options in an open select2 dropdown.
const RESULT_OPTION_CLASS: &str = "select2-results__option";

/// Where the session is within one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No page open yet.
    #[default]
    Idle,
    /// The checklist site is loaded.
    WebsiteOpen,
    /// A country has been chosen.
    CountrySelected,
    /// The education provider has been chosen.
    ProviderSelected,
    /// The fixed radio option has been chosen.
    OptionSelected,
    /// The response page's headings have been scanned.
    EvidenceChecked,
}

/// Page interactions needed by the pass loop.
pub trait ChecklistForm {
    /// Select a country in the searchable passport dropdown by typing its
    /// exact name and confirming.
    fn select_country(&mut self, country: &str) -> Result<()>;

    /// Select the education provider by matching visible option text.
    fn select_provider(&mut self, provider: &str) -> Result<()>;

    /// Select the fixed radio option.
    fn select_study_option(&mut self) -> Result<()>;

    /// Submit the form ("display evidence").
    fn submit_evidence(&mut self) -> Result<()>;

    /// Text of every level-3 heading on the resulting page.
    fn evidence_headings(&mut self) -> Result<Vec<String>>;
}

/// Counters from one provider pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Countries processed.
    pub processed: usize,
    /// Countries where an evidence phrase was found.
    pub evidence_found: usize,
    /// Sub-steps that failed and were degraded to the default verdict.
    pub step_failures: usize,
}

/// Sweep the country list once for `provider`, writing verdicts into the
/// store.
///
/// The provider is selected exactly once, on the first country; the site
/// retains the selection across country changes within a session. A failed
/// selection is logged and not retried. Every other sub-step failure is
/// logged and degrades that country's verdict to `N`; nothing halts the
/// loop. The other provider's stored verdict is never touched.
pub fn run_provider_pass(
    form: &mut dyn ChecklistForm,
    countries: &[String],
    store: &mut CountryStore,
    provider: &str,
    spinner: &mut dyn SpinnerHandle,
) -> Result<PassStats> {
    let provider_idx =
        store
            .provider_index(provider)
            .ok_or_else(|| EvicheckError::SettingsValidation {
                message: format!("provider '{}' is not configured in the store", provider),
            })?;

    let mut stats = PassStats::default();
    let mut provider_selected = false;
    let total = countries.len();

    for (i, country) in countries.iter().enumerate() {
        spinner.set_message(&format!("{} · {} ({}/{})", provider, country, i + 1, total));
        tracing::debug!(%country, %provider, "Processing country");

        if let Err(e) = form.select_country(country) {
            tracing::warn!(%country, error = %e, "Country selection failed");
            stats.step_failures += 1;
        }

        if !provider_selected {
            // One attempt per pass, successful or not.
            provider_selected = true;
            if let Err(e) = form.select_provider(provider) {
                tracing::warn!(%provider, error = %e, "Provider selection failed");
                stats.step_failures += 1;
            }
        }

        if let Err(e) = form.select_study_option() {
            tracing::warn!(%country, error = %e, "Radio selection failed");
            stats.step_failures += 1;
        }

        if let Err(e) = form.submit_evidence() {
            tracing::warn!(%country, error = %e, "Submit failed");
            stats.step_failures += 1;
        }

        let found = match form.evidence_headings() {
            Ok(headings) => headings_contain_evidence(&headings),
            Err(e) => {
                tracing::warn!(%country, error = %e, "Evidence check failed; recording N");
                stats.step_failures += 1;
                false
            }
        };

        if found {
            stats.evidence_found += 1;
        }

        let mut pair = store.verdicts(country).unwrap_or_default();
        pair[provider_idx] = Verdict::from_evidence(found);
        store.update(country, pair[0], pair[1]);
        stats.processed += 1;
    }

    tracing::info!(
        %provider,
        processed = stats.processed,
        evidence_found = stats.evidence_found,
        step_failures = stats.step_failures,
        "Provider pass complete"
    );
    Ok(stats)
}

/// WebDriver-backed checklist form session.
pub struct FormSession {
    runtime: tokio::runtime::Runtime,
    driver: Option<WebDriver>,
    fields: FieldIds,
    state: SessionState,
}

impl FormSession {
    /// Start a browser session against a running WebDriver endpoint.
    pub fn connect(webdriver_url: &str, headless: bool, fields: FieldIds) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let connect_err = |message: String| EvicheckError::WebDriverConnect {
            url: webdriver_url.to_string(),
            message,
        };

        let mut caps = DesiredCapabilities::chrome();
        if headless {
            caps.add_chrome_option(
                "args",
                vec![
                    "--headless=new",
                    "--no-sandbox",
                    "--disable-gpu",
                    "--window-size=1920,1080",
                ],
            )
            .map_err(|e| connect_err(e.to_string()))?;
        }

        let driver = runtime
            .block_on(WebDriver::new(webdriver_url, caps))
            .map_err(|e| connect_err(e.to_string()))?;

        tracing::info!(url = webdriver_url, headless, "Browser session started");

        Ok(Self {
            runtime,
            driver: Some(driver),
            fields,
            state: SessionState::Idle,
        })
    }

    /// Navigate to the checklist site and wait for the document body.
    pub fn open(&mut self, url: &str) -> Result<()> {
        let step = "open website";
        let driver = self.driver(step)?;
        self.runtime
            .block_on(driver.goto(url))
            .map_err(|e| automation(step, e))?;
        self.wait_for(By::Tag("body"), step)?;
        self.state = SessionState::WebsiteOpen;
        tracing::info!(url, "Website loaded");
        Ok(())
    }

    /// Current position in the lookup state machine.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Quit the browser. Invoked by the runner on every exit path.
    pub fn close(mut self) -> Result<()> {
        if let Some(driver) = self.driver.take() {
            self.runtime
                .block_on(driver.quit())
                .map_err(|e| automation("close browser", e))?;
            tracing::info!("Browser session closed");
        }
        Ok(())
    }

    fn driver(&self, step: &str) -> Result<&WebDriver> {
        self.driver.as_ref().ok_or_else(|| EvicheckError::Automation {
            step: step.to_string(),
            message: "browser session already closed".to_string(),
        })
    }

    /// Bounded wait for an element; timeout exhaustion is the distinct
    /// interaction-timeout error kind.
    fn wait_for(&self, by: By, step: &str) -> Result<WebElement> {
        let driver = self.driver(step)?;
        self.runtime
            .block_on(
                driver
                    .query(by)
                    .wait(WAIT_TIMEOUT, POLL_INTERVAL)
                    .first(),
            )
            .map_err(|e| EvicheckError::InteractionTimeout {
                step: step.to_string(),
                message: e.to_string(),
            })
    }

    fn block<T>(
        &self,
        step: &str,
        fut: impl Future<Output = WebDriverResult<T>>,
    ) -> Result<T> {
        self.runtime
            .block_on(fut)
            .map_err(|e| automation(step, e))
    }
}

fn automation(step: &str, e: impl std::fmt::Display) -> EvicheckError {
    EvicheckError::Automation {
        step: step.to_string(),
        message: e.to_string(),
    }
}

impl ChecklistForm for FormSession {
    fn select_country(&mut self, country: &str) -> Result<()> {
        let step = "select country";
        let dropdown = self.wait_for(By::Id(&self.fields.passport), step)?;
        self.block(step, dropdown.click())?;

        let search = self.wait_for(By::ClassName(SEARCH_FIELD_CLASS), step)?;
        self.block(step, search.send_keys(country))?;
        self.block(step, search.send_keys(Key::Enter + ""))?;

        self.state = SessionState::CountrySelected;
        tracing::debug!(%country, "Country selected");
        Ok(())
    }

    fn select_provider(&mut self, provider: &str) -> Result<()> {
        let step = "select provider";
        let dropdown = self.wait_for(By::Id(&self.fields.provider), step)?;
        self.block(step, dropdown.click())?;

        let search = self.wait_for(By::ClassName(SEARCH_FIELD_CLASS), step)?;
        self.block(step, search.send_keys(provider))?;

        // First option appearing means the result list has populated.
        self.wait_for(By::ClassName(RESULT_OPTION_CLASS), step)?;
        let driver = self.driver(step)?;
        let options = self.block(step, driver.find_all(By::ClassName(RESULT_OPTION_CLASS)))?;

        for option in options {
            let text = self.block(step, option.text())?;
            if text.contains(provider) {
                self.block(step, option.click())?;
                self.state = SessionState::ProviderSelected;
                tracing::debug!(%provider, "Provider selected");
                return Ok(());
            }
        }

        Err(EvicheckError::Automation {
            step: step.to_string(),
            message: format!("no visible option matched '{}'", provider),
        })
    }

    fn select_study_option(&mut self) -> Result<()> {
        let step = "select radio option";
        let radio = self.wait_for(By::Id(&self.fields.radio), step)?;
        self.block(step, radio.click())?;
        self.state = SessionState::OptionSelected;
        Ok(())
    }

    fn submit_evidence(&mut self) -> Result<()> {
        let step = "submit evidence";
        let button = self.wait_for(By::Id(&self.fields.submit), step)?;
        self.block(step, button.click())?;
        Ok(())
    }

    fn evidence_headings(&mut self) -> Result<Vec<String>> {
        let step = "scan evidence headings";
        // At least one heading rendering means the response has settled.
        self.wait_for(By::Tag("h3"), step)?;

        let driver = self.driver(step)?;
        let elements = self.block(step, driver.find_all(By::Tag("h3")))?;

        let mut headings = Vec::with_capacity(elements.len());
        for element in elements {
            headings.push(self.block(step, element.text())?);
        }
        self.state = SessionState::EvidenceChecked;
        Ok(headings)
    }
}
