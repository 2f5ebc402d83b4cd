//! Run orchestration.
//!
//! Wires the collected settings through the whole flow: load the country
//! store, start the browser, sweep the country list once per provider,
//! write results back, export, and close the browser on every exit path,
//! error paths included.

use std::path::PathBuf;

use crate::config::RunSettings;
use crate::error::Result;
use crate::excel::CountryStore;
use crate::session::{run_provider_pass, FormSession, PassStats};
use crate::ui::UserInterface;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// Countries processed per pass.
    pub countries: usize,
    /// Per-provider pass counters, in pass order.
    pub pass_stats: [PassStats; 2],
    /// The original workbook that was updated in place.
    pub input_file: PathBuf,
    /// The exported results workbook.
    pub output_file: PathBuf,
}

/// Execute a full checklist run with validated settings.
pub fn run(settings: &RunSettings, ui: &mut dyn UserInterface) -> Result<RunOutcome> {
    let mut store = CountryStore::load(
        &settings.input_file,
        &settings.sheet_name,
        settings.providers(),
    )?;

    if store.is_empty() {
        ui.warning("No countries found in the configured row window");
    } else {
        ui.message(&format!(
            "Loaded {} countries from sheet '{}'",
            store.len(),
            settings.sheet_name
        ));
    }

    let session = FormSession::connect(
        &settings.webdriver_url,
        settings.headless,
        settings.fields.clone(),
    )?;

    let passes = drive_passes(session, &mut store, settings, ui);
    let pass_stats = passes?;

    store.persist()?;
    store.export_to(&settings.output_file)?;

    ui.success(&format!(
        "Updated original file: {}",
        settings.input_file.display()
    ));
    ui.success(&format!(
        "Exported results to: {}",
        settings.output_file.display()
    ));

    Ok(RunOutcome {
        countries: store.len(),
        pass_stats,
        input_file: settings.input_file.clone(),
        output_file: settings.output_file.clone(),
    })
}

/// Open the site and run both provider passes, closing the browser no
/// matter how far things got.
fn drive_passes(
    mut session: FormSession,
    store: &mut CountryStore,
    settings: &RunSettings,
    ui: &mut dyn UserInterface,
) -> Result<[PassStats; 2]> {
    let result = (|| {
        session.open(&settings.website_url)?;

        let countries = store.country_names();
        let providers = settings.providers();
        let mut stats = [PassStats::default(); 2];

        for (i, provider) in providers.into_iter().enumerate() {
            ui.show_progress(i + 1, providers.len());
            let mut spinner = ui.start_spinner(&format!("Checking countries for {}", provider));

            match run_provider_pass(&mut session, &countries, store, provider, spinner.as_mut()) {
                Ok(s) => {
                    spinner.finish_success(&format!(
                        "{}: evidence required for {} of {} countries",
                        provider, s.evidence_found, s.processed
                    ));
                    if ui.output_mode().shows_detail() && s.step_failures > 0 {
                        ui.message(&format!(
                            "  {} sub-steps failed and were recorded as N",
                            s.step_failures
                        ));
                    }
                    stats[i] = s;
                }
                Err(e) => {
                    spinner.finish_error(&format!("Pass for {} failed", provider));
                    return Err(e);
                }
            }
        }
        Ok(stats)
    })();

    let close_result = session.close();
    let stats = result?;
    close_result?;
    Ok(stats)
}
