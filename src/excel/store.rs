//! The country spreadsheet store.
//!
//! Loads the country list from a fixed row window of the input workbook,
//! holds one verdict per (country, provider) pair, writes verdicts back into
//! the original file, and exports a fresh results workbook.
//!
//! Reading goes through `calamine`, writing through `rust_xlsxwriter`.
//! Because the corpus's Excel stack has no in-place cell editor, `load`
//! captures the cell values of every sheet so `persist` can rewrite the
//! workbook with only the result columns changed.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use crate::error::{EvicheckError, Result};

/// Name of the sheet written by [`CountryStore::export_to`].
pub const EXPORT_SHEET: &str = "Country Data";

/// Column A holds the country names.
const COUNTRY_COL: u32 = 0;

/// Columns B and C hold the two providers' verdicts, row-aligned with A.
const RESULT_COLS: [u16; 2] = [1, 2];

/// An inclusive 1-based row range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    /// First row of the window.
    pub first: u32,
    /// Last row of the window.
    pub last: u32,
}

impl RowWindow {
    /// Number of rows covered.
    pub const fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    /// Whether a 1-based row falls inside the window.
    pub const fn contains(&self, row: u32) -> bool {
        row >= self.first && row <= self.last
    }
}

/// The row window holding country names.
///
/// The source material disagreed on whether the window ended at row 238 or
/// 239; this is the single authoritative bound, pinned by tests.
pub const COUNTRY_WINDOW: RowWindow = RowWindow {
    first: 3,
    last: 238,
};

/// Outcome of one evidence lookup, rendered as `Y`/`N` in the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    /// Evidence text was found.
    Yes,
    /// No evidence text found (also the default before a country is checked).
    #[default]
    No,
}

impl Verdict {
    /// The workbook marker for this verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Yes => "Y",
            Verdict::No => "N",
        }
    }

    /// Verdict from an evidence-check outcome.
    pub fn from_evidence(found: bool) -> Self {
        if found {
            Verdict::Yes
        } else {
            Verdict::No
        }
    }

    /// Parse a workbook cell marker, case-insensitively.
    pub fn parse_cell(value: &str) -> Option<Self> {
        match value.trim() {
            "Y" | "y" => Some(Verdict::Yes),
            "N" | "n" => Some(Verdict::No),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A country name plus the 1-based sheet row it came from.
#[derive(Debug, Clone)]
struct CountryRow {
    row: u32,
    name: String,
}

/// Cell value captured at load time so persist can rewrite the workbook.
#[derive(Debug, Clone)]
enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone)]
struct CapturedSheet {
    name: String,
    /// Absolute 0-based (row, col) positions.
    cells: Vec<(u32, u16, CellValue)>,
}

/// Country list plus per-provider verdicts, bound to one workbook sheet.
#[derive(Debug)]
pub struct CountryStore {
    path: PathBuf,
    sheet_name: String,
    providers: [String; 2],
    countries: Vec<CountryRow>,
    verdicts: HashMap<String, [Verdict; 2]>,
    sheets: Vec<CapturedSheet>,
}

impl CountryStore {
    /// List the sheet names of a workbook without loading it fully.
    pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
        let workbook: Xlsx<std::io::BufReader<std::fs::File>> =
            open_workbook(path).map_err(|e: calamine::XlsxError| EvicheckError::WorkbookOpen {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(workbook.sheet_names().to_vec())
    }

    /// Load the store from `sheet_name` of the workbook at `path`.
    ///
    /// Country names come from column A of the fixed row window; blank
    /// cells are skipped. Existing `Y`/`N` markers in the result columns
    /// are re-adopted so a persisted file reloads to the same verdicts;
    /// anything else defaults to `N`.
    pub fn load(path: &Path, sheet_name: &str, providers: [&str; 2]) -> Result<Self> {
        let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
            open_workbook(path).map_err(|e: calamine::XlsxError| EvicheckError::WorkbookOpen {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let sheet_names = workbook.sheet_names().to_vec();
        if !sheet_names.iter().any(|s| s == sheet_name) {
            return Err(EvicheckError::SheetNotFound {
                sheet: sheet_name.to_string(),
                path: path.to_path_buf(),
            });
        }

        let mut sheets = Vec::with_capacity(sheet_names.len());
        let mut countries = Vec::new();
        let mut verdicts = HashMap::new();

        for name in &sheet_names {
            let range = workbook
                .worksheet_range(name)
                .map_err(|e| EvicheckError::WorkbookOpen {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;

            sheets.push(capture_sheet(name, &range));

            if name == sheet_name {
                for row in COUNTRY_WINDOW.first..=COUNTRY_WINDOW.last {
                    let cell = range.get_value((row - 1, COUNTRY_COL));
                    let country = match cell {
                        Some(Data::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
                        _ => continue,
                    };

                    if verdicts.contains_key(&country) {
                        tracing::warn!(row, %country, "Duplicate country in window; keeping first");
                        continue;
                    }

                    let mut pair = [Verdict::default(); 2];
                    for (idx, col) in RESULT_COLS.iter().enumerate() {
                        if let Some(Data::String(s)) = range.get_value((row - 1, u32::from(*col))) {
                            if let Some(v) = Verdict::parse_cell(s.as_str()) {
                                pair[idx] = v;
                            }
                        }
                    }

                    verdicts.insert(country.clone(), pair);
                    countries.push(CountryRow { row, name: country });
                }
            }
        }

        tracing::debug!(
            countries = countries.len(),
            sheet = sheet_name,
            "Loaded country window"
        );

        Ok(Self {
            path: path.to_path_buf(),
            sheet_name: sheet_name.to_string(),
            providers: [providers[0].to_string(), providers[1].to_string()],
            countries,
            verdicts,
            sheets,
        })
    }

    /// Number of countries loaded.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Whether the window contained no countries.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Country names in spreadsheet row order.
    pub fn country_names(&self) -> Vec<String> {
        self.countries.iter().map(|c| c.name.clone()).collect()
    }

    /// The two configured provider labels, in pass order.
    pub fn providers(&self) -> [&str; 2] {
        [&self.providers[0], &self.providers[1]]
    }

    /// Index of a provider label, if configured.
    pub fn provider_index(&self, provider: &str) -> Option<usize> {
        self.providers.iter().position(|p| p == provider)
    }

    /// Current verdict pair for a country.
    pub fn verdicts(&self, country: &str) -> Option<[Verdict; 2]> {
        self.verdicts.get(country).copied()
    }

    /// Overwrite both providers' verdicts for a country.
    ///
    /// An unknown country is a logged warning, not an error, and leaves the
    /// store untouched.
    pub fn update(&mut self, country: &str, first: Verdict, second: Verdict) {
        match self.verdicts.get_mut(country) {
            Some(pair) => *pair = [first, second],
            None => {
                tracing::warn!(%country, "Country not found in spreadsheet list; skipping update");
            }
        }
    }

    /// Write verdicts back into the original workbook.
    ///
    /// Every captured sheet is rewritten value-for-value; the result columns
    /// of the country sheet are replaced with the current verdicts, aligned
    /// with each country's original row. Overwrites the source file.
    pub fn persist(&self) -> Result<()> {
        let mut workbook = Workbook::new();

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .map_err(|e| self.write_error(&self.path, e))?;

            for (row, col, value) in &sheet.cells {
                let result = match value {
                    CellValue::Text(s) => worksheet.write_string(*row, *col, s),
                    CellValue::Number(n) => worksheet.write_number(*row, *col, *n),
                    CellValue::Bool(b) => worksheet.write_boolean(*row, *col, *b),
                };
                result.map_err(|e| self.write_error(&self.path, e))?;
            }

            if sheet.name == self.sheet_name {
                for country in &self.countries {
                    let pair = self
                        .verdicts
                        .get(&country.name)
                        .copied()
                        .unwrap_or_default();
                    for (idx, col) in RESULT_COLS.iter().enumerate() {
                        worksheet
                            .write_string(country.row - 1, *col, pair[idx].as_str())
                            .map_err(|e| self.write_error(&self.path, e))?;
                    }
                }
            }
        }

        workbook
            .save(&self.path)
            .map_err(|e| self.write_error(&self.path, e))?;

        tracing::info!(path = %self.path.display(), "Updated original workbook");
        Ok(())
    }

    /// Export a fresh results workbook to `path`.
    ///
    /// One sheet named [`EXPORT_SHEET`]: a header row of country and the two
    /// provider labels, then one row per country in store order.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(EXPORT_SHEET)
            .map_err(|e| self.write_error(path, e))?;

        worksheet
            .write_string(0, 0, "Country")
            .and_then(|ws| ws.write_string(0, 1, &self.providers[0]))
            .and_then(|ws| ws.write_string(0, 2, &self.providers[1]))
            .map_err(|e| self.write_error(path, e))?;

        for (i, country) in self.countries.iter().enumerate() {
            let row = (i + 1) as u32;
            let pair = self
                .verdicts
                .get(&country.name)
                .copied()
                .unwrap_or_default();
            worksheet
                .write_string(row, 0, &country.name)
                .and_then(|ws| ws.write_string(row, 1, pair[0].as_str()))
                .and_then(|ws| ws.write_string(row, 2, pair[1].as_str()))
                .map_err(|e| self.write_error(path, e))?;
        }

        workbook
            .save(path)
            .map_err(|e| self.write_error(path, e))?;

        tracing::info!(path = %path.display(), rows = self.countries.len(), "Exported results");
        Ok(())
    }

    fn write_error(&self, path: &Path, e: rust_xlsxwriter::XlsxError) -> EvicheckError {
        EvicheckError::WorkbookWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }

    /// Build a store directly from parts (tests only).
    #[cfg(test)]
    pub(crate) fn for_tests(providers: [&str; 2], names: &[&str]) -> Self {
        let countries = names
            .iter()
            .enumerate()
            .map(|(i, name)| CountryRow {
                row: COUNTRY_WINDOW.first + i as u32,
                name: (*name).to_string(),
            })
            .collect::<Vec<_>>();
        let verdicts = countries
            .iter()
            .map(|c| (c.name.clone(), [Verdict::default(); 2]))
            .collect();
        Self {
            path: PathBuf::from("unused.xlsx"),
            sheet_name: "Sheet1".to_string(),
            providers: [providers[0].to_string(), providers[1].to_string()],
            countries,
            verdicts,
            sheets: Vec::new(),
        }
    }
}

/// Capture a sheet's cell values for later rewriting.
fn capture_sheet(name: &str, range: &calamine::Range<Data>) -> CapturedSheet {
    let mut cells = Vec::new();
    if let Some((start_row, start_col)) = range.start() {
        for (row, col, data) in range.used_cells() {
            let abs_row = start_row + row as u32;
            let abs_col = (start_col + col as u32) as u16;
            let value = match data {
                Data::String(s) => CellValue::Text(s.clone()),
                Data::Int(i) => CellValue::Number(*i as f64),
                Data::Float(f) => CellValue::Number(*f),
                Data::Bool(b) => CellValue::Bool(*b),
                Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
                Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
                Data::Error(_) | Data::Empty => continue,
            };
            cells.push((abs_row, abs_col, value));
        }
    }
    CapturedSheet {
        name: name.to_string(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_covers_236_rows() {
        assert_eq!(COUNTRY_WINDOW.first, 3);
        assert_eq!(COUNTRY_WINDOW.last, 238);
        assert_eq!(COUNTRY_WINDOW.len(), 236);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        assert!(COUNTRY_WINDOW.contains(3));
        assert!(COUNTRY_WINDOW.contains(238));
        assert!(!COUNTRY_WINDOW.contains(2));
        assert!(!COUNTRY_WINDOW.contains(239));
    }

    #[test]
    fn verdict_renders_as_markers() {
        assert_eq!(Verdict::Yes.as_str(), "Y");
        assert_eq!(Verdict::No.as_str(), "N");
        assert_eq!(Verdict::Yes.to_string(), "Y");
    }

    #[test]
    fn verdict_default_is_no() {
        assert_eq!(Verdict::default(), Verdict::No);
    }

    #[test]
    fn verdict_from_evidence() {
        assert_eq!(Verdict::from_evidence(true), Verdict::Yes);
        assert_eq!(Verdict::from_evidence(false), Verdict::No);
    }

    #[test]
    fn verdict_parses_cell_markers_case_insensitively() {
        assert_eq!(Verdict::parse_cell("Y"), Some(Verdict::Yes));
        assert_eq!(Verdict::parse_cell(" n "), Some(Verdict::No));
        assert_eq!(Verdict::parse_cell("maybe"), None);
        assert_eq!(Verdict::parse_cell(""), None);
    }

    #[test]
    fn update_overwrites_both_verdicts() {
        let mut store = CountryStore::for_tests(["UON", "PEACH"], &["Brazil", "Chad"]);
        store.update("Brazil", Verdict::Yes, Verdict::No);
        assert_eq!(store.verdicts("Brazil"), Some([Verdict::Yes, Verdict::No]));
        assert_eq!(store.verdicts("Chad"), Some([Verdict::No, Verdict::No]));
    }

    #[test]
    fn update_unknown_country_is_a_noop() {
        let mut store = CountryStore::for_tests(["UON", "PEACH"], &["Brazil"]);
        store.update("Atlantis", Verdict::Yes, Verdict::Yes);
        assert_eq!(store.verdicts("Atlantis"), None);
        assert_eq!(store.verdicts("Brazil"), Some([Verdict::No, Verdict::No]));
    }

    #[test]
    fn country_names_preserve_order() {
        let store = CountryStore::for_tests(["A", "B"], &["Chad", "Brazil", "Albania"]);
        assert_eq!(store.country_names(), ["Chad", "Brazil", "Albania"]);
    }

    #[test]
    fn provider_index_matches_labels() {
        let store = CountryStore::for_tests(["UON", "PEACH"], &[]);
        assert_eq!(store.provider_index("UON"), Some(0));
        assert_eq!(store.provider_index("PEACH"), Some(1));
        assert_eq!(store.provider_index("Other"), None);
    }

    #[test]
    fn empty_store_reports_empty() {
        let store = CountryStore::for_tests(["A", "B"], &[]);
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
