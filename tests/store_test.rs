//! Country store integration tests against real workbook files.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use evicheck::excel::{CountryStore, Verdict, COUNTRY_WINDOW, EXPORT_SHEET};
use rust_xlsxwriter::Workbook;

/// Write a minimal input workbook: a title cell above the window and the
/// given countries from the first window row down, all in column A.
fn write_fixture(path: &Path, sheet: &str, countries: &[&str]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();
    worksheet.write_string(0, 0, "Country list").unwrap();
    for (i, country) in countries.iter().enumerate() {
        worksheet
            .write_string(COUNTRY_WINDOW.first - 1 + i as u32, 0, *country)
            .unwrap();
    }
    workbook.save(path).unwrap();
}

#[test]
fn load_reads_window_in_row_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.xlsx");
    write_fixture(&path, "Countries", &["Brazil", "Chad"]);

    let store = CountryStore::load(&path, "Countries", ["UON", "PEACH"]).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.country_names(), ["Brazil", "Chad"]);
    assert_eq!(store.verdicts("Brazil"), Some([Verdict::No, Verdict::No]));
    assert_eq!(store.verdicts("Chad"), Some([Verdict::No, Verdict::No]));
}

#[test]
fn load_missing_file_is_an_error() {
    let result = CountryStore::load(Path::new("/no/such/file.xlsx"), "S", ["A", "B"]);
    assert!(result.is_err());
}

#[test]
fn load_missing_sheet_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.xlsx");
    write_fixture(&path, "Countries", &["Brazil"]);

    let err = CountryStore::load(&path, "Missing", ["A", "B"]).unwrap_err();
    assert!(err.to_string().contains("Missing"));
}

#[test]
fn rows_outside_the_window_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Countries").unwrap();
    // Row 2: above the window. Last window row and the row after it.
    worksheet.write_string(1, 0, "Header").unwrap();
    worksheet
        .write_string(COUNTRY_WINDOW.first - 1, 0, "Brazil")
        .unwrap();
    worksheet
        .write_string(COUNTRY_WINDOW.last - 1, 0, "Zimbabwe")
        .unwrap();
    worksheet
        .write_string(COUNTRY_WINDOW.last, 0, "Atlantis")
        .unwrap();
    workbook.save(&path).unwrap();

    let store = CountryStore::load(&path, "Countries", ["UON", "PEACH"]).unwrap();
    assert_eq!(store.country_names(), ["Brazil", "Zimbabwe"]);
}

#[test]
fn blank_cells_inside_the_window_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Countries").unwrap();
    worksheet
        .write_string(COUNTRY_WINDOW.first - 1, 0, "Brazil")
        .unwrap();
    // Row 4 left blank.
    worksheet
        .write_string(COUNTRY_WINDOW.first + 1, 0, "Chad")
        .unwrap();
    workbook.save(&path).unwrap();

    let store = CountryStore::load(&path, "Countries", ["UON", "PEACH"]).unwrap();
    assert_eq!(store.country_names(), ["Brazil", "Chad"]);
}

#[test]
fn persist_then_reload_round_trips_order_and_verdicts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.xlsx");
    write_fixture(&path, "Countries", &["Brazil", "Chad"]);

    let mut store = CountryStore::load(&path, "Countries", ["UON", "PEACH"]).unwrap();
    store.update("Brazil", Verdict::Yes, Verdict::No);
    store.persist().unwrap();

    let reloaded = CountryStore::load(&path, "Countries", ["UON", "PEACH"]).unwrap();
    assert_eq!(reloaded.country_names(), ["Brazil", "Chad"]);
    assert_eq!(reloaded.verdicts("Brazil"), Some([Verdict::Yes, Verdict::No]));
    assert_eq!(reloaded.verdicts("Chad"), Some([Verdict::No, Verdict::No]));
}

#[test]
fn persist_keeps_cells_outside_the_result_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.xlsx");
    write_fixture(&path, "Countries", &["Brazil"]);

    let store = CountryStore::load(&path, "Countries", ["UON", "PEACH"]).unwrap();
    store.persist().unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("Countries").unwrap();
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("Country list".to_string()))
    );
    assert_eq!(
        range.get_value((COUNTRY_WINDOW.first - 1, 1)),
        Some(&Data::String("N".to_string()))
    );
}

#[test]
fn persist_keeps_other_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.xlsx");

    let mut workbook = Workbook::new();
    let first = workbook.add_worksheet();
    first.set_name("Countries").unwrap();
    first
        .write_string(COUNTRY_WINDOW.first - 1, 0, "Brazil")
        .unwrap();
    let second = workbook.add_worksheet();
    second.set_name("Notes").unwrap();
    second.write_string(0, 0, "keep me").unwrap();
    workbook.save(&path).unwrap();

    let store = CountryStore::load(&path, "Countries", ["UON", "PEACH"]).unwrap();
    store.persist().unwrap();

    let reopened: Xlsx<_> = open_workbook(&path).unwrap();
    let names = reopened.sheet_names().to_vec();
    assert!(names.contains(&"Notes".to_string()));
}

#[test]
fn export_writes_header_and_one_row_per_country() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.xlsx");
    let out = dir.path().join("out.xlsx");
    write_fixture(&path, "Countries", &["Brazil", "Chad"]);

    let mut store = CountryStore::load(&path, "Countries", ["UON", "PEACH"]).unwrap();
    store.update("Brazil", Verdict::Yes, Verdict::No);
    store.export_to(&out).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&out).unwrap();
    let range = workbook.worksheet_range(EXPORT_SHEET).unwrap();

    // Header plus two data rows.
    assert_eq!(range.get_size(), (3, 3));
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("Country".to_string()))
    );
    assert_eq!(
        range.get_value((0, 1)),
        Some(&Data::String("UON".to_string()))
    );
    assert_eq!(
        range.get_value((0, 2)),
        Some(&Data::String("PEACH".to_string()))
    );
    assert_eq!(
        range.get_value((1, 0)),
        Some(&Data::String("Brazil".to_string()))
    );
    assert_eq!(
        range.get_value((1, 1)),
        Some(&Data::String("Y".to_string()))
    );
    assert_eq!(
        range.get_value((2, 0)),
        Some(&Data::String("Chad".to_string()))
    );
    assert_eq!(
        range.get_value((2, 2)),
        Some(&Data::String("N".to_string()))
    );
}

#[test]
fn sheet_names_lists_all_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.xlsx");

    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("One").unwrap();
    workbook.add_worksheet().set_name("Two").unwrap();
    workbook.save(&path).unwrap();

    let names = CountryStore::sheet_names(&path).unwrap();
    assert_eq!(names, ["One", "Two"]);
}
