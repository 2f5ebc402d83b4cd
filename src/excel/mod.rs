//! Workbook load, update, persist, and export.

pub mod store;

pub use store::{CountryStore, RowWindow, Verdict, COUNTRY_WINDOW, EXPORT_SHEET};
