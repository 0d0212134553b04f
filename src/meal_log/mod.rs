//! Meal log store and its CSV projection

pub mod csv_export;
pub mod store;

pub use csv_export::{export_to_file, to_csv_string, write_csv, CsvExportError, CSV_HEADER};
pub use store::MealLogStore;

impl MealLogStore {
    /// CSV projection of every entry
    pub fn to_csv(&self) -> Result<String, CsvExportError> {
        to_csv_string(self.all())
    }

    pub fn export_csv(&self, path: &std::path::Path) -> Result<(), CsvExportError> {
        export_to_file(path, self.all())
    }
}
