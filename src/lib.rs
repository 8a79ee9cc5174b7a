/// Schedule Converter - class-schedule spreadsheets to JSON and back
///
/// This library converts class-schedule spreadsheets into a normalized JSON
/// representation and re-exports JSON schedule documents as formatted
/// spreadsheets, with text parsing for day-of-week and period-range
/// notation.

// Re-export core modules
pub mod core;
pub mod utils;

// Re-export the main conversion types for convenience
pub use crate::core::converter::{Profile, ScheduleConverter};
pub use crate::core::exporter::build_export_grid;
pub use crate::core::grouping::group_schedule;
pub use crate::core::model::{ClassSchedule, ScheduleDocument, ScheduleEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a single spreadsheet file into a schedule document.
///
/// This is a convenience function for simple use cases.
///
/// # Arguments
///
/// * `path` - Path to the .xlsx file
/// * `profile` - Conversion profile to apply
///
/// # Returns
///
/// The converted schedule document
pub fn convert_excel_file<P: AsRef<std::path::Path>>(
    path: P,
    profile: Profile,
) -> anyhow::Result<ScheduleDocument> {
    let rows = utils::excel::read_workbook_rows(path.as_ref())?;
    let converter = ScheduleConverter::new(profile, &serde_json::json!({}));
    Ok(converter.convert_rows(&rows))
}

/// Command-line application functionality
pub mod app {
    use std::path::Path;

    use crate::core::converter::{Profile, ScheduleConverter};
    use crate::core::model::ScheduleDocument;
    use crate::utils::excel;

    /// Run the converter on multiple spreadsheet files.
    ///
    /// # Arguments
    ///
    /// * `file_paths` - Paths to the spreadsheets to convert
    /// * `profile` - Conversion profile to apply
    /// * `config` - Configuration options
    ///
    /// # Returns
    ///
    /// One (path, document) pair per input file
    pub fn run_converter<P: AsRef<Path>>(
        file_paths: &[P],
        profile: Profile,
        config: &serde_json::Value,
    ) -> anyhow::Result<Vec<(String, ScheduleDocument)>> {
        let converter = ScheduleConverter::new(profile, config);
        let mut results = Vec::new();

        for file_path in file_paths {
            let rows = excel::read_workbook_rows(file_path.as_ref())?;
            let doc = converter.convert_rows(&rows);
            let path_str = file_path.as_ref().to_string_lossy().to_string();
            results.push((path_str, doc));
        }

        Ok(results)
    }
}
