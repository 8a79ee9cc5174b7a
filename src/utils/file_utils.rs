/// Flat-file handling utilities
///
/// This module classifies input files by extension and handles the JSON
/// side of the pipeline: reading schedule documents, writing them out
/// pretty-printed, and deriving output paths.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::core::model::ScheduleDocument;

/// Default file name for the combined export workbook.
pub const DEFAULT_WORKBOOK_NAME: &str = "lich_hoc_tong_hop.xlsx";

/// Suffix appended to a spreadsheet's stem for its JSON output.
const CONVERTED_SUFFIX: &str = "_converted";

/// What kind of input a file is, judged by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// An .xlsx/.xls workbook to convert into JSON.
    Spreadsheet,
    /// A .json schedule document to collect into the export workbook.
    Json,
}

/// Classify a path by its extension.
///
/// # Returns
///
/// The input kind, or `None` for files this tool does not process.
pub fn classify_input(path: &Path) -> Option<InputKind> {
    let extension = path.extension()?.to_string_lossy().to_lowercase();
    match extension.as_str() {
        "xlsx" | "xls" => Some(InputKind::Spreadsheet),
        "json" => Some(InputKind::Json),
        _ => None,
    }
}

/// Read a JSON schedule document from disk.
pub fn read_schedule_document(path: &Path) -> Result<ScheduleDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;

    let doc: ScheduleDocument = serde_json::from_str(&content)
        .with_context(|| format!("Invalid schedule JSON in {}", path.display()))?;

    Ok(doc)
}

/// Write a schedule document as pretty-printed UTF-8 JSON.
pub fn write_schedule_document(doc: &ScheduleDocument, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON output file: {}", path.display()))?;

    serde_json::to_writer_pretty(BufWriter::new(file), doc)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;

    info!("Wrote schedule JSON: {}", path.display());
    Ok(())
}

/// Derive the JSON output path for a converted spreadsheet.
///
/// "schedule.xlsx" becomes "schedule_converted.json", placed next to the
/// input unless an output directory is given.
pub fn converted_json_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "schedule".to_string());

    let file_name = format!("{}{}.json", stem, CONVERTED_SUFFIX);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Sheet name for a JSON input: the file stem.
pub fn sheet_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "schedule".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_input_by_extension() {
        assert_eq!(
            classify_input(Path::new("a/b/lich.xlsx")),
            Some(InputKind::Spreadsheet)
        );
        assert_eq!(
            classify_input(Path::new("old.XLS")),
            Some(InputKind::Spreadsheet)
        );
        assert_eq!(classify_input(Path::new("doc.json")), Some(InputKind::Json));
        assert_eq!(classify_input(Path::new("notes.txt")), None);
        assert_eq!(classify_input(Path::new("no_extension")), None);
    }

    #[test]
    fn test_converted_json_path_next_to_input() {
        let path = converted_json_path(Path::new("data/lich_hoc.xlsx"), None);
        assert_eq!(path, PathBuf::from("data/lich_hoc_converted.json"));
    }

    #[test]
    fn test_converted_json_path_with_output_dir() {
        let path = converted_json_path(Path::new("data/lich_hoc.xlsx"), Some(Path::new("out")));
        assert_eq!(path, PathBuf::from("out/lich_hoc_converted.json"));
    }

    #[test]
    fn test_sheet_name_is_file_stem() {
        assert_eq!(sheet_name_for(Path::new("out/khoa_1.json")), "khoa_1");
    }
}
