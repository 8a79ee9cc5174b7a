/// Workbook input and output
///
/// This module wraps the spreadsheet crates: calamine for reading .xlsx
/// files into plain string rows, and rust_xlsxwriter for writing the
/// export grids back out with a bold header row and auto-sized columns.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use log::debug;
use rust_xlsxwriter::{Format, Workbook};

use crate::core::exporter::{ExportGrid, GridCell};

/// Excel's hard limit on worksheet name length.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Error when a workbook contains no worksheet to read
#[derive(Debug, thiserror::Error)]
#[error("No worksheet found in {path}")]
pub struct NoWorksheet {
    path: String,
}

/// One sheet of the export workbook.
#[derive(Debug, Clone)]
pub struct SheetSpec {
    pub name: String,
    pub grid: ExportGrid,
}

/// Read the first worksheet of an .xlsx file into string rows.
///
/// Every cell is stringified, so numeric period cells arrive as "7" and
/// empty cells as "". The header row is included; the converter decides
/// what to skip.
///
/// # Arguments
///
/// * `path` - Path to the workbook
///
/// # Returns
///
/// The worksheet as rows of cell strings
pub fn read_workbook_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| NoWorksheet {
            path: path.display().to_string(),
        })?
        .with_context(|| format!("Failed to read worksheet in {}", path.display()))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Stringify one cell, falling back to the Display form for cell types
/// `as_string` does not cover.
fn cell_to_string(cell: &Data) -> String {
    cell.as_string()
        .map(|value| value.to_string())
        .unwrap_or_else(|| format!("{}", cell))
}

/// Write export grids into a single workbook, one sheet per grid.
///
/// Each sheet gets a bold header row and the grid's auto-sized column
/// widths. Sheet names are truncated to Excel's 31-character limit.
///
/// # Arguments
///
/// * `sheets` - Sheets to write, in order
/// * `path` - Destination workbook path
pub fn write_workbook(sheets: &[SheetSpec], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(truncate_sheet_name(&sheet.name))
            .with_context(|| format!("Invalid sheet name: {}", sheet.name))?;

        for (col, title) in sheet.grid.header.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, title, &header_format)?;
        }

        for (row_index, row) in sheet.grid.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    GridCell::Text(text) => {
                        worksheet.write_string((row_index + 1) as u32, col as u16, text)?;
                    }
                    GridCell::Number(value) => {
                        worksheet.write_number(
                            (row_index + 1) as u32,
                            col as u16,
                            f64::from(*value),
                        )?;
                    }
                }
            }
        }

        for (col, width) in sheet.grid.column_widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write workbook: {}", path.display()))?;

    Ok(())
}

/// Truncate a sheet name to the Excel limit, counting characters rather
/// than bytes so multi-byte names stay valid.
fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_sheet_name_respects_limit() {
        let long = "a".repeat(40);
        assert_eq!(truncate_sheet_name(&long).len(), MAX_SHEET_NAME_LEN);
        assert_eq!(truncate_sheet_name("short"), "short");
    }

    #[test]
    fn test_truncate_sheet_name_counts_chars_not_bytes() {
        let name = "ớ".repeat(40);
        assert_eq!(
            truncate_sheet_name(&name).chars().count(),
            MAX_SHEET_NAME_LEN
        );
    }

    #[test]
    fn test_cell_to_string_covers_common_cells() {
        assert_eq!(cell_to_string(&Data::String("Thứ 2".to_string())), "Thứ 2");
        assert_eq!(cell_to_string(&Data::Float(7.0)), "7");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
