/// JSON-to-spreadsheet export grid
///
/// This module lays a schedule document out as a rectangular grid for the
/// export workbook: one row per class, a dynamic number of grouped-slot
/// column triples, and a trailing class-size column. The grid is pure data
/// so it can be unit-tested without touching workbook bytes.

use crate::core::grouping::{group_schedule, GroupedSlot};
use crate::core::model::ScheduleDocument;

/// Column width cap, in characters, for auto-sizing.
const MAX_COLUMN_WIDTH: usize = 50;

/// A single grid cell. Class sizes export as numbers so the spreadsheet
/// treats them as such; everything else is text.
#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    Text(String),
    Number(u32),
}

impl GridCell {
    fn text(value: impl Into<String>) -> Self {
        GridCell::Text(value.into())
    }

    /// The cell content as display text, used for width calculation and
    /// assertions in tests.
    pub fn as_display(&self) -> String {
        match self {
            GridCell::Text(text) => text.clone(),
            GridCell::Number(value) => value.to_string(),
        }
    }
}

/// The rectangular export layout for one sheet.
#[derive(Debug, Clone)]
pub struct ExportGrid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<GridCell>>,
    /// Auto-sized column widths in characters, aligned with `header`.
    pub column_widths: Vec<f64>,
}

/// Lay a schedule document out as an export grid.
///
/// The column count is dynamic: "Tên lớp", then one "Thứ"/"Tiết"/"Phòng"
/// triple per grouped slot up to the widest class (suffixed " 2", " 3", …
/// from the second slot on), then "Sỉ số". Classes with fewer slots pad
/// with blanks; the class-size cell is the student count or "N/A".
pub fn build_export_grid(doc: &ScheduleDocument) -> ExportGrid {
    let grouped: Vec<Vec<GroupedSlot>> = doc
        .classes
        .iter()
        .map(|class| group_schedule(&class.schedule))
        .collect();

    let max_slots = grouped.iter().map(Vec::len).max().unwrap_or(0);
    let header = build_header(max_slots);

    let mut rows = Vec::with_capacity(doc.classes.len());
    for (class, slots) in doc.classes.iter().zip(&grouped) {
        let mut row = Vec::with_capacity(header.len());
        row.push(GridCell::text(class.name.clone()));

        for index in 0..max_slots {
            match slots.get(index) {
                Some(slot) => {
                    row.push(GridCell::text(slot.day.clone()));
                    row.push(GridCell::text(slot.period.clone()));
                    row.push(GridCell::text(slot.room.clone()));
                }
                None => {
                    row.push(GridCell::text(""));
                    row.push(GridCell::text(""));
                    row.push(GridCell::text(""));
                }
            }
        }

        match class.class_size() {
            Some(size) => row.push(GridCell::Number(size as u32)),
            None => row.push(GridCell::text("N/A")),
        }

        rows.push(row);
    }

    let column_widths = compute_column_widths(&header, &rows);

    ExportGrid {
        header,
        rows,
        column_widths,
    }
}

/// Build the dynamic header row for the given slot count.
fn build_header(max_slots: usize) -> Vec<String> {
    let mut header = vec!["Tên lớp".to_string()];

    for index in 0..max_slots {
        if index == 0 {
            header.push("Thứ".to_string());
            header.push("Tiết".to_string());
            header.push("Phòng".to_string());
        } else {
            header.push(format!("Thứ {}", index + 1));
            header.push(format!("Tiết {}", index + 1));
            header.push(format!("Phòng {}", index + 1));
        }
    }

    header.push("Sỉ số".to_string());
    header
}

/// Auto-size each column to its longest content plus padding, capped at
/// `MAX_COLUMN_WIDTH` characters. The header row participates.
fn compute_column_widths(header: &[String], rows: &[Vec<GridCell>]) -> Vec<f64> {
    let mut widths: Vec<usize> = header.iter().map(|title| title.chars().count()).collect();

    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            let length = cell.as_display().chars().count();
            if col < widths.len() && length > widths[col] {
                widths[col] = length;
            }
        }
    }

    widths
        .into_iter()
        .map(|width| (width + 2).min(MAX_COLUMN_WIDTH) as f64)
        .collect()
}
