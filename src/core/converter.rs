/// Spreadsheet-to-JSON conversion
///
/// This module contains the ScheduleConverter which walks spreadsheet rows
/// and assembles the JSON schedule document, applying one of the two
/// conversion profiles.

use log::{debug, warn};
use serde_json::Value;

use crate::core::model::{ClassSchedule, ScheduleDocument, ScheduleEntry};
use crate::core::parser;

/// Room used by the physical-education profile when the config does not
/// override it: PE classes meet on the schoolyard, not in a numbered room.
pub const DEFAULT_PHYS_ED_ROOM: &str = "Sân trường";

/// Which of the two conversion behaviors to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Room comes from the class cell; rows without a room yield no entries.
    General,
    /// Fixed room for every entry, normalized "GDTC" class names, and an
    /// empty `originalClassId` on each class.
    PhysEd,
}

/// Converts spreadsheet rows into a schedule document.
pub struct ScheduleConverter {
    profile: Profile,
    default_room: String,
}

impl ScheduleConverter {
    /// Create a converter for the given profile.
    ///
    /// # Arguments
    ///
    /// * `profile` - Conversion profile to apply
    /// * `config` - Loose configuration object; the `default_room` key
    ///   overrides the physical-education room
    pub fn new(profile: Profile, config: &Value) -> Self {
        let default_room = config
            .get("default_room")
            .and_then(|room| room.as_str())
            .unwrap_or(DEFAULT_PHYS_ED_ROOM)
            .to_string();

        Self {
            profile,
            default_room,
        }
    }

    /// Convert spreadsheet rows into a schedule document.
    ///
    /// The first row is the header row and is skipped. Each data row holds
    /// the class cell in column 0 followed by repeating (day, period)
    /// column pairs; a trailing unpaired column is ignored. Rows that
    /// produce no entries are dropped.
    pub fn convert_rows(&self, rows: &[Vec<String>]) -> ScheduleDocument {
        let mut classes = Vec::new();

        for (row_index, row) in rows.iter().enumerate().skip(1) {
            let Some(first_cell) = row.first() else {
                continue;
            };

            let Some((name, room)) = self.resolve_class(first_cell) else {
                debug!("Row {}: no class name, skipping", row_index);
                continue;
            };

            let schedule = self.collect_entries(row, room.as_deref());
            if schedule.is_empty() {
                warn!("Row {}: class '{}' has no parseable schedule", row_index, name);
                continue;
            }

            let mut class = ClassSchedule::new(name);
            if self.profile == Profile::PhysEd {
                class.original_class_id = Some(String::new());
            }
            class.schedule = schedule;
            classes.push(class);
        }

        ScheduleDocument { classes }
    }

    /// Resolve the class name and room for a row according to the profile.
    fn resolve_class(&self, first_cell: &str) -> Option<(String, Option<String>)> {
        match self.profile {
            Profile::General => parser::parse_class_cell(first_cell),
            Profile::PhysEd => {
                let name = parser::parse_class_name(first_cell)?;
                Some((
                    parser::normalize_phys_ed_name(&name),
                    Some(self.default_room.clone()),
                ))
            }
        }
    }

    /// Walk the (day, period) column pairs of one row and fan each parsed
    /// period out into a schedule entry.
    fn collect_entries(&self, row: &[String], room: Option<&str>) -> Vec<ScheduleEntry> {
        let Some(room) = room else {
            // General profile without a room: the entries would be
            // unusable, matching rows are dropped entirely
            return Vec::new();
        };

        let mut schedule = Vec::new();
        let mut col = 1;

        while col + 1 < row.len() {
            let day = parser::parse_day_label(&row[col]);
            let periods = parser::parse_period_label(&row[col + 1]);

            if let Some(day) = day {
                for period in periods {
                    schedule.push(ScheduleEntry::new(room, day, period));
                }
            }

            col += 2;
        }

        schedule
    }
}
