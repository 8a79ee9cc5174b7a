/// Schedule data model
///
/// This module defines the JSON representation of a converted schedule:
/// a document holds classes, each class holds an ordered list of schedule
/// entries with a room, a day index and a period index.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of schedulable days in a week (Monday through Friday).
pub const DAYS_PER_WEEK: u8 = 5;

/// One teaching slot: a room on a given day and period.
///
/// `day` is 0-based Monday-first (0 = Monday ... 4 = Friday). `period` is
/// 0-based internally; display text is 1-based ("Tiết 1").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub room: String,
    pub day: u8,
    pub period: u8,
}

impl ScheduleEntry {
    pub fn new(room: impl Into<String>, day: u8, period: u8) -> Self {
        Self {
            room: room.into(),
            day,
            period,
        }
    }

    /// Whether the entry's day index falls inside the Monday–Friday range.
    pub fn is_valid_day(&self) -> bool {
        self.day < DAYS_PER_WEEK
    }
}

/// A class with its schedule entries.
///
/// `original_class_id` only appears in physical-education profile output
/// (serialized as `originalClassId`). `students` is an opaque array carried
/// through from upstream JSON; its length feeds the class-size column on
/// export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSchedule {
    pub name: String,
    #[serde(
        rename = "originalClassId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<Value>>,
    pub schedule: Vec<ScheduleEntry>,
}

impl ClassSchedule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            original_class_id: None,
            students: None,
            schedule: Vec::new(),
        }
    }

    /// Class size, if a student list was provided.
    pub fn class_size(&self) -> Option<usize> {
        self.students.as_ref().map(|students| students.len())
    }
}

/// The JSON document root: `{"classes": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleDocument {
    pub classes: Vec<ClassSchedule>,
}

impl ScheduleDocument {
    /// Total number of schedule entries across all classes.
    pub fn total_entries(&self) -> usize {
        self.classes.iter().map(|class| class.schedule.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_with_expected_keys() {
        let entry = ScheduleEntry::new("A703", 2, 4);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["room"], "A703");
        assert_eq!(json["day"], 2);
        assert_eq!(json["period"], 4);
    }

    #[test]
    fn test_original_class_id_renames_and_skips_when_absent() {
        let mut class = ClassSchedule::new("Lớp Toán 10A1");
        class.schedule.push(ScheduleEntry::new("A703", 0, 0));

        let json = serde_json::to_value(&class).unwrap();
        assert!(json.get("originalClassId").is_none());

        class.original_class_id = Some(String::new());
        let json = serde_json::to_value(&class).unwrap();
        assert_eq!(json["originalClassId"], "");
    }

    #[test]
    fn test_day_range_check() {
        assert!(ScheduleEntry::new("A1", 0, 0).is_valid_day());
        assert!(ScheduleEntry::new("A1", 4, 0).is_valid_day());
        assert!(!ScheduleEntry::new("A1", 5, 0).is_valid_day());
    }

    #[test]
    fn test_document_parses_original_shape() {
        let raw = r#"{
            "classes": [
                {
                    "name": "Lớp Văn 10A2",
                    "students": [{"id": 1}, {"id": 2}],
                    "schedule": [
                        {"room": "B505", "day": 1, "period": 6}
                    ]
                }
            ]
        }"#;

        let doc: ScheduleDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.classes.len(), 1);
        assert_eq!(doc.classes[0].class_size(), Some(2));
        assert_eq!(doc.total_entries(), 1);
        assert!(doc.classes[0].original_class_id.is_none());
    }
}
