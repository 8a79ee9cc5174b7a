/// Console output formatting
///
/// This module renders conversion results for the terminal: a per-file
/// report of the classes that were converted and a closing summary for
/// the whole run.

use colored::Colorize;

use crate::core::model::ScheduleDocument;

/// Format the per-file conversion report.
///
/// # Arguments
///
/// * `doc` - The converted schedule document
///
/// # Returns
///
/// A printable report listing each class and its entry count
pub fn format_conversion_report(doc: &ScheduleDocument) -> String {
    let mut output = String::new();

    if doc.classes.is_empty() {
        output.push_str("No classes converted.\n");
        return output;
    }

    output.push_str(&format!(
        "{} {}\n",
        "Classes converted:".cyan().bold(),
        doc.classes.len()
    ));

    for class in &doc.classes {
        let size_note = match class.class_size() {
            Some(size) => format!(", {} students", size),
            None => String::new(),
        };
        output.push_str(&format!(
            "  - {} ({} entries{})\n",
            class.name,
            class.schedule.len(),
            size_note
        ));
    }

    output
}

/// Format the closing summary for a run.
///
/// # Arguments
///
/// * `files_processed` - Number of input files attempted
/// * `classes_converted` - Total classes across all converted files
/// * `failures` - Number of files skipped due to errors
/// * `elapsed_seconds` - Wall-clock duration of the run
pub fn create_summary(
    files_processed: usize,
    classes_converted: usize,
    failures: usize,
    elapsed_seconds: f64,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", "Conversion Complete".bold()));
    output.push_str(&format!(
        "{} {}\n",
        "Files processed:".green(),
        files_processed
    ));
    output.push_str(&format!(
        "{} {}\n",
        "Classes converted:".green(),
        classes_converted
    ));

    if failures > 0 {
        output.push_str(&format!("{} {}\n", "Files skipped:".red(), failures));
    }

    output.push_str(&format!(
        "{} {:.2} seconds\n",
        "Time elapsed:".green(),
        elapsed_seconds
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ClassSchedule, ScheduleEntry};

    #[test]
    fn test_report_lists_classes_and_counts() {
        let mut class = ClassSchedule::new("Lớp Toán 10A1");
        class.schedule = vec![
            ScheduleEntry::new("A703", 0, 0),
            ScheduleEntry::new("A703", 0, 1),
        ];
        let doc = ScheduleDocument {
            classes: vec![class],
        };

        let report = format_conversion_report(&doc);
        assert!(report.contains("Lớp Toán 10A1"));
        assert!(report.contains("2 entries"));
    }

    #[test]
    fn test_report_empty_document() {
        let report = format_conversion_report(&ScheduleDocument::default());
        assert!(report.contains("No classes converted"));
    }

    #[test]
    fn test_summary_mentions_failures_only_when_present() {
        let clean = create_summary(3, 12, 0, 1.5);
        assert!(!clean.contains("skipped"));

        let with_failures = create_summary(3, 12, 1, 1.5);
        assert!(with_failures.contains("skipped"));
    }
}
