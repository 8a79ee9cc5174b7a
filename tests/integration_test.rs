/// Integration tests for the schedule converter
///
/// These tests verify the conversion pipeline end to end: spreadsheet to
/// JSON, JSON to spreadsheet, and the round-trip property that class names
/// and entry counts survive the grouping/un-grouping transform.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use schedule_converter::core::converter::{Profile, ScheduleConverter};
use schedule_converter::core::exporter::build_export_grid;
use schedule_converter::core::model::{ClassSchedule, ScheduleDocument, ScheduleEntry};
use schedule_converter::utils::excel::{read_workbook_rows, write_workbook, SheetSpec};
use schedule_converter::utils::file_utils;

/// Write a workbook in the import layout: header row, then one class per
/// row with (day, period) column pairs.
fn write_import_fixture(path: &Path) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header = ["Lớp", "Thứ", "Tiết", "Thứ", "Tiết"];
    for (col, title) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title).unwrap();
    }

    worksheet.write_string(1, 0, "Lớp Toán 10A1\nA703").unwrap();
    worksheet.write_string(1, 1, "Thứ 2").unwrap();
    worksheet.write_string(1, 2, "1-2").unwrap();
    worksheet.write_string(1, 3, "Thứ 4").unwrap();
    // Numeric period cell, the way spreadsheets often store "7"
    worksheet.write_number(1, 4, 7.0).unwrap();

    worksheet.write_string(2, 0, "Lớp Văn 10A2 B505").unwrap();
    worksheet.write_string(2, 1, "Thứ 3").unwrap();
    worksheet.write_string(2, 2, "7").unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn test_spreadsheet_converts_to_json_document() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let workbook_path = temp_dir.path().join("lich_hoc.xlsx");
    write_import_fixture(&workbook_path);

    let rows = read_workbook_rows(&workbook_path).expect("Failed to read fixture workbook");
    let converter = ScheduleConverter::new(Profile::General, &serde_json::json!({}));
    let doc = converter.convert_rows(&rows);

    assert_eq!(doc.classes.len(), 2);

    let math = &doc.classes[0];
    assert_eq!(math.name, "Lớp Toán 10A1");
    assert_eq!(
        math.schedule,
        vec![
            ScheduleEntry::new("A703", 0, 0),
            ScheduleEntry::new("A703", 0, 1),
            ScheduleEntry::new("A703", 2, 6),
        ]
    );

    let literature = &doc.classes[1];
    assert_eq!(literature.name, "Lớp Văn 10A2");
    assert_eq!(literature.schedule, vec![ScheduleEntry::new("B505", 1, 6)]);
}

#[test]
fn test_json_document_survives_disk_round_trip() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let json_path = temp_dir.path().join("lich_hoc_converted.json");

    let mut class = ClassSchedule::new("Lớp Sử 11B3");
    class.schedule = vec![ScheduleEntry::new("C202", 3, 2)];
    let doc = ScheduleDocument {
        classes: vec![class],
    };

    file_utils::write_schedule_document(&doc, &json_path).expect("Failed to write JSON");
    let loaded = file_utils::read_schedule_document(&json_path).expect("Failed to read JSON");

    assert_eq!(loaded.classes.len(), 1);
    assert_eq!(loaded.classes[0].name, "Lớp Sử 11B3");
    assert_eq!(loaded.classes[0].schedule, doc.classes[0].schedule);
}

#[test]
fn test_export_writes_grouped_workbook() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let workbook_path = temp_dir.path().join("tong_hop.xlsx");

    let mut class = ClassSchedule::new("Lớp Toán 10A1");
    class.schedule = vec![
        ScheduleEntry::new("A703", 0, 0),
        ScheduleEntry::new("A703", 0, 1),
        ScheduleEntry::new("A703", 0, 2),
    ];
    class.students = Some(vec![serde_json::json!({}); 25]);
    let doc = ScheduleDocument {
        classes: vec![class],
    };

    let sheets = vec![SheetSpec {
        name: "khoa_1".to_string(),
        grid: build_export_grid(&doc),
    }];
    write_workbook(&sheets, &workbook_path).expect("Failed to write export workbook");

    let rows = read_workbook_rows(&workbook_path).expect("Failed to read export workbook");

    // Header row with one slot triple and the class-size column
    assert_eq!(rows[0], vec!["Tên lớp", "Thứ", "Tiết", "Phòng", "Sỉ số"]);

    // The three consecutive periods merged into one labeled range
    assert_eq!(rows[1][0], "Lớp Toán 10A1");
    assert_eq!(rows[1][1], "Thứ 2");
    assert_eq!(rows[1][2], "Tiết 1 - Tiết 3");
    assert_eq!(rows[1][3], "A703");
    assert_eq!(rows[1][4], "25");
}

/// Count the entries a grouped period label stands for ("Tiết 1 - Tiết 3"
/// covers three periods, "Tiết 7" one).
fn ungrouped_count(period_text: &str) -> usize {
    if period_text.is_empty() {
        return 0;
    }

    let numbers: Vec<usize> = period_text
        .split(" - ")
        .map(|label| {
            label
                .trim_start_matches("Tiết ")
                .parse()
                .expect("period label should hold a numeral")
        })
        .collect();

    match numbers.as_slice() {
        [start, end] => end - start + 1,
        _ => 1,
    }
}

#[test]
fn test_round_trip_preserves_names_and_entry_counts() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let import_path = temp_dir.path().join("lich_hoc.xlsx");
    let export_path = temp_dir.path().join("tong_hop.xlsx");
    write_import_fixture(&import_path);

    // Spreadsheet -> JSON
    let rows = read_workbook_rows(&import_path).expect("Failed to read fixture workbook");
    let converter = ScheduleConverter::new(Profile::General, &serde_json::json!({}));
    let doc = converter.convert_rows(&rows);
    let original_names: Vec<String> = doc.classes.iter().map(|c| c.name.clone()).collect();
    let original_entries = doc.total_entries();

    // JSON -> spreadsheet
    let sheets = vec![SheetSpec {
        name: "round_trip".to_string(),
        grid: build_export_grid(&doc),
    }];
    write_workbook(&sheets, &export_path).expect("Failed to write export workbook");

    // Read the export back and un-group the period labels
    let exported = read_workbook_rows(&export_path).expect("Failed to read export workbook");
    let data_rows = &exported[1..];

    let exported_names: Vec<String> = data_rows.iter().map(|row| row[0].clone()).collect();
    assert_eq!(exported_names, original_names);

    let mut exported_entries = 0;
    for row in data_rows {
        // Period labels sit at columns 2, 5, 8, ... between name and size
        let mut col = 2;
        while col < row.len() - 1 {
            exported_entries += ungrouped_count(&row[col]);
            col += 3;
        }
    }
    assert_eq!(exported_entries, original_entries);
}
