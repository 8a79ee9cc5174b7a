/// Simple example demonstrating how to use the schedule converter library

use anyhow::Result;
use rust_xlsxwriter::Workbook;
use schedule_converter::{convert_excel_file, Profile};

fn main() -> Result<()> {
    // Path to spreadsheet for conversion
    let file_path = "demos/sample_schedule.xlsx";

    // Create a sample schedule workbook
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Lớp")?;
    worksheet.write_string(0, 1, "Thứ")?;
    worksheet.write_string(0, 2, "Tiết")?;
    worksheet.write_string(1, 0, "Lớp Toán 10A1\nA703")?;
    worksheet.write_string(1, 1, "Thứ 2")?;
    worksheet.write_string(1, 2, "1-2")?;
    workbook.save(file_path)?;

    println!("Converting spreadsheet: {}", file_path);

    // Convert with the general profile (room taken from the class cell)
    let doc = convert_excel_file(file_path, Profile::General)?;

    // Display results
    for class in &doc.classes {
        println!("\n{} ({} entries):", class.name, class.schedule.len());
        for entry in &class.schedule {
            println!(
                "  - day {} period {} in {}",
                entry.day, entry.period, entry.room
            );
        }
    }

    Ok(())
}
