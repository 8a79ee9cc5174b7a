/// Utility modules for the schedule converter
///
/// This module contains utility functions for workbook I/O, flat-file
/// handling, and console output formatting.

pub mod excel;
pub mod file_utils;
pub mod output_formatter;
