use itertools::Itertools;

use crate::model::Student;

/// Fixed download name used by every export action.
pub const EXPORT_FILENAME: &str = "students.csv";

// Column order follows the stored field names, id first.
const COLUMNS: [&str; 6] = [
    "id",
    "instituteId",
    "studentName",
    "address",
    "semester",
    "contactNo",
];

/// One exported spreadsheet: the fixed filename plus rendered CSV content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub content: String,
}

/// Renders the currently visible students as CSV, one row per student, rows
/// in the filtered view's order. A pure transformation of already-fetched
/// data; no store access.
pub fn export_students(students: &[Student]) -> CsvExport {
    let mut content = String::new();
    content.push_str(&COLUMNS.iter().join(","));
    content.push('\n');
    for student in students {
        let row = [
            csv_quote(&student.id),
            csv_quote(&student.institute_id),
            csv_quote(&student.student_name),
            csv_quote(&student.address),
            csv_quote(&student.semester),
            csv_quote(&student.contact_no),
        ];
        content.push_str(&row.iter().join(","));
        content.push('\n');
    }
    CsvExport {
        filename: EXPORT_FILENAME,
        content,
    }
}

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
