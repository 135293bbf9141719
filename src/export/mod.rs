pub mod csv_export;
pub mod pdf;

use chrono::{DateTime, Utc};

use crate::models::{CourseRow, FacultyRow};

pub use csv_export::{render_csv, write_csv};
pub use pdf::render_pdf;

pub const FACULTY_HEADERS: [&str; 5] = ["Name", "Classification", "Admin", "Current Load", "Status"];
pub const COURSE_HEADERS: [&str; 5] = ["Faculty", "Course", "Year", "Units", "Schedule"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Pdf => "PDF",
        }
    }
}

/// e.g. `faculty_workload_20261017_093000.csv`
pub fn export_file_name(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "faculty_workload_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

pub fn faculty_cells(row: &FacultyRow) -> [String; 5] {
    [
        row.name.clone(),
        row.classification.label().to_string(),
        row.admin_label().to_string(),
        row.current_load.to_string(),
        row.status.clone(),
    ]
}

pub fn course_cells(row: &CourseRow) -> [String; 5] {
    [
        row.faculty.clone(),
        row.course.clone(),
        row.year.label().to_string(),
        row.units.to_string(),
        row.schedule.clone(),
    ]
}
