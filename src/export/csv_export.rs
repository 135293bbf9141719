use std::io::Write;

use crate::error::AppError;
use crate::export::{COURSE_HEADERS, FACULTY_HEADERS, course_cells, faculty_cells};
use crate::models::{CourseRow, FacultyRow};

fn section_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer)
}

fn finish_section<W: Write>(wtr: csv::Writer<W>) -> Result<W, AppError> {
    wtr.into_inner().map_err(|e| AppError::Io(e.into_error()))
}

/// Writes both tables as titled sections separated by a blank line.
pub fn write_csv<W: Write>(
    writer: W,
    faculty: &[FacultyRow],
    courses: &[CourseRow],
) -> Result<W, AppError> {
    let mut wtr = section_writer(writer);
    wtr.write_record(["Faculty Information"])?;
    wtr.write_record(FACULTY_HEADERS)?;
    for row in faculty {
        wtr.write_record(faculty_cells(row))?;
    }

    // An empty record would come out as `""`, so the separator goes straight
    // to the underlying writer between the two sections.
    let mut writer = finish_section(wtr)?;
    writer.write_all(b"\r\n")?;

    let mut wtr = section_writer(writer);
    wtr.write_record(["Course Information"])?;
    wtr.write_record(COURSE_HEADERS)?;
    for row in courses {
        wtr.write_record(course_cells(row))?;
    }

    finish_section(wtr)
}

pub fn render_csv(faculty: &[FacultyRow], courses: &[CourseRow]) -> Result<Vec<u8>, AppError> {
    write_csv(Vec::new(), faculty, courses)
}
