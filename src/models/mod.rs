pub mod course;
pub mod faculty;

pub use course::{ALLOWED_UNITS, Course, CourseRow, NewCourseRequest, STANDARD_TIME_SLOTS, YearLevel};
pub use faculty::{Classification, Faculty, FacultyRow, NewFacultyRequest};
