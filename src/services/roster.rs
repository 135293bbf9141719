use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{
    ALLOWED_UNITS, Course, CourseRow, Faculty, FacultyRow, NewCourseRequest, NewFacultyRequest,
};
use crate::services::conflict_checker::find_conflict;
use crate::services::load_evaluator::{self, LoadSummary};

/// All faculty members in the order they were entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    faculty: Vec<Faculty>,
}

impl Roster {
    pub fn new(faculty: Vec<Faculty>) -> Self {
        Self { faculty }
    }

    pub fn faculty(&self) -> &[Faculty] {
        &self.faculty
    }

    pub fn len(&self) -> usize {
        self.faculty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faculty.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Faculty> {
        self.faculty.iter().find(|f| f.name == name)
    }

    pub fn add_faculty(&mut self, req: NewFacultyRequest) -> Result<FacultyRow, AppError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Please enter a faculty name.".to_string()));
        }
        if self.find(name).is_some() {
            warn!("Rejected duplicate faculty: {}", name);
            return Err(AppError::BadRequest(
                "A faculty member with this name already exists.".to_string(),
            ));
        }

        let faculty = Faculty::new(name, req.classification, req.is_admin);
        info!(
            "Added faculty {} ({}, admin: {})",
            faculty.name, faculty.classification, faculty.is_admin
        );
        let row = faculty_row(&faculty);
        self.faculty.push(faculty);
        Ok(row)
    }

    /// Appends the course to the named faculty member unless it is invalid
    /// or conflicts; a rejected course leaves the roster untouched.
    pub fn add_course(&mut self, req: NewCourseRequest) -> Result<CourseRow, AppError> {
        let course_name = req.name.trim();
        let faculty_name = req.faculty.trim();
        if course_name.is_empty() || faculty_name.is_empty() {
            return Err(AppError::BadRequest(
                "Please enter all course details and select a faculty.".to_string(),
            ));
        }
        let schedule = req.schedule.trim();
        if schedule.is_empty() {
            return Err(AppError::BadRequest("Please select a schedule.".to_string()));
        }
        if !ALLOWED_UNITS.contains(&req.units) {
            return Err(AppError::BadRequest(format!(
                "Units must be one of {:?}, got {}.",
                ALLOWED_UNITS, req.units
            )));
        }

        let index = self
            .faculty
            .iter()
            .position(|f| f.name == faculty_name)
            .ok_or_else(|| AppError::NotFound("Selected faculty not found.".to_string()))?;

        let course = Course::new(course_name, req.year_level, req.units, schedule);
        if let Some(conflict) = find_conflict(&self.faculty[index], &course, &self.faculty) {
            warn!("Schedule conflict for {} / {}: {}", faculty_name, course.name, conflict);
            return Err(AppError::Conflict(format!(
                "This course conflicts with the faculty's existing schedule. Reason: {}.",
                conflict
            )));
        }

        let faculty = &mut self.faculty[index];
        info!(
            "Assigned {} ({}, {} units, {}) to {}",
            course.name, course.year_level, course.units, course.schedule, faculty.name
        );
        let row = course_row(faculty, &course);
        faculty.courses.push(course);
        Ok(row)
    }

    pub fn load_summary(&self, name: &str) -> Option<LoadSummary> {
        self.find(name).map(load_evaluator::evaluate)
    }

    pub fn faculty_rows(&self) -> Vec<FacultyRow> {
        self.faculty.iter().map(faculty_row).collect()
    }

    pub fn course_rows(&self) -> Vec<CourseRow> {
        self.faculty
            .iter()
            .flat_map(|f| f.courses.iter().map(move |c| course_row(f, c)))
            .collect()
    }
}

fn faculty_row(faculty: &Faculty) -> FacultyRow {
    let summary = load_evaluator::evaluate(faculty);
    FacultyRow {
        name: faculty.name.clone(),
        classification: faculty.classification,
        is_admin: faculty.is_admin,
        current_load: summary.current_load,
        required_load: summary.required_load,
        status: summary.label,
    }
}

fn course_row(faculty: &Faculty, course: &Course) -> CourseRow {
    CourseRow {
        faculty: faculty.name.clone(),
        course: course.name.clone(),
        year: course.year_level,
        units: course.units,
        schedule: course.schedule.clone(),
    }
}
