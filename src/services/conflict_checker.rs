use std::fmt;

use crate::models::{Course, Faculty};

/// Which scheduling rule a rejected course ran into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// The faculty member already teaches in exactly this slot.
    SameSlot { existing: String },
    /// Same year level on the same day pattern for the same faculty member,
    /// regardless of the times.
    SameYearDayPattern { existing: String, day_pattern: String },
    /// Another faculty member teaches the same year level in exactly this slot.
    OtherFaculty { faculty: String, existing: String },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::SameSlot { existing } => {
                write!(f, "same time slot as {}", existing)
            }
            Conflict::SameYearDayPattern { existing, day_pattern } => {
                write!(f, "same year level on {} as {}", day_pattern, existing)
            }
            Conflict::OtherFaculty { faculty, existing } => {
                write!(f, "{} already teaches {} to this year level in this slot", faculty, existing)
            }
        }
    }
}

/// Returns the first rule `candidate` breaks when added to `faculty`.
///
/// The same-faculty checks run before the cross-faculty one. Other faculty
/// are told apart by name, which is unique within a roster.
pub fn find_conflict(faculty: &Faculty, candidate: &Course, roster: &[Faculty]) -> Option<Conflict> {
    for course in &faculty.courses {
        if course.schedule == candidate.schedule {
            return Some(Conflict::SameSlot {
                existing: course.name.clone(),
            });
        }
        if course.year_level == candidate.year_level && course.day_pattern() == candidate.day_pattern() {
            return Some(Conflict::SameYearDayPattern {
                existing: course.name.clone(),
                day_pattern: candidate.day_pattern().unwrap_or_default().to_string(),
            });
        }
    }

    roster
        .iter()
        .filter(|other| other.name != faculty.name)
        .flat_map(|other| other.courses.iter().map(move |course| (other, course)))
        .find(|(_, course)| {
            course.year_level == candidate.year_level && course.schedule == candidate.schedule
        })
        .map(|(other, course)| Conflict::OtherFaculty {
            faculty: other.name.clone(),
            existing: course.name.clone(),
        })
}

pub fn has_conflict(faculty: &Faculty, candidate: &Course, roster: &[Faculty]) -> bool {
    find_conflict(faculty, candidate, roster).is_some()
}
