use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Course;

/// Units taken off the base load for faculty with administrative duties.
pub const ADMIN_REDUCTION: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Full-time PhD")]
    FullTimePhd,
    #[serde(rename = "Full-time MA")]
    FullTimeMa,
    #[serde(rename = "Part-time")]
    PartTime,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::FullTimePhd,
        Classification::FullTimeMa,
        Classification::PartTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Classification::FullTimePhd => "Full-time PhD",
            Classification::FullTimeMa => "Full-time MA",
            Classification::PartTime => "Part-time",
        }
    }

    /// Required load before any administrative reduction.
    pub fn base_load(self) -> u32 {
        match self {
            Classification::FullTimePhd => 15,
            Classification::FullTimeMa => 18,
            Classification::PartTime => 0,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown classification: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub name: String,
    pub classification: Classification,
    pub is_admin: bool,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Faculty {
    pub fn new(name: impl Into<String>, classification: Classification, is_admin: bool) -> Self {
        Self {
            name: name.into(),
            classification,
            is_admin,
            courses: Vec::new(),
        }
    }

    /// Part-time faculty carry no requirement, so the admin reduction only
    /// applies to the full-time classifications. Never drops below zero.
    pub fn required_load(&self) -> u32 {
        match self.classification {
            Classification::PartTime => 0,
            c if self.is_admin => c.base_load().saturating_sub(ADMIN_REDUCTION),
            c => c.base_load(),
        }
    }

    pub fn current_load(&self) -> u32 {
        self.courses.iter().map(|c| c.units).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFacultyRequest {
    pub name: String,
    pub classification: Classification,
    #[serde(default)]
    pub is_admin: bool,
}

/// One line of the faculty table:
/// `[Name, Classification, Admin, Current Load, Status]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacultyRow {
    pub name: String,
    pub classification: Classification,
    pub is_admin: bool,
    pub current_load: u32,
    pub required_load: u32,
    pub status: String,
}

impl FacultyRow {
    pub fn admin_label(&self) -> &'static str {
        if self.is_admin { "Yes" } else { "No" }
    }
}
