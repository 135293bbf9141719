use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit counts a course may carry.
pub const ALLOWED_UNITS: [u32; 2] = [3, 6];

/// Time slots offered by the department timetable.
pub const STANDARD_TIME_SLOTS: [&str; 14] = [
    "MW 07:40am-09:10am",
    "MW 09:20am-10:50am",
    "MW 12:25pm-01:55pm",
    "MW 02:05pm-03:35pm",
    "TTh 07:40am-09:10am",
    "TTh 09:20am-10:50am",
    "TTh 12:25pm-01:55pm",
    "TTh 02:05pm-03:35pm",
    "TTh 03:45pm-05:15pm",
    "TTh 05:50pm-07:20pm",
    "TTh 07:30pm-09:00pm",
    "Sat 09:00am-12:00pm",
    "Sat 01:00pm-04:00pm",
    "Sat 05:00pm-08:00pm",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearLevel {
    #[serde(rename = "BA 1")]
    Ba1,
    #[serde(rename = "BA 2")]
    Ba2,
    #[serde(rename = "BA 3")]
    Ba3,
    #[serde(rename = "BA 4")]
    Ba4,
    #[serde(rename = "MA 1")]
    Ma1,
    #[serde(rename = "MA 2")]
    Ma2,
}

impl YearLevel {
    pub const ALL: [YearLevel; 6] = [
        YearLevel::Ba1,
        YearLevel::Ba2,
        YearLevel::Ba3,
        YearLevel::Ba4,
        YearLevel::Ma1,
        YearLevel::Ma2,
    ];

    pub fn label(self) -> &'static str {
        match self {
            YearLevel::Ba1 => "BA 1",
            YearLevel::Ba2 => "BA 2",
            YearLevel::Ba3 => "BA 3",
            YearLevel::Ba4 => "BA 4",
            YearLevel::Ma1 => "MA 1",
            YearLevel::Ma2 => "MA 2",
        }
    }
}

impl fmt::Display for YearLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for YearLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        YearLevel::ALL
            .into_iter()
            .find(|level| level.label() == s)
            .ok_or_else(|| format!("unknown year level: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub year_level: YearLevel,
    pub units: u32,
    pub schedule: String,
}

impl Course {
    pub fn new(
        name: impl Into<String>,
        year_level: YearLevel,
        units: u32,
        schedule: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            year_level,
            units,
            schedule: schedule.into(),
        }
    }

    /// Leading token of the schedule, e.g. `MW` for `MW 07:40am-09:10am`.
    pub fn day_pattern(&self) -> Option<&str> {
        self.schedule.split_whitespace().next()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub faculty: String,
    pub name: String,
    pub year_level: YearLevel,
    pub units: u32,
    pub schedule: String,
}

/// One line of the course table: `[Faculty, Course, Year, Units, Schedule]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRow {
    pub faculty: String,
    pub course: String,
    pub year: YearLevel,
    pub units: u32,
    pub schedule: String,
}
