use std::fmt;

use serde::Serialize;

use crate::models::Faculty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    BelowRequired { shortfall: u32 },
    Overload { excess: u32 },
    Satisfied,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::BelowRequired { shortfall } => {
                write!(f, "Below required ({} units short)", shortfall)
            }
            LoadStatus::Overload { excess } => write!(f, "Overload ({} units excess)", excess),
            LoadStatus::Satisfied => f.write_str("Satisfied"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub faculty: String,
    pub current_load: u32,
    pub required_load: u32,
    pub status: LoadStatus,
    pub label: String,
}

pub fn classify(current: u32, required: u32) -> LoadStatus {
    if current < required {
        LoadStatus::BelowRequired { shortfall: required - current }
    } else if current > required {
        LoadStatus::Overload { excess: current - required }
    } else {
        LoadStatus::Satisfied
    }
}

pub fn evaluate(faculty: &Faculty) -> LoadSummary {
    let current_load = faculty.current_load();
    let required_load = faculty.required_load();
    let status = classify(current_load, required_load);

    LoadSummary {
        faculty: faculty.name.clone(),
        current_load,
        required_load,
        status,
        label: status.to_string(),
    }
}
