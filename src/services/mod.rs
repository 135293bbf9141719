pub mod conflict_checker;
pub mod load_evaluator;
pub mod roster;
pub mod workload_service;

pub use conflict_checker::{Conflict, find_conflict, has_conflict};
pub use load_evaluator::{LoadStatus, LoadSummary};
pub use roster::Roster;
pub use workload_service::{ExportFile, WorkloadService};
