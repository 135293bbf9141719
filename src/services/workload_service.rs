use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::error::AppError;
use crate::export::{self, ExportFormat};
use crate::models::{CourseRow, FacultyRow, NewCourseRequest, NewFacultyRequest};
use crate::services::load_evaluator::LoadSummary;
use crate::services::roster::Roster;
use crate::store::RosterStore;

/// An export ready to be handed to the user.
#[derive(Debug)]
pub struct ExportFile {
    pub format: ExportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Owns the in-memory roster and writes it back to the store after every
/// accepted change.
///
/// The roster lock is held for the whole operation, save included, so
/// changes are applied one at a time.
pub struct WorkloadService {
    store: Arc<dyn RosterStore>,
    roster: Mutex<Roster>,
}

impl WorkloadService {
    pub fn new(store: Arc<dyn RosterStore>, roster: Roster) -> Self {
        Self {
            store,
            roster: Mutex::new(roster),
        }
    }

    /// Builds the service from whatever the store holds.
    pub async fn load(store: Arc<dyn RosterStore>) -> Result<Self, AppError> {
        let roster = store.load().await?;
        info!("Loaded roster with {} faculty", roster.len());
        Ok(Self::new(store, roster))
    }

    pub async fn add_faculty(&self, req: NewFacultyRequest) -> Result<FacultyRow, AppError> {
        let mut roster = self.roster.lock().await;
        let mut next = roster.clone();
        let row = next.add_faculty(req)?;
        self.store.save(&next).await?;
        *roster = next;
        Ok(row)
    }

    pub async fn add_course(&self, req: NewCourseRequest) -> Result<CourseRow, AppError> {
        let mut roster = self.roster.lock().await;
        let mut next = roster.clone();
        let row = next.add_course(req)?;
        self.store.save(&next).await?;
        *roster = next;
        Ok(row)
    }

    pub async fn faculty_rows(&self) -> Vec<FacultyRow> {
        self.roster.lock().await.faculty_rows()
    }

    pub async fn course_rows(&self) -> Vec<CourseRow> {
        self.roster.lock().await.course_rows()
    }

    pub async fn faculty_names(&self) -> Vec<String> {
        let roster = self.roster.lock().await;
        roster.faculty().iter().map(|f| f.name.clone()).collect()
    }

    pub async fn load_summary(&self, name: &str) -> Result<LoadSummary, AppError> {
        self.roster
            .lock()
            .await
            .load_summary(name)
            .ok_or_else(|| AppError::NotFound(format!("Faculty {} not found.", name)))
    }

    pub async fn export(&self, format: ExportFormat) -> Result<ExportFile, AppError> {
        let (faculty, courses) = {
            let roster = self.roster.lock().await;
            (roster.faculty_rows(), roster.course_rows())
        };

        info!("Starting {} export...", format.label());
        let now = Utc::now();
        let bytes = match format {
            ExportFormat::Csv => export::render_csv(&faculty, &courses),
            ExportFormat::Pdf => Ok(export::render_pdf(&faculty, &courses, now)),
        }
        .map_err(|e| {
            error!("Error during {} export: {}", format.label(), e);
            AppError::Export(format!(
                "An error occurred while exporting to {}: {}",
                format.label(),
                e
            ))
        })?;
        info!("{} export completed successfully ({} bytes)", format.label(), bytes.len());

        Ok(ExportFile {
            format,
            file_name: export::export_file_name(format, now),
            bytes,
        })
    }

    /// Writes the current roster out; called once more on shutdown.
    pub async fn save(&self) -> Result<(), AppError> {
        let roster = self.roster.lock().await;
        self.store.save(&roster).await
    }
}
