use axum::Json;
use axum::extract::Path;
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::error::AppError;
use crate::export::ExportFormat;
use crate::models::*;
use crate::services::LoadSummary;
use crate::state::AppState;

/// Choices the entry form offers.
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub classifications: Vec<Classification>,
    pub year_levels: Vec<YearLevel>,
    pub units: Vec<u32>,
    pub time_slots: Vec<&'static str>,
    pub faculty: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/options", get(options))
        .route("/faculty", get(list_faculty).post(create_faculty))
        .route("/faculty/{name}/load", get(faculty_load))
        .route("/courses", get(list_courses).post(create_course))
        .route("/export/csv", get(export_csv))
        .route("/export/pdf", get(export_pdf))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn options(State(state): State<AppState>) -> Json<FormOptions> {
    Json(FormOptions {
        classifications: Classification::ALL.to_vec(),
        year_levels: YearLevel::ALL.to_vec(),
        units: ALLOWED_UNITS.to_vec(),
        time_slots: STANDARD_TIME_SLOTS.to_vec(),
        faculty: state.service.faculty_names().await,
    })
}

async fn list_faculty(State(state): State<AppState>) -> Json<Vec<FacultyRow>> {
    Json(state.service.faculty_rows().await)
}

async fn create_faculty(
    State(state): State<AppState>,
    Json(req): Json<NewFacultyRequest>
) -> Result<Json<FacultyRow>, AppError> {
    let row = state.service.add_faculty(req).await?;
    Ok(Json(row))
}

async fn faculty_load(
    State(state): State<AppState>,
    Path(name): Path<String>
) -> Result<Json<LoadSummary>, AppError> {
    let summary = state.service.load_summary(&name).await?;
    Ok(Json(summary))
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<CourseRow>> {
    Json(state.service.course_rows().await)
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>
) -> Result<Json<CourseRow>, AppError> {
    let row = state.service.add_course(req).await?;
    Ok(Json(row))
}

async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    export(state, ExportFormat::Csv).await
}

async fn export_pdf(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    export(state, ExportFormat::Pdf).await
}

async fn export(state: AppState, format: ExportFormat) -> Result<impl IntoResponse, AppError> {
    let file = state.service.export(format).await?;
    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ),
    ];
    Ok((headers, file.bytes))
}
