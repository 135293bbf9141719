use std::collections::HashMap;

use sqlx::{FromRow, SqlitePool};

use crate::error::AppError;
use crate::models::{Course, Faculty};
use crate::services::Roster;

#[derive(Debug, FromRow)]
struct FacultyRecord {
    id: i64,
    name: String,
    classification: String,
    is_admin: bool,
}

#[derive(Debug, FromRow)]
struct CourseRecord {
    faculty_id: i64,
    name: String,
    year_level: String,
    units: i64,
    schedule: String,
}

fn course_from_record(record: CourseRecord) -> Result<Course, AppError> {
    let year_level = record.year_level.parse().map_err(AppError::InvalidRecord)?;
    let units = u32::try_from(record.units).map_err(|_| {
        AppError::InvalidRecord(format!("course {} has invalid units {}", record.name, record.units))
    })?;
    Ok(Course::new(record.name, year_level, units, record.schedule))
}

pub async fn fetch_roster(db: &SqlitePool) -> Result<Roster, AppError> {
    let faculty_records = sqlx::query_as::<_, FacultyRecord>(
        "SELECT id, name, classification, is_admin FROM faculty ORDER BY id",
    )
    .fetch_all(db)
    .await?;

    let course_records = sqlx::query_as::<_, CourseRecord>(
        "SELECT faculty_id, name, year_level, units, schedule FROM courses ORDER BY faculty_id, id",
    )
    .fetch_all(db)
    .await?;

    let mut courses_by_faculty: HashMap<i64, Vec<Course>> = HashMap::new();
    for record in course_records {
        let faculty_id = record.faculty_id;
        courses_by_faculty
            .entry(faculty_id)
            .or_default()
            .push(course_from_record(record)?);
    }

    let mut faculty = Vec::with_capacity(faculty_records.len());
    for record in faculty_records {
        let classification = record
            .classification
            .parse()
            .map_err(AppError::InvalidRecord)?;
        let mut member = Faculty::new(record.name, classification, record.is_admin);
        member.courses = courses_by_faculty.remove(&record.id).unwrap_or_default();
        faculty.push(member);
    }

    if !courses_by_faculty.is_empty() {
        tracing::warn!(
            "Ignoring courses of {} unknown faculty ids",
            courses_by_faculty.len()
        );
    }

    Ok(Roster::new(faculty))
}

/// Overwrites both tables with the roster inside one transaction.
pub async fn replace_roster(db: &SqlitePool, roster: &Roster) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM courses").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM faculty").execute(&mut *tx).await?;

    for faculty in roster.faculty() {
        let faculty_id = sqlx::query(
            "INSERT INTO faculty (name, classification, is_admin) VALUES (?, ?, ?)",
        )
        .bind(&faculty.name)
        .bind(faculty.classification.label())
        .bind(faculty.is_admin)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for course in &faculty.courses {
            sqlx::query(
                "INSERT INTO courses (faculty_id, name, year_level, units, schedule) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(faculty_id)
            .bind(&course.name)
            .bind(course.year_level.label())
            .bind(i64::from(course.units))
            .bind(&course.schedule)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await
}

pub async fn count_faculty(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM faculty")
        .fetch_one(db)
        .await
}

pub async fn count_courses(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(db)
        .await
}
