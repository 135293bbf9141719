use std::sync::Arc;

use async_trait::async_trait;
use faculty_workload::db::{self, repository};
use faculty_workload::error::AppError;
use faculty_workload::models::{Classification, Course, Faculty, NewCourseRequest, NewFacultyRequest, YearLevel};
use faculty_workload::services::{Roster, WorkloadService};
use faculty_workload::store::{RosterStore, SqliteRosterStore};
use sqlx::SqlitePool;

async fn setup_pool() -> SqlitePool {
    db::connect("sqlite::memory:")
        .await
        .expect("Failed to create database")
}

fn sample_roster() -> Roster {
    let mut reyes = Faculty::new("A. Reyes", Classification::FullTimePhd, false);
    reyes.courses = vec![
        Course::new("Phil 101", YearLevel::Ba1, 6, "MW 07:40am-09:10am"),
        Course::new("Phil 102", YearLevel::Ba2, 3, "TTh 09:20am-10:50am"),
    ];
    let santos = Faculty::new("B. Santos", Classification::FullTimeMa, true);
    let mut lim = Faculty::new("D. Lim", Classification::PartTime, false);
    lim.courses = vec![Course::new("Thesis Writing", YearLevel::Ma2, 6, "Sat 05:00pm-08:00pm")];

    Roster::new(vec![reyes, santos, lim])
}

#[tokio::test]
async fn test_save_then_load_round_trip() {
    let pool = setup_pool().await;
    let roster = sample_roster();

    repository::replace_roster(&pool, &roster)
        .await
        .expect("Failed to save roster");
    let loaded = repository::fetch_roster(&pool)
        .await
        .expect("Failed to load roster");

    assert_eq!(loaded, roster);
}

#[tokio::test]
async fn test_repeated_saves_replace_instead_of_duplicating() {
    let pool = setup_pool().await;
    let mut roster = sample_roster();

    repository::replace_roster(&pool, &roster).await.unwrap();
    repository::replace_roster(&pool, &roster).await.unwrap();
    assert_eq!(repository::count_faculty(&pool).await.unwrap(), 3);
    assert_eq!(repository::count_courses(&pool).await.unwrap(), 3);

    roster
        .add_faculty(NewFacultyRequest {
            name: "E. Tan".to_string(),
            classification: Classification::PartTime,
            is_admin: false,
        })
        .unwrap();
    repository::replace_roster(&pool, &roster).await.unwrap();

    assert_eq!(repository::count_faculty(&pool).await.unwrap(), 4);
    assert_eq!(repository::count_courses(&pool).await.unwrap(), 3);
    assert_eq!(repository::fetch_roster(&pool).await.unwrap(), roster);
}

#[tokio::test]
async fn test_load_rejects_unknown_classification() {
    let pool = setup_pool().await;

    sqlx::query("INSERT INTO faculty (name, classification, is_admin) VALUES (?, ?, ?)")
        .bind("Z. Unknown")
        .bind("Visiting")
        .bind(false)
        .execute(&pool)
        .await
        .expect("Failed to insert faculty");

    let err = repository::fetch_roster(&pool).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidRecord(_)));
}

#[tokio::test]
async fn test_service_persists_every_accepted_change() {
    let pool = setup_pool().await;
    let store = Arc::new(SqliteRosterStore::new(pool.clone()));
    let service = WorkloadService::load(store.clone()).await.unwrap();

    service
        .add_faculty(NewFacultyRequest {
            name: "A. Reyes".to_string(),
            classification: Classification::FullTimePhd,
            is_admin: false,
        })
        .await
        .unwrap();
    service
        .add_course(NewCourseRequest {
            faculty: "A. Reyes".to_string(),
            name: "Phil 101".to_string(),
            year_level: YearLevel::Ba1,
            units: 3,
            schedule: "MW 07:40am-09:10am".to_string(),
        })
        .await
        .unwrap();
    let rejected = service
        .add_course(NewCourseRequest {
            faculty: "A. Reyes".to_string(),
            name: "Phil 102".to_string(),
            year_level: YearLevel::Ba1,
            units: 3,
            schedule: "MW 07:40am-09:10am".to_string(),
        })
        .await;
    assert!(matches!(rejected, Err(AppError::Conflict(_))));

    // A fresh service sees exactly what was accepted.
    let reloaded = WorkloadService::load(store).await.unwrap();
    let rows = reloaded.course_rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].course, "Phil 101");
    assert_eq!(reloaded.faculty_rows().await[0].status, "Below required (12 units short)");
}

struct FailingStore;

#[async_trait]
impl RosterStore for FailingStore {
    async fn load(&self) -> Result<Roster, AppError> {
        Ok(Roster::default())
    }

    async fn save(&self, _roster: &Roster) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }
}

#[tokio::test]
async fn test_failed_save_leaves_roster_unchanged() {
    let service = WorkloadService::load(Arc::new(FailingStore)).await.unwrap();

    let result = service
        .add_faculty(NewFacultyRequest {
            name: "A. Reyes".to_string(),
            classification: Classification::FullTimePhd,
            is_admin: false,
        })
        .await;

    assert!(matches!(result, Err(AppError::Database(_))));
    assert!(service.faculty_rows().await.is_empty());
}
