use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::db::repository;
use crate::error::AppError;
use crate::services::Roster;

/// Where the roster lives between launches.
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn load(&self) -> Result<Roster, AppError>;
    /// Replaces everything previously saved with `roster`.
    async fn save(&self, roster: &Roster) -> Result<(), AppError>;
}

pub struct SqliteRosterStore {
    db: SqlitePool,
}

impl SqliteRosterStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RosterStore for SqliteRosterStore {
    async fn load(&self) -> Result<Roster, AppError> {
        let roster = repository::fetch_roster(&self.db).await?;
        tracing::debug!("Loaded {} faculty from database", roster.len());
        Ok(roster)
    }

    async fn save(&self, roster: &Roster) -> Result<(), AppError> {
        repository::replace_roster(&self.db, roster).await?;
        tracing::debug!("Saved {} faculty to database", roster.len());
        Ok(())
    }
}

/// Keeps nothing; every launch starts from an empty roster.
pub struct NoopRosterStore;

#[async_trait]
impl RosterStore for NoopRosterStore {
    async fn load(&self) -> Result<Roster, AppError> {
        Ok(Roster::default())
    }

    async fn save(&self, _roster: &Roster) -> Result<(), AppError> {
        Ok(())
    }
}
