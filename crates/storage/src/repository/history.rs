use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use super::HistoryStore;
use crate::dto::history::{Completion, NewHistoryEntry, UpdateHistoryEntryRequest};
use crate::error::{Result, StorageError};
use crate::models::HistoryEntry;

const HISTORY_COLUMNS: &str = "id, volunteer_id, event_id, event_name, event_date, event_location, \
     status, hours_worked, skills_used, feedback, rating, created_at, updated_at, completed_at";

#[derive(FromRow)]
struct HistoryRow {
    id: Uuid,
    volunteer_id: i64,
    event_id: i64,
    event_name: String,
    event_date: String,
    event_location: String,
    status: String,
    hours_worked: Option<i32>,
    skills_used: Vec<String>,
    feedback: Option<String>,
    rating: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<HistoryRow> for HistoryEntry {
    type Error = StorageError;

    fn try_from(row: HistoryRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            volunteer_id: row.volunteer_id,
            event_id: row.event_id,
            event_name: row.event_name,
            event_date: row.event_date,
            event_location: row.event_location,
            status: row.status.parse().map_err(StorageError::InvalidData)?,
            hours_worked: row.hours_worked,
            skills_used: row.skills_used,
            feedback: row.feedback,
            rating: row.rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        })
    }
}

fn into_entries(rows: Vec<HistoryRow>) -> Result<Vec<HistoryEntry>> {
    rows.into_iter().map(HistoryEntry::try_from).collect()
}

/// Postgres-backed history store
#[derive(Clone)]
pub struct PgHistoryRepository {
    pool: PgPool,
}

impl PgHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Locks the row, applies `change` and writes the result back in one transaction
    async fn modify<F>(&self, id: Uuid, change: F) -> Result<Option<HistoryEntry>>
    where
        F: FnOnce(&mut HistoryEntry) -> Result<()> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM volunteer_history WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut entry = HistoryEntry::try_from(row)?;
        change(&mut entry)?;
        save_entry(&mut tx, &entry).await?;

        tx.commit().await?;

        Ok(Some(entry))
    }
}

async fn save_entry(conn: &mut PgConnection, entry: &HistoryEntry) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE volunteer_history
        SET volunteer_id = $2, event_id = $3, event_name = $4, event_date = $5,
            event_location = $6, status = $7, hours_worked = $8, skills_used = $9,
            feedback = $10, rating = $11, updated_at = $12, completed_at = $13
        WHERE id = $1
        "#,
    )
    .bind(entry.id)
    .bind(entry.volunteer_id)
    .bind(entry.event_id)
    .bind(&entry.event_name)
    .bind(&entry.event_date)
    .bind(&entry.event_location)
    .bind(entry.status.as_str())
    .bind(entry.hours_worked)
    .bind(&entry.skills_used)
    .bind(&entry.feedback)
    .bind(entry.rating)
    .bind(entry.updated_at)
    .bind(entry.completed_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[async_trait]
impl HistoryStore for PgHistoryRepository {
    async fn list_by_volunteer(&self, volunteer_id: i64) -> Result<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM volunteer_history \
             WHERE volunteer_id = $1 ORDER BY created_at, id"
        ))
        .bind(volunteer_id)
        .fetch_all(&self.pool)
        .await?;

        into_entries(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HistoryEntry>> {
        let row = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM volunteer_history WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(HistoryEntry::try_from).transpose()
    }

    async fn create(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry> {
        let created = HistoryEntry::new(entry, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO volunteer_history
                (id, volunteer_id, event_id, event_name, event_date, event_location,
                 status, skills_used, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(created.id)
        .bind(created.volunteer_id)
        .bind(created.event_id)
        .bind(&created.event_name)
        .bind(&created.event_date)
        .bind(&created.event_location)
        .bind(created.status.as_str())
        .bind(&created.skills_used)
        .bind(created.created_at)
        .bind(created.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateHistoryEntryRequest,
    ) -> Result<Option<HistoryEntry>> {
        self.modify(id, |entry| entry.apply_patch(patch, Utc::now()))
            .await
    }

    async fn complete(&self, id: Uuid, completion: &Completion) -> Result<Option<HistoryEntry>> {
        self.modify(id, |entry| entry.complete(completion, Utc::now()))
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<HistoryEntry>> {
        let row = sqlx::query_as::<_, HistoryRow>(&format!(
            "DELETE FROM volunteer_history WHERE id = $1 RETURNING {HISTORY_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(HistoryEntry::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM volunteer_history ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        into_entries(rows)
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM volunteer_history \
             WHERE event_id = $1 ORDER BY created_at, id"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        into_entries(rows)
    }
}
