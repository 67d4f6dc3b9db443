//! Database operations for the `analysis_runs` table.
//!
//! A run row tracks one full campaign sweep through its lifecycle:
//! `queued` → `running` → `completed` | `failed`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `analysis_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub trigger_source: String,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// The schema defines this as `INTEGER NOT NULL DEFAULT 0`.
    pub results_recorded: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

const RUN_COLUMNS: &str = "id, public_id, trigger_source, status, \
                           started_at, completed_at, results_recorded, error_message, created_at";

/// Creates a new analysis run in `queued` status.
///
/// Generates a UUID in Rust and binds it to `public_id`. Returns the full
/// newly-created row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_analysis_run(
    pool: &PgPool,
    trigger_source: &str,
) -> Result<AnalysisRunRow, DbError> {
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, AnalysisRunRow>(&format!(
        "INSERT INTO analysis_runs (public_id, trigger_source, status) \
         VALUES ($1, $2, 'queued') \
         RETURNING {RUN_COLUMNS}"
    ))
    .bind(public_id)
    .bind(trigger_source)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a run as `running` and sets `started_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no run with `run_id` exists, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn start_analysis_run(pool: &PgPool, run_id: i64) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE analysis_runs SET status = 'running', started_at = NOW() WHERE id = $1",
    )
    .bind(run_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Marks a run as `completed`, recording the final result count.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no run with `run_id` exists, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn complete_analysis_run(
    pool: &PgPool,
    run_id: i64,
    results_recorded: i32,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE analysis_runs SET status = 'completed', completed_at = NOW(), \
         results_recorded = $2 WHERE id = $1",
    )
    .bind(run_id)
    .bind(results_recorded)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Marks a run as `failed` with an error message.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no run with `run_id` exists, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn fail_analysis_run(
    pool: &PgPool,
    run_id: i64,
    error_message: &str,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE analysis_runs SET status = 'failed', completed_at = NOW(), \
         error_message = $2 WHERE id = $1",
    )
    .bind(run_id)
    .bind(error_message)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Fetches a single run by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no run with `run_id` exists, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_analysis_run(pool: &PgPool, run_id: i64) -> Result<AnalysisRunRow, DbError> {
    sqlx::query_as::<_, AnalysisRunRow>(&format!(
        "SELECT {RUN_COLUMNS} FROM analysis_runs WHERE id = $1"
    ))
    .bind(run_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Fetches the most recently completed run, if any.
///
/// Used by the `report` command to re-render reports without a fresh sweep.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_completed_run(pool: &PgPool) -> Result<Option<AnalysisRunRow>, DbError> {
    let row = sqlx::query_as::<_, AnalysisRunRow>(&format!(
        "SELECT {RUN_COLUMNS} FROM analysis_runs \
         WHERE status = 'completed' ORDER BY completed_at DESC LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
