//! Write and read operations for the `geo_analysis_results` table.
//!
//! The table is an append-only log: one row per analyzed (location, keyword)
//! point, never updated after insert.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// Input record for appending one analyzed point.
///
/// Floating-point fields are bound as `float8` and coerced to the table's
/// `NUMERIC` columns by the database engine.
#[derive(Debug, Clone)]
pub struct NewAnalysisResult {
    pub location_name: String,
    pub zip_code: Option<String>,
    pub tier: String,
    pub keyword: String,
    pub found: bool,
    pub rank_position: Option<i32>,
    pub distance_km: f64,
    pub lat: f64,
    pub lng: f64,
    pub competitor_count: i32,
    pub avg_competitor_rating: f64,
    pub avg_competitor_reviews: i32,
    pub analyzed_at: DateTime<Utc>,
}

/// A row from the `geo_analysis_results` table.
///
/// `NUMERIC` columns read back as [`Decimal`]; callers convert to `f64`
/// where arithmetic is needed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisResultRow {
    pub id: i64,
    pub run_id: i64,
    pub location_name: String,
    pub zip_code: Option<String>,
    pub tier: String,
    pub keyword: String,
    pub found: bool,
    pub rank_position: Option<i32>,
    pub distance_km: Decimal,
    pub lat: Decimal,
    pub lng: Decimal,
    pub competitor_count: i32,
    pub avg_competitor_rating: Decimal,
    pub avg_competitor_reviews: i32,
    pub analyzed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Appends one analyzed point to the result log. Returns the new row id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_analysis_result(
    pool: &PgPool,
    run_id: i64,
    result: &NewAnalysisResult,
) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO geo_analysis_results \
             (run_id, location_name, zip_code, tier, keyword, found, rank_position, \
              distance_km, lat, lng, competitor_count, avg_competitor_rating, \
              avg_competitor_reviews, analyzed_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, \
                 $8::float8, $9::float8, $10::float8, $11, $12::float8, $13, $14) \
         RETURNING id",
    )
    .bind(run_id)
    .bind(&result.location_name)
    .bind(&result.zip_code)
    .bind(&result.tier)
    .bind(&result.keyword)
    .bind(result.found)
    .bind(result.rank_position)
    .bind(result.distance_km)
    .bind(result.lat)
    .bind(result.lng)
    .bind(result.competitor_count)
    .bind(result.avg_competitor_rating)
    .bind(result.avg_competitor_reviews)
    .bind(result.analyzed_at)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Lists all result rows for a run in insertion (emission) order.
///
/// Insertion order preserves the campaign's declared tier/location/keyword
/// iteration order, which downstream aggregation depends on for its
/// first-in-input-order tie-breaks.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_results_for_run(
    pool: &PgPool,
    run_id: i64,
) -> Result<Vec<AnalysisResultRow>, DbError> {
    let rows = sqlx::query_as::<_, AnalysisResultRow>(
        "SELECT id, run_id, location_name, zip_code, tier, keyword, found, rank_position, \
                distance_km, lat, lng, competitor_count, avg_competitor_rating, \
                avg_competitor_reviews, analyzed_at, created_at \
         FROM geo_analysis_results WHERE run_id = $1 ORDER BY id",
    )
    .bind(run_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
