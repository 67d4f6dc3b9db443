//! The per-point analysis record and its persistence conversions.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use mapscope_db::{AnalysisResultRow, NewAnalysisResult};

/// Outcome of one (location, keyword) query. Immutable after creation; the
/// unit of persistence and of all downstream aggregation.
///
/// Invariant: `found == rank_position.is_some()`. `rank_position`, when
/// present, is the 1-based index of the first subject match within the
/// capped entity list.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub location_name: String,
    pub zip_code: Option<String>,
    pub tier: String,
    pub keyword: String,
    pub found: bool,
    pub rank_position: Option<u32>,
    pub distance_km: f64,
    pub lat: f64,
    pub lng: f64,
    pub competitor_count: u32,
    pub avg_competitor_rating: f64,
    pub avg_competitor_reviews: u32,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Converts to the database input record.
    #[must_use]
    pub fn to_new_row(&self) -> NewAnalysisResult {
        NewAnalysisResult {
            location_name: self.location_name.clone(),
            zip_code: self.zip_code.clone(),
            tier: self.tier.clone(),
            keyword: self.keyword.clone(),
            found: self.found,
            rank_position: self.rank_position.and_then(|p| i32::try_from(p).ok()),
            distance_km: self.distance_km,
            lat: self.lat,
            lng: self.lng,
            competitor_count: i32::try_from(self.competitor_count).unwrap_or(i32::MAX),
            avg_competitor_rating: self.avg_competitor_rating,
            avg_competitor_reviews: i32::try_from(self.avg_competitor_reviews)
                .unwrap_or(i32::MAX),
            analyzed_at: self.analyzed_at,
        }
    }
}

impl From<AnalysisResultRow> for AnalysisResult {
    /// Rebuilds the in-memory record from a stored row, converting NUMERIC
    /// columns back to `f64` for aggregation arithmetic.
    fn from(row: AnalysisResultRow) -> Self {
        Self {
            location_name: row.location_name,
            zip_code: row.zip_code,
            tier: row.tier,
            keyword: row.keyword,
            found: row.found,
            rank_position: row.rank_position.and_then(|p| u32::try_from(p).ok()),
            distance_km: row.distance_km.to_f64().unwrap_or(0.0),
            lat: row.lat.to_f64().unwrap_or(0.0),
            lng: row.lng.to_f64().unwrap_or(0.0),
            competitor_count: u32::try_from(row.competitor_count).unwrap_or(0),
            avg_competitor_rating: row.avg_competitor_rating.to_f64().unwrap_or(0.0),
            avg_competitor_reviews: u32::try_from(row.avg_competitor_reviews).unwrap_or(0),
            analyzed_at: row.analyzed_at,
        }
    }
}
