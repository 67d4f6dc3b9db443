//! Tiered coverage aggregation and the dominance radius.

use serde::Serialize;

use crate::result::AnalysisResult;

/// Mean subject rank for one location with at least one appearance.
#[derive(Debug, Clone, Serialize)]
pub struct LocationPosition {
    pub location_name: String,
    pub avg_position: f64,
}

/// Coverage statistics for one declared tier.
///
/// `coverage` is `None` when the tier produced no results at all — a "no
/// data" state distinct from 0% coverage.
#[derive(Debug, Clone, Serialize)]
pub struct TierCoverage {
    pub tier: String,
    pub appearances: usize,
    pub total: usize,
    pub coverage: Option<f64>,
    /// Locations with at least one appearance, in first-result order.
    pub location_positions: Vec<LocationPosition>,
}

/// The territorial dominance summary derived from a full result set.
#[derive(Debug, Clone, Serialize)]
pub enum DominanceReport {
    /// The subject appeared nowhere. A defined terminal state, not an error.
    NoPresence,
    Dominant {
        /// Maximum distance at which the subject appeared.
        radius_km: f64,
        /// Minimum distance at which the subject appeared.
        min_presence_km: f64,
        /// Mean rank position across all appearances.
        avg_position: f64,
        /// Per-tier coverage in declared tier order.
        tiers: Vec<TierCoverage>,
    },
}

/// Aggregates the result set into a [`DominanceReport`].
///
/// Tiers are reported in `tier_order` (the plan's declared order), giving a
/// strictly widening view: overall radius, then per-tier coverage, then
/// per-location mean rank. The caller passes an immutable slice; nothing
/// here mutates or reorders the underlying results.
#[must_use]
pub fn summarize(results: &[AnalysisResult], tier_order: &[String]) -> DominanceReport {
    let present: Vec<&AnalysisResult> = results.iter().filter(|r| r.found).collect();
    if present.is_empty() {
        return DominanceReport::NoPresence;
    }

    let radius_km = present
        .iter()
        .map(|r| r.distance_km)
        .fold(f64::MIN, f64::max);
    let min_presence_km = present
        .iter()
        .map(|r| r.distance_km)
        .fold(f64::MAX, f64::min);

    let position_sum: u64 = present
        .iter()
        .filter_map(|r| r.rank_position.map(u64::from))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let avg_position = position_sum as f64 / present.len() as f64;

    let tiers = tier_order
        .iter()
        .map(|tier| tier_coverage(results, tier))
        .collect();

    DominanceReport::Dominant {
        radius_km,
        min_presence_km,
        avg_position,
        tiers,
    }
}

/// Recovers the declared tier order from a result set's emission order.
///
/// Results are emitted tier-by-tier, so first appearance order matches the
/// plan's declared order. Used when re-rendering a stored run without the
/// plan file at hand.
#[must_use]
pub fn tier_order_from_results(results: &[AnalysisResult]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for r in results {
        if !order.contains(&r.tier) {
            order.push(r.tier.clone());
        }
    }
    order
}

fn tier_coverage(results: &[AnalysisResult], tier: &str) -> TierCoverage {
    let in_tier: Vec<&AnalysisResult> = results.iter().filter(|r| r.tier == tier).collect();
    let appearances: Vec<&&AnalysisResult> = in_tier.iter().filter(|r| r.found).collect();

    let coverage = if in_tier.is_empty() {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        Some(appearances.len() as f64 / in_tier.len() as f64)
    };

    // Distinct locations with >=1 appearance, keeping first-result order.
    let mut location_positions: Vec<LocationPosition> = Vec::new();
    for r in &appearances {
        if location_positions
            .iter()
            .any(|lp| lp.location_name == r.location_name)
        {
            continue;
        }
        let positions: Vec<u64> = appearances
            .iter()
            .filter(|o| o.location_name == r.location_name)
            .filter_map(|o| o.rank_position.map(u64::from))
            .collect();
        if positions.is_empty() {
            continue;
        }
        let sum: u64 = positions.iter().sum();
        #[allow(clippy::cast_precision_loss)]
        let avg_position = sum as f64 / positions.len() as f64;
        location_positions.push(LocationPosition {
            location_name: r.location_name.clone(),
            avg_position,
        });
    }

    TierCoverage {
        tier: tier.to_owned(),
        appearances: appearances.len(),
        total: in_tier.len(),
        coverage,
        location_positions,
    }
}
