//! Expansion-opportunity ranking over locations with no presence.

use std::collections::HashSet;

use serde::Serialize;

use crate::result::AnalysisResult;

/// Coarse competitive barrier estimate, derived from average competitor
/// review volume. Fixed documented thresholds, not configurable per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// `< 100` reviews → EASY, `< 200` → MEDIUM, otherwise HARD.
    #[must_use]
    pub fn from_avg_reviews(avg_reviews: u32) -> Self {
        if avg_reviews < 100 {
            Difficulty::Easy
        } else if avg_reviews < 200 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "EASY"),
            Difficulty::Medium => write!(f, "MEDIUM"),
            Difficulty::Hard => write!(f, "HARD"),
        }
    }
}

/// A location with zero presence across all its keyword results, ranked by
/// proximity as an outreach priority.
#[derive(Debug, Clone, Serialize)]
pub struct ExpansionCandidate {
    pub location_name: String,
    pub distance_km: f64,
    pub tier: String,
    pub competitor_count: u32,
    pub avg_competitor_rating: f64,
    pub avg_competitor_reviews: u32,
    pub difficulty: Difficulty,
}

/// Ranks locations where the subject never appeared.
///
/// Dedup is by location name with an explicit first-in-input-order tie-break:
/// multiple keyword misses at one location are not distinguished, and the
/// first such result represents the location. The sort by distance is stable,
/// so equidistant candidates also keep input order. Truncated to `top_n`.
///
/// An empty absent set yields an empty list — full dominance is a valid
/// terminal outcome, distinct from "no data collected".
#[must_use]
pub fn rank_opportunities(results: &[AnalysisResult], top_n: usize) -> Vec<ExpansionCandidate> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut absent: Vec<&AnalysisResult> = results
        .iter()
        .filter(|r| !r.found)
        .filter(|r| seen.insert(r.location_name.as_str()))
        .collect();

    absent.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    absent.truncate(top_n);

    absent
        .into_iter()
        .map(|r| ExpansionCandidate {
            location_name: r.location_name.clone(),
            distance_km: r.distance_km,
            tier: r.tier.clone(),
            competitor_count: r.competitor_count,
            avg_competitor_rating: r.avg_competitor_rating,
            avg_competitor_reviews: r.avg_competitor_reviews,
            difficulty: Difficulty::from_avg_reviews(r.avg_competitor_reviews),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn absent_result(location: &str, keyword: &str, distance_km: f64, reviews: u32) -> AnalysisResult {
        AnalysisResult {
            location_name: location.to_string(),
            zip_code: None,
            tier: "t1".to_string(),
            keyword: keyword.to_string(),
            found: false,
            rank_position: None,
            distance_km,
            lat: 0.0,
            lng: 0.0,
            competitor_count: 8,
            avg_competitor_rating: 4.2,
            avg_competitor_reviews: reviews,
            analyzed_at: Utc::now(),
        }
    }

    fn present_result(location: &str, distance_km: f64) -> AnalysisResult {
        AnalysisResult {
            rank_position: Some(1),
            found: true,
            ..absent_result(location, "cleaning", distance_km, 50)
        }
    }

    #[test]
    fn candidates_are_sorted_by_distance_ascending() {
        let results = vec![
            absent_result("Far", "cleaning", 10.0, 50),
            absent_result("Near", "cleaning", 3.0, 50),
            absent_result("Mid", "cleaning", 7.0, 50),
        ];
        let ranked = rank_opportunities(&results, 10);
        let names: Vec<&str> = ranked.iter().map(|c| c.location_name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Mid", "Far"]);
        assert!((ranked[0].distance_km - 3.0).abs() < 1e-9);
    }

    #[test]
    fn one_candidate_per_location_first_keyword_wins() {
        let results = vec![
            absent_result("Torrance", "house cleaning", 11.0, 90),
            absent_result("Torrance", "maid service", 11.0, 210),
        ];
        let ranked = rank_opportunities(&results, 10);
        assert_eq!(ranked.len(), 1);
        // First-in-input-order representative: the house cleaning miss.
        assert_eq!(ranked[0].avg_competitor_reviews, 90);
        assert_eq!(ranked[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn present_locations_are_not_candidates() {
        let results = vec![
            present_result("Covered", 2.0),
            absent_result("Uncovered", "cleaning", 5.0, 50),
        ];
        let ranked = rank_opportunities(&results, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].location_name, "Uncovered");
    }

    #[test]
    fn full_dominance_yields_empty_candidate_list() {
        let results = vec![present_result("A", 2.0), present_result("B", 4.0)];
        assert!(rank_opportunities(&results, 10).is_empty());
    }

    #[test]
    fn list_is_truncated_to_top_n() {
        let results: Vec<AnalysisResult> = (0..15)
            .map(|i| absent_result(&format!("Loc {i}"), "cleaning", f64::from(i), 50))
            .collect();
        let ranked = rank_opportunities(&results, 10);
        assert_eq!(ranked.len(), 10);
    }

    #[test]
    fn equidistant_candidates_keep_input_order() {
        let results = vec![
            absent_result("First", "cleaning", 5.0, 50),
            absent_result("Second", "cleaning", 5.0, 50),
        ];
        let ranked = rank_opportunities(&results, 10);
        assert_eq!(ranked[0].location_name, "First");
        assert_eq!(ranked[1].location_name, "Second");
    }

    #[test]
    fn difficulty_thresholds_are_boundary_exact() {
        assert_eq!(Difficulty::from_avg_reviews(99), Difficulty::Easy);
        assert_eq!(Difficulty::from_avg_reviews(100), Difficulty::Medium);
        assert_eq!(Difficulty::from_avg_reviews(199), Difficulty::Medium);
        assert_eq!(Difficulty::from_avg_reviews(200), Difficulty::Hard);
    }

    #[test]
    fn difficulty_labels_render_uppercase() {
        assert_eq!(Difficulty::Easy.to_string(), "EASY");
        assert_eq!(Difficulty::Medium.to_string(), "MEDIUM");
        assert_eq!(Difficulty::Hard.to_string(), "HARD");
    }
}
