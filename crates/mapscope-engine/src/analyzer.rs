//! Per-point evaluation: one search response into one [`AnalysisResult`].
//!
//! This is a pure function over the already-fetched entity list so the rank,
//! competitor, and distance logic is testable without HTTP or a database.
//! The campaign runner owns the surrounding I/O (query, persist, pace).

use chrono::Utc;

use mapscope_core::{BaseLocation, TestLocation};
use mapscope_places::Place;

use crate::geo::haversine_km;
use crate::matcher::is_subject;
use crate::result::AnalysisResult;

/// Evaluates the entities returned for one (location, keyword) query.
///
/// Only the first `result_cap` entities are considered, both for the subject
/// rank scan and for competitor statistics. `rank_position` is the 1-based
/// index of the first subject match. The competitor set is every considered
/// entity that is not the subject; its rating and review averages are 0 when
/// the set is empty rather than a division error. Missing per-entity rating
/// or review fields count as 0, matching how unclaimed listings are scored.
#[must_use]
pub fn evaluate_point(
    places: &[Place],
    location: &TestLocation,
    tier: &str,
    keyword: &str,
    base: &BaseLocation,
    business_keywords: &[String],
    result_cap: usize,
) -> AnalysisResult {
    let considered = &places[..places.len().min(result_cap)];

    let rank_position = considered
        .iter()
        .position(|p| is_subject(&p.name, business_keywords))
        .and_then(|idx| u32::try_from(idx + 1).ok());

    let competitors: Vec<&Place> = considered
        .iter()
        .filter(|p| !is_subject(&p.name, business_keywords))
        .collect();

    let (avg_rating, avg_reviews) = competitor_averages(&competitors);

    let distance = haversine_km(base.lat, base.lng, location.lat, location.lng);

    AnalysisResult {
        location_name: location.name.clone(),
        zip_code: location.zip.clone(),
        tier: tier.to_owned(),
        keyword: keyword.to_owned(),
        found: rank_position.is_some(),
        rank_position,
        distance_km: round2(distance),
        lat: location.lat,
        lng: location.lng,
        competitor_count: u32::try_from(competitors.len()).unwrap_or(u32::MAX),
        avg_competitor_rating: avg_rating,
        avg_competitor_reviews: avg_reviews,
        analyzed_at: Utc::now(),
    }
}

/// Arithmetic means over the competitor set; `(0.0, 0)` when it is empty.
///
/// The review mean is truncated to a whole count, mirroring the stored
/// `INTEGER` column.
fn competitor_averages(competitors: &[&Place]) -> (f64, u32) {
    if competitors.is_empty() {
        return (0.0, 0);
    }

    let count = competitors.len() as u64;
    let rating_sum: f64 = competitors.iter().map(|p| p.rating.unwrap_or(0.0)).sum();
    let review_sum: u64 = competitors
        .iter()
        .map(|p| u64::from(p.user_ratings_total.unwrap_or(0)))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let avg_rating = round2(rating_sum / count as f64);
    let avg_reviews = u32::try_from(review_sum / count).unwrap_or(u32::MAX);

    (avg_rating, avg_reviews)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, rating: Option<f64>, reviews: Option<u32>) -> Place {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "rating": rating,
            "user_ratings_total": reviews,
        }))
        .expect("test place should deserialize")
    }

    fn test_location() -> TestLocation {
        TestLocation {
            name: "Hawthorne".to_string(),
            lat: 33.9164,
            lng: -118.3526,
            zip: Some("90250".to_string()),
        }
    }

    fn base() -> BaseLocation {
        BaseLocation {
            name: "Inglewood".to_string(),
            lat: 33.9616,
            lng: -118.3531,
        }
    }

    fn keywords() -> Vec<String> {
        vec!["sparkle".to_string()]
    }

    #[test]
    fn subject_at_third_entity_gets_rank_three() {
        let places = vec![
            place("Maids R Us", Some(4.0), Some(50)),
            place("Fresh Start", Some(5.0), Some(150)),
            place("Sparkle Cleaning Co", Some(4.9), Some(400)),
        ];
        let r = evaluate_point(
            &places,
            &test_location(),
            "tier_2_nearby",
            "house cleaning",
            &base(),
            &keywords(),
            20,
        );
        assert!(r.found);
        assert_eq!(r.rank_position, Some(3));
    }

    #[test]
    fn no_subject_match_means_not_found() {
        let places = vec![
            place("Maids R Us", Some(4.0), Some(50)),
            place("Fresh Start", Some(5.0), Some(150)),
        ];
        let r = evaluate_point(
            &places,
            &test_location(),
            "tier_2_nearby",
            "house cleaning",
            &base(),
            &keywords(),
            20,
        );
        assert!(!r.found);
        assert_eq!(r.rank_position, None);
    }

    #[test]
    fn competitor_averages_exclude_the_subject() {
        let places = vec![
            place("Maids R Us", Some(4.0), Some(50)),
            place("Sparkle Cleaning Co", Some(4.9), Some(400)),
            place("Fresh Start", Some(5.0), Some(150)),
        ];
        let r = evaluate_point(
            &places,
            &test_location(),
            "tier_2_nearby",
            "house cleaning",
            &base(),
            &keywords(),
            20,
        );
        assert_eq!(r.competitor_count, 2);
        assert!((r.avg_competitor_rating - 4.5).abs() < 1e-9);
        assert_eq!(r.avg_competitor_reviews, 100);
    }

    #[test]
    fn zero_competitors_yield_zero_averages() {
        let places = vec![place("Sparkle Cleaning Co", Some(4.9), Some(400))];
        let r = evaluate_point(
            &places,
            &test_location(),
            "tier_2_nearby",
            "house cleaning",
            &base(),
            &keywords(),
            20,
        );
        assert_eq!(r.competitor_count, 0);
        assert!(r.avg_competitor_rating.abs() < f64::EPSILON);
        assert_eq!(r.avg_competitor_reviews, 0);
    }

    #[test]
    fn missing_rating_and_reviews_count_as_zero() {
        let places = vec![
            place("Maids R Us", Some(4.0), Some(100)),
            place("Unclaimed Listing", None, None),
        ];
        let r = evaluate_point(
            &places,
            &test_location(),
            "tier_2_nearby",
            "house cleaning",
            &base(),
            &keywords(),
            20,
        );
        assert!((r.avg_competitor_rating - 2.0).abs() < 1e-9);
        assert_eq!(r.avg_competitor_reviews, 50);
    }

    #[test]
    fn entities_beyond_the_cap_are_ignored() {
        let mut places: Vec<Place> = (0..25)
            .map(|i| place(&format!("Competitor {i}"), Some(4.0), Some(10)))
            .collect();
        // Subject sits past the cap, so it must not be found.
        places.push(place("Sparkle Cleaning Co", Some(5.0), Some(1)));

        let r = evaluate_point(
            &places,
            &test_location(),
            "tier_2_nearby",
            "house cleaning",
            &base(),
            &keywords(),
            20,
        );
        assert!(!r.found);
        assert_eq!(r.competitor_count, 20);
    }

    #[test]
    fn empty_response_yields_empty_point() {
        let r = evaluate_point(
            &[],
            &test_location(),
            "tier_2_nearby",
            "house cleaning",
            &base(),
            &keywords(),
            20,
        );
        assert!(!r.found);
        assert_eq!(r.competitor_count, 0);
        assert!(r.distance_km > 0.0);
    }

    #[test]
    fn distance_is_measured_from_base_and_rounded() {
        let r = evaluate_point(
            &[],
            &test_location(),
            "tier_2_nearby",
            "house cleaning",
            &base(),
            &keywords(),
            20,
        );
        // Inglewood to Hawthorne is ~5 km; rounded to 2 decimal places.
        assert!((4.0..7.0).contains(&r.distance_km), "got {}", r.distance_km);
        assert!(((r.distance_km * 100.0).round() / 100.0 - r.distance_km).abs() < 1e-12);
    }
}
