use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A fixed geographic probe point, defined at configuration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub zip: Option<String>,
}

/// A named distance band grouping test locations. Tiers are declared in
/// increasing distance from the base location and iterated in file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier {
    pub label: String,
    pub locations: Vec<TestLocation>,
}

/// The full campaign plan: ordered tiers of test locations plus the core
/// keywords probed at each of them.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationPlan {
    pub tiers: Vec<Tier>,
    pub keywords: Vec<String>,
}

impl LocationPlan {
    /// Tier labels in declared order, for report iteration.
    #[must_use]
    pub fn tier_labels(&self) -> Vec<String> {
        self.tiers.iter().map(|t| t.label.clone()).collect()
    }

    /// Number of (location, keyword) queries a full campaign will issue.
    #[must_use]
    pub fn total_queries(&self) -> usize {
        let locations: usize = self.tiers.iter().map(|t| t.locations.len()).sum();
        locations * self.keywords.len()
    }
}

/// Load and validate the location plan from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_plan(path: &Path) -> Result<LocationPlan, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PlanFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let plan: LocationPlan = serde_yaml::from_str(&content)?;
    validate_plan(&plan)?;

    Ok(plan)
}

fn validate_plan(plan: &LocationPlan) -> Result<(), ConfigError> {
    if plan.tiers.is_empty() {
        return Err(ConfigError::InvalidPlan(
            "plan must declare at least one tier".to_string(),
        ));
    }
    if plan.keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(ConfigError::InvalidPlan(
            "plan must declare at least one non-empty keyword".to_string(),
        ));
    }

    let mut seen_tiers: HashSet<&str> = HashSet::new();
    let mut seen_locations: HashSet<String> = HashSet::new();

    for tier in &plan.tiers {
        if tier.label.trim().is_empty() {
            return Err(ConfigError::InvalidPlan(
                "tier label must not be empty".to_string(),
            ));
        }
        if !seen_tiers.insert(tier.label.as_str()) {
            return Err(ConfigError::InvalidPlan(format!(
                "duplicate tier label: {}",
                tier.label
            )));
        }
        if tier.locations.is_empty() {
            return Err(ConfigError::InvalidPlan(format!(
                "tier '{}' has no locations",
                tier.label
            )));
        }

        for loc in &tier.locations {
            if loc.name.trim().is_empty() {
                return Err(ConfigError::InvalidPlan(format!(
                    "tier '{}' contains a location with an empty name",
                    tier.label
                )));
            }
            if !(-90.0..=90.0).contains(&loc.lat) {
                return Err(ConfigError::InvalidPlan(format!(
                    "location '{}' has out-of-range latitude {}",
                    loc.name, loc.lat
                )));
            }
            if !(-180.0..=180.0).contains(&loc.lng) {
                return Err(ConfigError::InvalidPlan(format!(
                    "location '{}' has out-of-range longitude {}",
                    loc.name, loc.lng
                )));
            }
            // Dedup in the opportunity ranker keys on location name, so
            // names must be unique across the whole plan, not just per tier.
            if !seen_locations.insert(loc.name.to_lowercase()) {
                return Err(ConfigError::InvalidPlan(format!(
                    "duplicate location name: {}",
                    loc.name
                )));
            }
        }
    }

    Ok(())
}
