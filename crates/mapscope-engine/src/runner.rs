//! The campaign runner: sequential sweep over every (tier, location, keyword)
//! combination.
//!
//! One outstanding search at a time, each followed by a randomized courtesy
//! delay. Per-point search failures are logged and skipped; persistence
//! failures are logged and do not discard the in-memory result. The runner
//! exclusively owns the result accumulator — aggregators receive a read-only
//! slice after the sweep completes.

use std::time::Duration;

use sqlx::PgPool;

use mapscope_core::{AppConfig, LocationPlan};
use mapscope_places::PlacesClient;

use crate::analyzer::evaluate_point;
use crate::result::AnalysisResult;

/// Drives a full analysis campaign over the configured plan.
pub struct CampaignRunner<'a> {
    client: &'a PlacesClient,
    config: &'a AppConfig,
    plan: &'a LocationPlan,
    /// Append-only persistence target: `(pool, run_id)`. When `None`
    /// (dry runs, tests) results are accumulated in memory only.
    sink: Option<(&'a PgPool, i64)>,
}

impl<'a> CampaignRunner<'a> {
    #[must_use]
    pub fn new(
        client: &'a PlacesClient,
        config: &'a AppConfig,
        plan: &'a LocationPlan,
        sink: Option<(&'a PgPool, i64)>,
    ) -> Self {
        Self {
            client,
            config,
            plan,
            sink,
        }
    }

    /// Runs the full combination matrix and returns results in emission
    /// order: tiers in declared order, locations within a tier in declared
    /// order, keywords in declared order.
    ///
    /// No retries; at-most-once semantics per point. A point whose search
    /// fails contributes nothing to the accumulator.
    pub async fn run(&self) -> Vec<AnalysisResult> {
        let mut results: Vec<AnalysisResult> = Vec::new();
        let mut first_query = true;

        for tier in &self.plan.tiers {
            tracing::info!(tier = %tier.label, locations = tier.locations.len(), "analyzing tier");

            for location in &tier.locations {
                for keyword in &self.plan.keywords {
                    if !first_query {
                        self.pace().await;
                    }
                    first_query = false;

                    tracing::info!(
                        location = %location.name,
                        keyword = %keyword,
                        "querying point"
                    );

                    let places = match self
                        .client
                        .nearby_search(
                            location.lat,
                            location.lng,
                            self.config.search_radius_m,
                            keyword,
                        )
                        .await
                    {
                        Ok(places) => places,
                        Err(e) => {
                            tracing::warn!(
                                location = %location.name,
                                keyword = %keyword,
                                error = %e,
                                "search failed — skipping point"
                            );
                            continue;
                        }
                    };

                    let result = evaluate_point(
                        &places,
                        location,
                        &tier.label,
                        keyword,
                        &self.config.base,
                        &self.config.business_keywords,
                        self.config.result_cap,
                    );

                    match result.rank_position {
                        Some(pos) => tracing::info!(
                            location = %location.name,
                            position = pos,
                            distance_km = result.distance_km,
                            "subject appears"
                        ),
                        None => tracing::info!(
                            location = %location.name,
                            distance_km = result.distance_km,
                            "subject not found"
                        ),
                    }

                    self.persist(&result).await;
                    results.push(result);
                }
            }
        }

        results
    }

    /// Writes one result to the sink, if configured. A write failure is
    /// logged and swallowed: the in-memory result is kept regardless.
    async fn persist(&self, result: &AnalysisResult) {
        let Some((pool, run_id)) = self.sink else {
            return;
        };
        if let Err(e) = mapscope_db::insert_analysis_result(pool, run_id, &result.to_new_row()).await
        {
            tracing::error!(
                location = %result.location_name,
                keyword = %result.keyword,
                error = %e,
                "failed to persist result — keeping in-memory copy"
            );
        }
    }

    /// Sleeps a uniformly random delay within the configured pacing interval.
    /// A courtesy to the API, not a rate-limit guarantee.
    async fn pace(&self) {
        let (min, max) = (self.config.pacing_min_ms, self.config.pacing_max_ms);
        if max == 0 {
            return;
        }
        let delay_ms = if min >= max {
            max
        } else {
            rand::random_range(min..=max)
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}
