//! Geographic dominance analysis engine.
//!
//! Sweeps a tiered set of test locations with a fixed keyword list, asks the
//! place-search API who ranks at each point, and turns the per-point results
//! into two reports: how far the subject business's visibility extends (the
//! dominance radius) and which nearby locations without visibility are the
//! best expansion targets.

pub mod analyzer;
pub mod dominance;
pub mod geo;
pub mod matcher;
pub mod opportunity;
pub mod result;
pub mod runner;

pub use analyzer::evaluate_point;
pub use dominance::{
    summarize, tier_order_from_results, DominanceReport, LocationPosition, TierCoverage,
};
pub use matcher::is_subject;
pub use opportunity::{rank_opportunities, Difficulty, ExpansionCandidate};
pub use result::AnalysisResult;
pub use runner::CampaignRunner;
