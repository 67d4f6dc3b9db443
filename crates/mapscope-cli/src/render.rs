//! Text rendering of the engine's report structures.
//!
//! The engine exposes computed structures; everything about how they look on
//! a terminal lives here. Rendering builds line vectors first so the layout
//! is testable without capturing stdout.

use mapscope_engine::{
    rank_opportunities, summarize, AnalysisResult, DominanceReport, ExpansionCandidate,
};

const BANNER: &str = "================================================================================";

/// Renders the dominance map and the expansion strategy for a result set.
pub fn render_reports(results: &[AnalysisResult], tier_order: &[String], top_n: usize) {
    for line in dominance_lines(&summarize(results, tier_order)) {
        println!("{line}");
    }
    println!();
    for line in opportunity_lines(&rank_opportunities(results, top_n), results.is_empty()) {
        println!("{line}");
    }
}

fn dominance_lines(report: &DominanceReport) -> Vec<String> {
    let mut lines = vec![
        BANNER.to_string(),
        "TERRITORIAL DOMINANCE MAP".to_string(),
        BANNER.to_string(),
    ];

    match report {
        DominanceReport::NoPresence => {
            lines.push("no appearances found at any analyzed location".to_string());
        }
        DominanceReport::Dominant {
            radius_km,
            min_presence_km,
            avg_position,
            tiers,
        } => {
            lines.push(format!(
                "dominance radius: ~{radius_km:.0} km (presence from {min_presence_km:.1} km to {radius_km:.1} km)"
            ));
            lines.push(format!("average position: #{avg_position:.1}"));
            lines.push(String::new());
            lines.push("coverage by tier:".to_string());

            for tier in tiers {
                match tier.coverage {
                    None => lines.push(format!("  {}: no data", tier.tier)),
                    Some(coverage) => {
                        lines.push(format!(
                            "  {}: {}/{} searches ({:.0}%)",
                            tier.tier,
                            tier.appearances,
                            tier.total,
                            coverage * 100.0
                        ));
                        for lp in &tier.location_positions {
                            lines.push(format!(
                                "    {}: avg position #{:.1}",
                                lp.location_name, lp.avg_position
                            ));
                        }
                    }
                }
            }
        }
    }

    lines
}

fn opportunity_lines(candidates: &[ExpansionCandidate], no_data: bool) -> Vec<String> {
    let mut lines = vec![
        BANNER.to_string(),
        "TERRITORIAL EXPANSION STRATEGY".to_string(),
        BANNER.to_string(),
    ];

    if no_data {
        lines.push("no data collected — nothing to rank".to_string());
        return lines;
    }
    if candidates.is_empty() {
        lines.push("full visibility across all analyzed locations — no expansion candidates".to_string());
        return lines;
    }

    lines.push(format!(
        "top {} expansion opportunities (nearby locations with no presence):",
        candidates.len()
    ));
    for (i, c) in candidates.iter().enumerate() {
        lines.push(format!(
            "  {}. {} ({:.1} km, {})",
            i + 1,
            c.location_name,
            c.distance_km,
            c.tier
        ));
        lines.push(format!(
            "     competitors: {}  avg rating: {:.1}  avg reviews: {}  difficulty: {}",
            c.competitor_count, c.avg_competitor_rating, c.avg_competitor_reviews, c.difficulty
        ));
    }

    lines
}
