//! Candidate filtering, scoring and recommendation.
//!
//! The pipeline runs over candidates in generation order: budget filter,
//! deduplication, scoring, savings against the direct route, then exactly
//! one recommendation. The result is sorted best score first.

use std::collections::HashSet;

use crate::domain::{OptimizationMode, RouteKind, RouteVariant, SearchRequest};

use super::config::OptimizerConfig;

/// Drop candidates whose total cost exceeds the budget.
pub fn filter_budget(mut variants: Vec<RouteVariant>, budget_max: Option<f64>) -> Vec<RouteVariant> {
    if let Some(budget) = budget_max {
        variants.retain(|v| v.total_cost <= budget);
    }
    variants
}

/// Remove candidates with a city sequence already seen. First seen wins.
pub fn deduplicate(variants: Vec<RouteVariant>) -> Vec<RouteVariant> {
    let mut seen = HashSet::new();
    variants
        .into_iter()
        .filter(|v| seen.insert(v.cities.clone()))
        .collect()
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Multi-criteria score for a candidate.
///
/// Components:
/// - cost (0-40): share of the budget left, or 40 minus one point per 50 USD
/// - time (0-25): 25 minus one point per hour of flying
/// - stops (0-20): 20 minus 8 per stop
/// - comfort (5-15): by route kind
///
/// The mode reweights the components. A budget of zero counts as no budget.
pub fn score_variant(variant: &RouteVariant, mode: OptimizationMode, budget_max: Option<f64>) -> f64 {
    let cost = match budget_max.filter(|b| *b > 0.0) {
        Some(budget) => f64::max(0.0, 40.0 * (1.0 - variant.total_cost / budget)),
        None => f64::max(0.0, 40.0 - variant.total_cost / 50.0),
    };
    let time = f64::max(0.0, 25.0 - f64::from(variant.total_duration_mins) / 60.0);
    let stops = f64::max(0.0, 20.0 - 8.0 * variant.stops as f64);
    let comfort = variant.kind.comfort_score();

    let score = match mode {
        OptimizationMode::Cheapest => 2.0 * cost + 0.5 * time + stops + 0.5 * comfort,
        OptimizationMode::Fastest => 0.5 * cost + 2.0 * time + 1.5 * stops + comfort,
        OptimizationMode::Comfort => 0.5 * cost + time + 1.5 * stops + 2.0 * comfort,
        OptimizationMode::Balanced => cost + time + stops + comfort,
    };

    round2(score)
}

/// Savings of `variant` against the direct `baseline`.
///
/// The direct route itself, and every route when there is no baseline, keep
/// zero savings.
pub fn compute_savings(mut variant: RouteVariant, baseline: Option<&RouteVariant>) -> RouteVariant {
    variant.savings_amount = 0.0;
    variant.savings_percent = 0.0;

    let Some(direct) = baseline else {
        return variant;
    };
    if variant.kind == RouteKind::Direct {
        return variant;
    }

    variant.savings_amount = direct.total_cost - variant.total_cost;
    if direct.total_cost > 0.0 {
        variant.savings_percent = variant.savings_amount * 100.0 / direct.total_cost;
    }
    variant
}

/// Apply savings against the first direct candidate, if any.
pub fn apply_savings(variants: Vec<RouteVariant>) -> Vec<RouteVariant> {
    let baseline = variants.iter().find(|v| v.is_direct()).cloned();
    variants
        .into_iter()
        .map(|v| compute_savings(v, baseline.as_ref()))
        .collect()
}

/// Index of the best candidate for the mode. Ties go to the earliest.
fn best_index(variants: &[RouteVariant], mode: OptimizationMode) -> Option<usize> {
    let indexed = variants.iter().enumerate();
    let best = match mode {
        OptimizationMode::Cheapest => {
            indexed.min_by(|(_, a), (_, b)| a.total_cost.total_cmp(&b.total_cost))
        }
        OptimizationMode::Fastest => indexed.min_by_key(|(_, v)| v.total_duration_mins),
        OptimizationMode::Balanced | OptimizationMode::Comfort => {
            indexed.min_by(|(_, a), (_, b)| b.score.total_cmp(&a.score))
        }
    };
    best.map(|(i, _)| i)
}

/// Flag exactly one candidate as recommended.
///
/// Scanning in order, the first candidate that saves at least the threshold
/// against the direct route while scoring close to the best wins; otherwise
/// the best for the mode. Does nothing on an empty slice.
pub fn mark_recommended(variants: &mut [RouteVariant], mode: OptimizationMode, config: &OptimizerConfig) {
    for v in variants.iter_mut() {
        v.recommended = false;
    }

    let Some(best) = best_index(variants, mode) else {
        return;
    };
    let floor = config.recommend_score_ratio * variants[best].score;

    let chosen = variants
        .iter()
        .position(|v| v.savings_percent >= config.savings_threshold_percent && v.score >= floor)
        .unwrap_or(best);

    variants[chosen].recommended = true;
}

/// Run the full ranking pipeline over candidates in generation order.
///
/// Returns candidates sorted by score, best first. Equal scores keep
/// generation order.
pub fn rank_variants(
    variants: Vec<RouteVariant>,
    request: &SearchRequest,
    config: &OptimizerConfig,
) -> Vec<RouteVariant> {
    let variants = filter_budget(variants, request.budget_max);
    let mut variants = deduplicate(variants);

    for v in &mut variants {
        v.score = score_variant(v, request.mode, request.budget_max);
    }

    let mut variants = apply_savings(variants);
    mark_recommended(&mut variants, request.mode, config);

    variants.sort_by(|a, b| b.score.total_cmp(&a.score));
    variants
}
