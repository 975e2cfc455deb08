//! Weighted readiness scoring
//!
//! Combines the five category scores into one overall readiness score and
//! derives improvement recommendations from the per-category values.
//!
//! # Scoring Formula
//!
//! ```text
//! Overall = Module × 0.30 + Build × 0.20 + Coverage × 0.20
//!         + Benchmark × 0.15 + Scenario × 0.15
//!
//! Module    = working / expected × 100        (working: exists + manifest)
//! Build     = buildable / working × 100       (0 when no module has a manifest)
//! Coverage  = mean coverage over existing modules (0 when none exist)
//! Benchmark = passed / registered × 100       (0 when none registered)
//! Scenario  = passed / registered × 100       (0 when none registered)
//! ```
//!
//! Aggregation is a pure function over an immutable snapshot of the
//! result aggregate: no state is shared with the pipeline stages.

use serde::{Deserialize, Serialize};

use crate::models::AssessmentResult;

/// Category weights. Must sum to 1.0.
pub const MODULE_WEIGHT: f64 = 0.30;
pub const BUILD_WEIGHT: f64 = 0.20;
pub const COVERAGE_WEIGHT: f64 = 0.20;
pub const BENCHMARK_WEIGHT: f64 = 0.15;
pub const SCENARIO_WEIGHT: f64 = 0.15;

/// Recommendation thresholds, per category.
const MODULE_THRESHOLD: f64 = 80.0;
const BUILD_THRESHOLD: f64 = 90.0;
const COVERAGE_THRESHOLD: f64 = 70.0;
const BENCHMARK_THRESHOLD: f64 = 60.0;
const SCENARIO_THRESHOLD: f64 = 50.0;

/// The five weighted sub-scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub module_completeness: f64,
    pub build_health: f64,
    pub test_coverage: f64,
    pub benchmark: f64,
    pub scenario: f64,
}

/// Aggregated score with its inputs and derived recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall: f64,
    pub categories: CategoryScores,
    pub recommendations: Vec<String>,
}

/// Compute the overall score and recommendations for one finished run.
pub fn aggregate(result: &AssessmentResult) -> ScoreBreakdown {
    let categories = category_scores(result);
    let overall = categories.module_completeness * MODULE_WEIGHT
        + categories.build_health * BUILD_WEIGHT
        + categories.test_coverage * COVERAGE_WEIGHT
        + categories.benchmark * BENCHMARK_WEIGHT
        + categories.scenario * SCENARIO_WEIGHT;

    ScoreBreakdown {
        overall,
        categories,
        recommendations: derive_recommendations(&categories),
    }
}

/// Compute the five category scores. Every ratio guards its denominator:
/// an empty category scores 0, never NaN.
pub fn category_scores(result: &AssessmentResult) -> CategoryScores {
    let total_modules = result.modules.len();
    let working = result.working_module_count();
    let module_completeness = ratio(working, total_modules);

    let buildable = result.modules.iter().filter(|m| m.buildable).count();
    let build_health = ratio(buildable, working);

    let existing: Vec<_> = result.modules.iter().filter(|m| m.exists).collect();
    let test_coverage = if existing.is_empty() {
        0.0
    } else {
        existing.iter().map(|m| m.coverage_percent).sum::<f64>() / existing.len() as f64
    };

    let benchmark = ratio(
        result.benchmarks.iter().filter(|b| b.passed).count(),
        result.benchmarks.len(),
    );
    let scenario = ratio(
        result.scenarios.iter().filter(|s| s.passed).count(),
        result.scenarios.len(),
    );

    CategoryScores {
        module_completeness,
        build_health,
        test_coverage,
        benchmark,
        scenario,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

/// Derive improvement recommendations from the category scores. Order is
/// fixed; every applicable recommendation is included.
fn derive_recommendations(categories: &CategoryScores) -> Vec<String> {
    let mut recommendations = Vec::new();

    if categories.module_completeness < MODULE_THRESHOLD {
        recommendations.push(
            "Complete missing framework modules, especially gaps in capability coverage".into(),
        );
    }
    if categories.build_health < BUILD_THRESHOLD {
        recommendations.push("Fix compilation and build failures across modules".into());
    }
    if categories.test_coverage < COVERAGE_THRESHOLD {
        recommendations.push("Raise test coverage toward an 80% target".into());
    }
    if categories.benchmark < BENCHMARK_THRESHOLD {
        recommendations
            .push("Implement real performance benchmarking to validate targets".into());
    }
    if categories.scenario < SCENARIO_THRESHOLD {
        recommendations.push("Implement end-to-end scenario verification".into());
    }

    recommendations
}
