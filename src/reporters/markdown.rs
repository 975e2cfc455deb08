//! Markdown reporter
//!
//! Renders the tabular human-readable form of an assessment: one module
//! table per group, a benchmark table, a scenario table, and a numbered
//! recommendations list. Rendering is read-only over the result.

use crate::models::{AssessmentResult, ModuleGroup, ModuleStatus};
use crate::scoring;
use anyhow::Result;

/// Render the result as a Markdown report
pub fn render(result: &AssessmentResult) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(result));
    md.push('\n');

    md.push_str(&render_category_scores(result));
    md.push('\n');

    md.push_str("## Module Status\n\n");
    for group in ModuleGroup::ALL {
        md.push_str(&format!("### {} Modules\n\n", group.label()));
        md.push_str(&render_module_table(result, group));
        md.push('\n');
    }

    md.push_str(&render_benchmarks(result));
    md.push('\n');

    md.push_str(&render_scenarios(result));
    md.push('\n');

    md.push_str(&render_recommendations(result));

    Ok(md)
}

fn render_header(result: &AssessmentResult) -> String {
    format!(
        r#"# Project Readiness Assessment

**Assessed**: {}

**Overall Score**: {:.1}%
"#,
        result.timestamp, result.overall_score
    )
}

fn render_category_scores(result: &AssessmentResult) -> String {
    let categories = scoring::category_scores(result);

    format!(
        r#"## Category Scores

| Category | Weight | Score |
|----------|--------|-------|
| Module completeness | 30% | {:.1}% |
| Build health | 20% | {:.1}% |
| Test coverage | 20% | {:.1}% |
| Benchmarks | 15% | {:.1}% |
| Scenarios | 15% | {:.1}% |
"#,
        categories.module_completeness,
        categories.build_health,
        categories.test_coverage,
        categories.benchmark,
        categories.scenario
    )
}

fn render_module_table(result: &AssessmentResult, group: ModuleGroup) -> String {
    let mut md = String::from(
        "| Module | Exists | Manifest | Buildable | Tests | Coverage | Issues |\n\
         |--------|--------|----------|-----------|-------|----------|--------|\n",
    );

    for module in result.modules_in(group) {
        md.push_str(&render_module_row(module));
    }

    md
}

fn render_module_row(module: &ModuleStatus) -> String {
    let issues = if module.issues.is_empty() {
        "-".to_string()
    } else {
        module.issues.join("; ")
    };

    format!(
        "| {} | {} | {} | {} | {} | {:.1}% | {} |\n",
        module.name,
        mark(module.exists),
        mark(module.has_manifest),
        mark(module.buildable),
        mark(module.has_tests),
        module.coverage_percent,
        issues
    )
}

fn render_benchmarks(result: &AssessmentResult) -> String {
    let mut md = String::from(
        "## Performance Benchmarks\n\n\
         | Benchmark | Target | Actual | Unit | Status | Details |\n\
         |-----------|--------|--------|------|--------|---------|\n",
    );

    for benchmark in &result.benchmarks {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            benchmark.name,
            benchmark.target_value,
            benchmark.actual_value,
            benchmark.unit,
            mark(benchmark.passed),
            benchmark.details
        ));
    }

    md
}

fn render_scenarios(result: &AssessmentResult) -> String {
    let mut md = String::from(
        "## Integration Scenarios\n\n\
         | Scenario | Status |\n\
         |----------|--------|\n",
    );

    for scenario in &result.scenarios {
        md.push_str(&format!(
            "| {} | {} |\n",
            scenario.name,
            mark(scenario.passed)
        ));
    }

    md
}

fn render_recommendations(result: &AssessmentResult) -> String {
    let mut md = String::from("## Recommendations\n\n");

    if result.recommendations.is_empty() {
        md.push_str("No recommendations. The project meets every category target.\n");
        return md;
    }

    for (i, recommendation) in result.recommendations.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, recommendation));
    }

    md
}

fn mark(passed: bool) -> &'static str {
    if passed {
        "✅"
    } else {
        "❌"
    }
}
