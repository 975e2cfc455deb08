//! Text (terminal) reporter with colors and formatting

use crate::models::{AssessmentResult, ModuleGroup};
use crate::scoring;
use anyhow::Result;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Score band color
fn score_color(score: f64) -> &'static str {
    if score >= 80.0 {
        "\x1b[32m" // Green
    } else if score >= 60.0 {
        "\x1b[33m" // Yellow
    } else {
        "\x1b[31m" // Red
    }
}

fn format_score(score: f64) -> String {
    format!("{}{:.1}{RESET}", score_color(score), score)
}

/// Render the result as formatted terminal output
pub fn render(result: &AssessmentResult) -> Result<String> {
    let mut out = String::new();
    let categories = scoring::category_scores(result);

    // Header
    out.push_str(&format!("\n{BOLD}Readiness Assessment{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Overall: {}{BOLD}{:.1}%{RESET}  {DIM}({}){RESET}\n\n",
        score_color(result.overall_score),
        result.overall_score,
        result.timestamp
    ));

    // Category scores (compact)
    out.push_str(&format!("{BOLD}SCORES{RESET}\n"));
    out.push_str(&format!(
        "  Modules: {}  Build: {}  Coverage: {}  Benchmarks: {}  Scenarios: {}\n\n",
        format_score(categories.module_completeness),
        format_score(categories.build_health),
        format_score(categories.test_coverage),
        format_score(categories.benchmark),
        format_score(categories.scenario)
    ));

    // Per-group module counts
    out.push_str(&format!("{BOLD}MODULES{RESET}\n"));
    for group in ModuleGroup::ALL {
        let total = result.modules_in(group).count();
        let working = result.modules_in(group).filter(|m| m.is_working()).count();
        out.push_str(&format!(
            "  {:<10} {}/{} complete\n",
            group.label(),
            working,
            total
        ));
    }
    out.push('\n');

    // Modules with issues
    let deficient: Vec<_> = result
        .modules
        .iter()
        .filter(|m| !m.issues.is_empty())
        .collect();
    if !deficient.is_empty() {
        out.push_str(&format!(
            "{BOLD}ISSUES{RESET} ({} modules)\n",
            deficient.len()
        ));
        for module in deficient.iter().take(10) {
            out.push_str(&format!(
                "  {DIM}{}/{}{RESET}  {}\n",
                module.group, module.name,
                module.issues.join("; ")
            ));
        }
        let remaining = deficient.len().saturating_sub(10);
        if remaining > 0 {
            out.push_str(&format!(
                "  {DIM}...and {} more (see the markdown report){RESET}\n",
                remaining
            ));
        }
        out.push('\n');
    }

    // Recommendations
    if !result.recommendations.is_empty() {
        out.push_str(&format!("{BOLD}RECOMMENDATIONS{RESET}\n"));
        for (i, recommendation) in result.recommendations.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, recommendation));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_result;

    #[test]
    fn test_text_render_has_sections() {
        let out = render(&test_result()).unwrap();
        assert!(out.contains("Readiness Assessment"));
        assert!(out.contains("SCORES"));
        assert!(out.contains("MODULES"));
        assert!(out.contains("RECOMMENDATIONS"));
    }

    #[test]
    fn test_text_render_lists_issues() {
        let out = render(&test_result()).unwrap();
        assert!(out.contains("missing manifest file"));
        assert!(out.contains("module directory missing"));
    }
}
