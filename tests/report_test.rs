//! Integration tests for the report emitters
//!
//! Runs the pipeline over a synthesized tree and verifies:
//! - The structured (JSON) form round-trips losslessly
//! - The tabular (Markdown) form has every expected section
//! - Emitting does not mutate the result

use std::path::Path;

use gatecheck::config::AssessmentConfig;
use gatecheck::models::AssessmentResult;
use gatecheck::pipeline::Pipeline;
use gatecheck::reporters;

fn assessed_result(root: &Path) -> AssessmentResult {
    std::fs::create_dir_all(root.join("frame/frame-actor/src/main/java")).expect("sources");
    std::fs::create_dir_all(root.join("frame/frame-actor/src/test/java")).expect("tests");
    std::fs::write(root.join("frame/frame-actor/pom.xml"), "<project/>").expect("manifest");

    Pipeline::new(AssessmentConfig::reference())
        .without_build()
        .run(root)
}

#[test]
fn test_json_round_trip_from_pipeline() {
    let workspace = tempfile::tempdir().expect("create temp dir");
    let result = assessed_result(workspace.path());

    let json = reporters::render_json(&result).expect("render JSON");
    let restored: AssessmentResult = serde_json::from_str(&json).expect("parse JSON");

    assert_eq!(restored, result);
}

#[test]
fn test_json_shape() {
    let workspace = tempfile::tempdir().expect("create temp dir");
    let result = assessed_result(workspace.path());

    let json = reporters::render_json(&result).expect("render JSON");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse JSON");

    assert!(parsed["overall_score"].is_number());
    assert!(parsed["timestamp"].is_string());
    assert_eq!(parsed["modules"].as_array().expect("modules").len(), 24);
    assert_eq!(parsed["benchmarks"].as_array().expect("benchmarks").len(), 5);
    assert_eq!(parsed["scenarios"].as_array().expect("scenarios").len(), 9);
    assert!(parsed["recommendations"].is_array());

    let actor = parsed["modules"]
        .as_array()
        .expect("modules")
        .iter()
        .find(|m| m["name"] == "actor")
        .expect("actor module");
    assert_eq!(actor["group"], "framework");
    assert_eq!(actor["exists"], true);
    assert_eq!(actor["has_manifest"], true);
    assert_eq!(actor["coverage_percent"], 60.0);
}

#[test]
fn test_markdown_sections_from_pipeline() {
    let workspace = tempfile::tempdir().expect("create temp dir");
    let result = assessed_result(workspace.path());

    let md = reporters::render_markdown(&result).expect("render markdown");

    assert!(md.contains("# Project Readiness Assessment"));
    assert!(md.contains("## Category Scores"));
    assert!(md.contains("### Framework Modules"));
    assert!(md.contains("### Business Modules"));
    assert!(md.contains("### Support Modules"));
    assert!(md.contains("## Performance Benchmarks"));
    assert!(md.contains("## Integration Scenarios"));
    assert!(md.contains("## Recommendations"));

    // One row per expected module plus table headers
    assert!(md.contains("| actor | ✅ | ✅ | ❌ | ✅ | 60.0% | - |"));
    assert!(md.contains("| ecs | ❌ |"));
}

#[test]
fn test_emitting_does_not_mutate_result() {
    let workspace = tempfile::tempdir().expect("create temp dir");
    let result = assessed_result(workspace.path());
    let snapshot = result.clone();

    reporters::render_json(&result).expect("render JSON");
    reporters::render_markdown(&result).expect("render markdown");
    reporters::render_text(&result).expect("render text");

    assert_eq!(result, snapshot);
}
