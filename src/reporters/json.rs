//! JSON reporter
//!
//! Outputs the full AssessmentResult as pretty-printed JSON. The document
//! is the direct serde form of the data model, so reading it back yields
//! the original result field for field.

use crate::models::AssessmentResult;
use anyhow::Result;

/// Render the result as JSON
pub fn render(result: &AssessmentResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render the result as compact JSON (single line)
pub fn render_compact(result: &AssessmentResult) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_result;

    #[test]
    fn test_json_render_valid() {
        let result = test_result();
        let json_str = render(&result).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["overall_score"], 24.2);
        assert_eq!(parsed["modules"].as_array().expect("modules array").len(), 3);
        assert_eq!(parsed["modules"][0]["group"], "framework");
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let result = test_result();
        let json_str = render(&result).expect("render JSON");
        let restored: crate::models::AssessmentResult =
            serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(restored, result);
    }

    #[test]
    fn test_json_render_compact() {
        let result = test_result();
        let json_str = render_compact(&result).expect("render compact JSON");
        assert!(!json_str.contains('\n'));
        let _: serde_json::Value = serde_json::from_str(&json_str).expect("parse compact JSON");
    }
}
