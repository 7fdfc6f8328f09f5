//! Turns the model's response text into feedback items.
//!
//! Three outcomes, deliberately not symmetric:
//! - blank text means "no issues" and yields an empty list;
//! - text that is not JSON (or an array whose elements do not match the
//!   schema) is an error;
//! - valid JSON that is not an array is logged and treated as "no issues".

use serde_json::Value;

use crate::types::FeedbackItem;

/// Parses a trimmed response body into feedback items.
///
/// # Errors
///
/// Returns `serde_json::Error` when the text is not valid JSON or when an
/// array element does not deserialize into a [`FeedbackItem`].
pub fn parse_feedback(text: &str) -> Result<Vec<FeedbackItem>, serde_json::Error> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(_) => serde_json::from_value(value),
        other => {
            tracing::warn!(response = %other, "review response was not an array, returning no feedback");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedbackCategory;

    #[test]
    fn blank_response_is_no_findings() {
        assert_eq!(parse_feedback("  \n\t ").unwrap(), Vec::new());
    }

    #[test]
    fn empty_array_is_no_findings() {
        assert!(parse_feedback("[]").unwrap().is_empty());
    }

    #[test]
    fn object_response_is_downgraded_to_no_findings() {
        assert!(parse_feedback("{}").unwrap().is_empty());
        assert!(parse_feedback(r#"{"findings": []}"#).unwrap().is_empty());
        assert!(parse_feedback("42").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_feedback("not json at all").is_err());
        assert!(parse_feedback("[{\"line\": 1,").is_err());
    }

    #[test]
    fn array_items_are_parsed_in_order() {
        let text = r#"
            [
              {"line": 3, "category": "BUG", "comment": "leak", "suggestion": "free(p);"},
              {"line": 7, "category": "STYLE", "comment": "naming", "suggestion": "rename"}
            ]
        "#;
        let items = parse_feedback(text).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].line, 3);
        assert_eq!(items[0].category, FeedbackCategory::Bug);
        assert_eq!(items[0].suggestion, "free(p);");
        assert_eq!(items[1].category, FeedbackCategory::Style);
    }

    #[test]
    fn array_with_missing_field_is_an_error() {
        let text = r#"[{"line": 1, "category": "BUG", "comment": "x"}]"#;
        assert!(parse_feedback(text).is_err());
    }

    #[test]
    fn unknown_category_is_an_error() {
        let text = r#"[{"line": 1, "category": "NITPICK", "comment": "x", "suggestion": "y"}]"#;
        assert!(parse_feedback(text).is_err());
    }
}
