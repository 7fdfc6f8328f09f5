//! Prompt template and response schema for the review request.
//!
//! Both are fixed: the only inputs are the code text and the language tag.
//! The schema uses Gemini's OpenAPI-subset type names (`ARRAY`, `OBJECT`, ...).

use serde_json::{json, Value};

use crate::types::{FeedbackCategory, Language};

/// Sampling temperature used when the config does not override it.
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Builds the reviewer prompt for `code` written in `language`.
///
/// The code is embedded verbatim inside a fenced block tagged with the
/// language, after the list of review categories.
pub fn build_prompt(code: &str, language: Language) -> String {
    let tag = language.tag();
    format!(
        "As an expert C/C++ code reviewer, provide a strict and thorough review of the following {tag} code.

Analyze for:
- Bugs: Logic errors, null pointers, memory leaks, undefined behavior.
- Performance: Bottlenecks, inefficient algorithms.
- Style: Readability, consistency with common C/C++ style guides.
- Security: Vulnerabilities like buffer overflows, format string bugs.
- Best Practices: Modern C++ features, resource management (RAII), and other improvements.

For each issue, provide a specific, actionable feedback item.
Return your feedback as a JSON array. If you find no issues, return an empty array.

Code to review:
```{tag}
{code}
```
"
    )
}

/// JSON schema constraining the model output to an array of feedback items.
///
/// All four fields are required; `category` is limited to the five wire names.
pub fn response_schema() -> Value {
    let categories: Vec<&str> = FeedbackCategory::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "line": {
                    "type": "INTEGER",
                    "description": "The line number of the code where the issue is found."
                },
                "category": {
                    "type": "STRING",
                    "description": "The category of the feedback.",
                    "enum": categories
                },
                "comment": {
                    "type": "STRING",
                    "description": "A concise comment explaining the issue."
                },
                "suggestion": {
                    "type": "STRING",
                    "description": "A code snippet or detailed explanation on how to fix the issue."
                }
            },
            "required": ["line", "category", "comment", "suggestion"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_code_and_language_tag() {
        let code = "int main() {\n    return 0;\n}";
        let prompt = build_prompt(code, Language::C);
        assert!(prompt.contains("review of the following c code"));
        assert!(prompt.contains(&format!("```c\n{code}\n```")));
    }

    #[test]
    fn prompt_asks_for_empty_array_when_clean() {
        let prompt = build_prompt("x", Language::Cpp);
        assert!(prompt.contains("If you find no issues, return an empty array."));
    }

    #[test]
    fn schema_requires_all_fields() {
        let schema = response_schema();
        assert_eq!(schema["type"], "ARRAY");
        let required = schema["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        for field in ["line", "category", "comment", "suggestion"] {
            assert!(required.iter().any(|v| v == field), "missing {field}");
        }
    }

    #[test]
    fn schema_enumerates_categories() {
        let schema = response_schema();
        let values = schema["items"]["properties"]["category"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(
            values,
            &vec![
                json!("BUG"),
                json!("STYLE"),
                json!("PERFORMANCE"),
                json!("SUGGESTION"),
                json!("SECURITY")
            ]
        );
    }
}
