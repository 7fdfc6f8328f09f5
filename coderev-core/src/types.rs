//! Review data model shared by the client and the TUI.
//!
//! `FeedbackItem` values only ever come out of the model's JSON response
//! (see [`crate::parse`]); nothing in the application builds one by hand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five kinds of finding the reviewer may report.
///
/// Serialized exactly as the response schema declares them (`"BUG"`, `"STYLE"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeedbackCategory {
    Bug,
    Style,
    Performance,
    Suggestion,
    Security,
}

impl FeedbackCategory {
    /// Every category, in the order the response schema lists them.
    pub const ALL: [FeedbackCategory; 5] = [
        FeedbackCategory::Bug,
        FeedbackCategory::Style,
        FeedbackCategory::Performance,
        FeedbackCategory::Suggestion,
        FeedbackCategory::Security,
    ];

    /// Wire name of the category, e.g. `"PERFORMANCE"`.
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackCategory::Bug => "BUG",
            FeedbackCategory::Style => "STYLE",
            FeedbackCategory::Performance => "PERFORMANCE",
            FeedbackCategory::Suggestion => "SUGGESTION",
            FeedbackCategory::Security => "SECURITY",
        }
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reviewer finding: where, what kind, what is wrong, and how to fix it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// 1-based line number in the submitted code.
    pub line: i64,
    pub category: FeedbackCategory,
    /// Short explanation of the issue.
    pub comment: String,
    /// Code snippet or prose describing the fix.
    pub suggestion: String,
}

/// Source languages offered in the language picker.
///
/// The tag (`c`, `cpp`) is what is embedded in the prompt and in the code fence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    #[default]
    Cpp,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::C, Language::Cpp];

    /// Prompt/fence tag, e.g. `"cpp"`.
    pub fn tag(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }

    /// Human-readable label shown in the picker.
    pub fn label(self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
        }
    }

    /// File extension syntect should use to pick a grammar.
    pub fn syntax_extension(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(Language::C),
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            other => Err(format!("unsupported language '{other}' (expected c or cpp)")),
        }
    }
}
