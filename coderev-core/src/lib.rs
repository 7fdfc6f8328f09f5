//! Core library for coderev.
//!
//! Holds everything that is not terminal UI: the feedback data model, the
//! prompt template and response schema sent to Gemini, the HTTP review client,
//! response parsing, source-file aggregation, and configuration loading.

pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod parse;
pub mod prompt;
pub mod types;

pub use client::{GeminiClient, ReviewService};
pub use config::Config;
pub use error::{Error, Result, REVIEW_FAILED_MESSAGE};
pub use input::{InputBuffer, SourceFile};
pub use types::{FeedbackCategory, FeedbackItem, Language};
