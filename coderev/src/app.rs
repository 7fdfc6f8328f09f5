//! Central application state for coderev.
//!
//! Owns everything the renderer reads and the keybinding dispatcher mutates: the
//! code buffer, the review lifecycle, focus, mode, scroll offsets, and the small
//! amount of state behind the language picker and the open-files prompt.
//!
//! The review lifecycle is a single [`ReviewState`] value. Loading, error,
//! result, and the empty placeholder can therefore never be shown together.

use std::path::PathBuf;

use coderev_core::{FeedbackItem, InputBuffer, Language, SourceFile};
use ratatui::layout::Rect;
use uuid::Uuid;

use crate::highlight::CodeHighlighter;

/// Inline message shown when the user submits an empty buffer.
pub const BLANK_CODE_MESSAGE: &str = "Please enter some code to review.";

/// Editor mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation and commands (default).
    #[default]
    Normal,
    /// Typing goes into the code buffer.
    Insert,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
    /// Language selection popup.
    LanguagePicker,
    /// Prompt for one or more file paths to load.
    OpenFiles,
    /// Quit confirmation, shown when quitting would discard a non-empty buffer.
    ConfirmQuit,
}

/// Which panel currently has keyboard focus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left panel: the code being reviewed.
    #[default]
    Code,
    /// Right panel: review feedback.
    Feedback,
}

impl PanelFocus {
    /// Switches to the other panel. With two panels `next` and `prev` coincide.
    pub fn toggle(self) -> Self {
        match self {
            PanelFocus::Code => PanelFocus::Feedback,
            PanelFocus::Feedback => PanelFocus::Code,
        }
    }
}

/// Where the current review cycle stands.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ReviewState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last submission failed; holds the user-facing message.
    Failed(String),
    /// The last review finished. An empty list means "no issues found".
    Ready(Vec<FeedbackItem>),
}

impl ReviewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ReviewState::Loading)
    }
}

/// One accepted submission, handed to the review task.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    /// Correlates log lines for one review cycle.
    pub id: Uuid,
    pub code: String,
    pub language: Language,
}

/// What the review task reports back to the event loop.
#[derive(Debug)]
pub struct ReviewOutcome {
    pub id: Uuid,
    /// Findings, or the user-facing error message.
    pub result: Result<Vec<FeedbackItem>, String>,
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub mode: Mode,
    pub focus: PanelFocus,

    /// Code text and selected language.
    pub input: InputBuffer,
    /// Review lifecycle; the only source of truth for the feedback panel.
    pub review: ReviewState,

    /// First visible buffer row in the code panel. Kept in step with the cursor.
    pub code_scroll: usize,
    /// Vertical scroll offset for the feedback `Paragraph`.
    pub feedback_scroll: u16,
    /// Vertical scroll offset for the help overlay.
    pub help_scroll: u16,

    /// Inner height of the code panel, cached after each render.
    pub code_viewport_height: u16,
    /// Inner height of the feedback panel, cached after each render.
    pub feedback_viewport_height: u16,
    /// Outer rects of `[code, feedback]` from the last render, for click-to-focus.
    pub panel_rects: [Rect; 2],

    /// Highlighted row index in the language picker.
    pub language_cursor: usize,
    /// Text typed into the open-files prompt.
    pub path_input: String,
    /// Advanced on every logic tick; drives the loading spinner.
    pub tick_count: usize,

    /// Syntax-highlighting cache for the code panel.
    pub highlighter: CodeHighlighter,
}

impl AppState {
    /// Creates state with an empty buffer in `language`.
    pub fn new(language: Language) -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            input: InputBuffer::new(language),
            review: ReviewState::default(),
            code_scroll: 0,
            feedback_scroll: 0,
            help_scroll: 0,
            code_viewport_height: 0,
            feedback_viewport_height: 0,
            panel_rects: [Rect::default(); 2],
            language_cursor: 0,
            path_input: String::new(),
            tick_count: 0,
            highlighter: CodeHighlighter::default(),
        }
    }

    /// Whether the submit action is currently enabled.
    pub fn can_submit(&self) -> bool {
        self.input.can_submit(self.review.is_loading())
    }

    /// Starts a review cycle if the buffer allows it.
    ///
    /// While a request is in flight this is a no-op. A blank buffer sets the
    /// inline validation message without entering `Loading`. Otherwise any
    /// previous result or error is cleared and the request to dispatch is returned.
    pub fn begin_review(&mut self) -> Option<ReviewRequest> {
        if self.review.is_loading() {
            return None;
        }
        if self.input.is_blank() {
            self.review = ReviewState::Failed(BLANK_CODE_MESSAGE.to_owned());
            return None;
        }
        self.review = ReviewState::Loading;
        self.feedback_scroll = 0;
        Some(ReviewRequest {
            id: Uuid::new_v4(),
            code: self.input.code(),
            language: self.input.language(),
        })
    }

    /// Applies the result of a review task and leaves `Loading`.
    pub fn finish_review(&mut self, outcome: ReviewOutcome) {
        tracing::debug!(id = %outcome.id, ok = outcome.result.is_ok(), "applying review outcome");
        self.feedback_scroll = 0;
        self.review = match outcome.result {
            Ok(items) => ReviewState::Ready(items),
            Err(message) => ReviewState::Failed(message),
        };
    }

    /// Applies a finished file batch. A failed batch leaves the buffer untouched.
    pub fn apply_loaded_files(&mut self, result: std::io::Result<Vec<SourceFile>>) {
        match result {
            Ok(files) if files.is_empty() => {}
            Ok(files) => {
                tracing::info!(count = files.len(), "loaded source files into the buffer");
                self.input.apply_sources(&files);
                self.code_scroll = 0;
            }
            Err(e) => {
                tracing::error!(error = %e, "error reading files");
            }
        }
    }

    /// Parses the open-files prompt into paths (whitespace separated).
    pub fn take_path_input(&mut self) -> Vec<PathBuf> {
        let paths = self
            .path_input
            .split_whitespace()
            .map(PathBuf::from)
            .collect();
        self.path_input.clear();
        paths
    }

    /// Opens the language picker with the current language highlighted.
    pub fn open_language_picker(&mut self) {
        let current = self.input.language();
        self.language_cursor = Language::ALL
            .iter()
            .position(|l| *l == current)
            .unwrap_or(0);
        self.mode = Mode::LanguagePicker;
    }

    /// Confirms the highlighted language and closes the picker.
    pub fn select_language(&mut self) {
        if let Some(lang) = Language::ALL.get(self.language_cursor) {
            self.input.set_language(*lang);
        }
        self.mode = Mode::Normal;
    }

    /// Keeps the cursor row inside the visible window of the code panel.
    pub fn follow_cursor(&mut self) {
        let (row, _) = self.input.cursor();
        let height = (self.code_viewport_height as usize).max(1);
        if row < self.code_scroll {
            self.code_scroll = row;
        } else if row >= self.code_scroll + height {
            self.code_scroll = row + 1 - height;
        }
    }

    /// Scrolls the focused panel down by `lines` rows.
    ///
    /// For `Code` the cursor moves with the view so editing resumes where the
    /// user is looking.
    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Code => {
                for _ in 0..lines {
                    self.input.move_down();
                }
                self.follow_cursor();
            }
            PanelFocus::Feedback => {
                self.feedback_scroll = self.feedback_scroll.saturating_add(lines);
            }
        }
    }

    /// Scrolls the focused panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Code => {
                for _ in 0..lines {
                    self.input.move_up();
                }
                self.follow_cursor();
            }
            PanelFocus::Feedback => {
                self.feedback_scroll = self.feedback_scroll.saturating_sub(lines);
            }
        }
    }

    /// Scrolls the focused panel to the very top.
    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Code => {
                let (row, _) = self.input.cursor();
                for _ in 0..row {
                    self.input.move_up();
                }
                self.input.move_home();
                self.code_scroll = 0;
            }
            PanelFocus::Feedback => self.feedback_scroll = 0,
        }
    }

    /// Scrolls the focused panel to the very bottom.
    ///
    /// For `Feedback` the offset is set to `u16::MAX`; the renderer clamps it.
    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::Code => {
                let rows = self.input.lines().len();
                for _ in 0..rows {
                    self.input.move_down();
                }
                self.follow_cursor();
            }
            PanelFocus::Feedback => self.feedback_scroll = u16::MAX,
        }
    }

    /// Scrolls the focused panel down by half its visible height (at least 1).
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.focused_viewport_height() / 2).max(1));
    }

    /// Scrolls the focused panel up by half its visible height (at least 1).
    pub fn half_page_up(&mut self) {
        self.scroll_up((self.focused_viewport_height() / 2).max(1));
    }

    fn focused_viewport_height(&self) -> u16 {
        match self.focus {
            PanelFocus::Code => self.code_viewport_height,
            PanelFocus::Feedback => self.feedback_viewport_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coderev_core::FeedbackCategory;

    fn item(line: i64) -> FeedbackItem {
        FeedbackItem {
            line,
            category: FeedbackCategory::Bug,
            comment: "c".to_owned(),
            suggestion: "s".to_owned(),
        }
    }

    fn state_with(code: &str) -> AppState {
        let mut state = AppState::new(Language::Cpp);
        state.input.set_code(code);
        state
    }

    #[test]
    fn blank_submit_sets_validation_message_without_loading() {
        let mut state = state_with("   \n\t");
        assert!(state.begin_review().is_none());
        assert_eq!(state.review, ReviewState::Failed(BLANK_CODE_MESSAGE.to_owned()));
    }

    #[test]
    fn submit_carries_verbatim_code_and_language() {
        let mut state = state_with("int x = 1;\n");
        state.input.set_language(Language::C);
        let req = state.begin_review().unwrap();
        assert_eq!(req.code, "int x = 1;\n");
        assert_eq!(req.language, Language::C);
        assert_eq!(state.review, ReviewState::Loading);
    }

    #[test]
    fn second_submit_while_loading_is_rejected() {
        let mut state = state_with("x");
        assert!(state.begin_review().is_some());
        assert!(!state.can_submit());
        assert!(state.begin_review().is_none());
        assert_eq!(state.review, ReviewState::Loading);
    }

    #[test]
    fn entering_loading_clears_previous_result_and_error() {
        let mut state = state_with("x");
        state.review = ReviewState::Ready(vec![item(1)]);
        state.begin_review().unwrap();
        assert_eq!(state.review, ReviewState::Loading);

        let id = Uuid::new_v4();
        state.finish_review(ReviewOutcome { id, result: Err("boom".to_owned()) });
        state.begin_review().unwrap();
        assert_eq!(state.review, ReviewState::Loading);
    }

    #[test]
    fn finish_sets_exactly_one_outcome() {
        let mut state = state_with("x");
        let req = state.begin_review().unwrap();
        state.finish_review(ReviewOutcome { id: req.id, result: Ok(vec![]) });
        assert_eq!(state.review, ReviewState::Ready(vec![]));
        assert!(state.can_submit());

        let req = state.begin_review().unwrap();
        state.finish_review(ReviewOutcome { id: req.id, result: Err("failed".to_owned()) });
        assert_eq!(state.review, ReviewState::Failed("failed".to_owned()));
    }

    #[test]
    fn failed_file_batch_leaves_buffer_untouched() {
        let mut state = state_with("keep me");
        state.apply_loaded_files(Err(std::io::Error::other("nope")));
        assert_eq!(state.input.code(), "keep me");
        assert_eq!(state.review, ReviewState::Idle);
    }

    #[test]
    fn loaded_files_replace_buffer() {
        let mut state = state_with("old");
        state.apply_loaded_files(Ok(vec![SourceFile {
            name: "a.cpp".to_owned(),
            content: "X".to_owned(),
        }]));
        assert_eq!(state.input.code(), "// --- FILE: a.cpp ---\n\nX");
    }

    #[test]
    fn path_prompt_splits_on_whitespace() {
        let mut state = AppState::new(Language::Cpp);
        state.path_input = " a.cpp  src/b.h\t".to_owned();
        assert_eq!(
            state.take_path_input(),
            vec![PathBuf::from("a.cpp"), PathBuf::from("src/b.h")]
        );
        assert!(state.path_input.is_empty());
    }

    #[test]
    fn language_picker_round_trip() {
        let mut state = AppState::new(Language::Cpp);
        state.open_language_picker();
        assert_eq!(state.mode, Mode::LanguagePicker);
        assert_eq!(Language::ALL[state.language_cursor], Language::Cpp);
        state.language_cursor = 0;
        state.select_language();
        assert_eq!(state.input.language(), Language::C);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn follow_cursor_scrolls_code_view() {
        let mut state = state_with(&"line\n".repeat(50));
        state.code_viewport_height = 10;
        state.scroll_down(15);
        assert_eq!(state.input.cursor().0, 15);
        assert_eq!(state.code_scroll, 6);
        state.scroll_top();
        assert_eq!(state.code_scroll, 0);
        assert_eq!(state.input.cursor(), (0, 0));
    }
}
