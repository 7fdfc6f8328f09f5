//! UI rendering module for coderev.
//!
//! `render()` is the single entry point called from the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; the code
//! panel in `code_view.rs`; the feedback panel in `feedback_view.rs`; modals in
//! `help.rs` and `popup.rs`.

mod layout;
pub mod code_view;
pub mod feedback_view;
pub mod help;
pub mod keybindings;
pub mod popup;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame: both panels, the status bar, and any modal.
///
/// Viewport heights and panel rects are written back into `state` before the
/// panels draw, so scrolling and click-to-focus on the next event use this
/// frame's geometry.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [code, feedback, status_bar] = compute_layout(frame);

    state.code_viewport_height = inner_rect(code).height;
    state.feedback_viewport_height = inner_rect(feedback).height;
    state.panel_rects = [code, feedback];

    code_view::render_code(frame, code, state, theme);
    feedback_view::render_feedback(frame, feedback, state, theme);
    render_status_bar(frame, status_bar, state, theme);

    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::LanguagePicker => popup::render_language_picker(frame, state, theme),
        Mode::OpenFiles => popup::render_open_files(frame, state, theme),
        Mode::ConfirmQuit => popup::render_confirm_quit(frame, theme),
        Mode::Normal | Mode::Insert => {}
    }
}
