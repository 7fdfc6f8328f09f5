//! Two-panel layout engine for coderev.
//!
//! Pure layout arithmetic plus the shared panel `Block` and the status bar.
//! Recomputed on every draw so it always reflects the live terminal size.
//!
//! At `>= 100` columns the code and feedback panels sit side by side (50/50).
//! Narrower terminals stack them vertically. `Spacing::Overlap(1)` with
//! `MergeStrategy::Fuzzy` lets adjacent borders share one cell.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Returns `[code, feedback, status_bar]` rects for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    let area = frame.area();
    let [main_area, status_bar] =
        area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let split = if area.width >= 100 {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
    } else {
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
    }
    .spacing(Spacing::Overlap(1));

    let [code, feedback] = main_area.layout(&split);
    [code, feedback, status_bar]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// Focused panels get a thick border in `border_active`; others a plain border
/// in `border_inactive`. `Fuzzy` merging is required when mixing the two types.
pub fn panel_block<'a>(title: Line<'a>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Text and color of the mode indicator for `mode`.
pub fn mode_label(mode: Mode, theme: &Theme) -> (&'static str, ratatui::style::Color) {
    match mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::OpenFiles => (" OPEN ", theme.status_mode_insert),
        Mode::LanguagePicker => (" LANGUAGE ", theme.status_mode_normal),
        Mode::Normal | Mode::HelpOverlay | Mode::ConfirmQuit => (" NORMAL ", theme.status_mode_normal),
    }
}

/// Renders the 1-row status bar: mode, language, and the submit hint.
///
/// The hint reads "analyzing..." while a request is in flight and "enter code
/// to review" when the buffer is blank, mirroring a disabled submit button.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = mode_label(state.mode, theme);
    let mode_span = Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    );

    let language = Span::raw(format!(" {} ", state.input.language().label()));

    let hint = if state.review.is_loading() {
        Span::styled(" analyzing... ", Style::default().fg(theme.spinner))
    } else if state.can_submit() {
        Span::raw(" Ctrl-s review  o open  t language  ? help ")
    } else {
        Span::styled(
            " enter code to review  o open  ? help ",
            Style::default().add_modifier(Modifier::DIM),
        )
    };

    let status_line = Line::from(vec![mode_span, language, Span::raw("|"), hint]);
    frame.render_widget(
        Paragraph::new(status_line)
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
