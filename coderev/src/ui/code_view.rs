//! Code panel renderer for coderev.
//!
//! Draws the input buffer with a line-number gutter and syntax highlighting.
//! Only the rows inside the viewport are materialised per frame. Tabs are shown
//! as four spaces; the terminal cursor is placed in Insert mode only.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const TAB: &str = "    ";

/// Display width of the first `col` chars of `line`, with tabs expanded.
fn display_col(line: &str, col: usize) -> usize {
    line.chars()
        .take(col)
        .map(|c| if c == '\t' { TAB.len() } else { 1 })
        .sum()
}

/// Renders the code panel.
pub fn render_code(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Code;
    let title = Line::from(vec![
        Span::raw(" Your Code "),
        Span::styled(
            format!("[{}] ", state.input.language().label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let block = panel_block(title, is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if state.input.lines().len() == 1 && state.input.lines()[0].is_empty() {
        let placeholder = format!(
            "Paste your {} code here (i to type) or press o to open one or more files...",
            state.input.language().tag()
        );
        frame.render_widget(
            Paragraph::new(placeholder).style(Style::default().fg(theme.placeholder)),
            inner,
        );
        if state.mode == Mode::Insert {
            frame.set_cursor_position(Position { x: inner.x, y: inner.y });
        }
        return;
    }

    state.follow_cursor();
    let total = state.input.lines().len();
    let gutter_width = total.to_string().len() + 1;
    let start = state.code_scroll.min(total.saturating_sub(1));
    let end = (start + inner.height as usize).min(total);

    let language = state.input.language();
    let highlighted = state.highlighter.highlight(state.input.lines(), language);

    let rows: Vec<Line<'static>> = highlighted[start..end]
        .iter()
        .enumerate()
        .map(|(offset, line)| {
            let number = format!("{:>width$} ", start + offset + 1, width = gutter_width - 1);
            let mut spans = vec![Span::styled(number, Style::default().fg(theme.line_number))];
            spans.extend(line.spans.iter().map(|s| {
                Span::styled(s.content.replace('\t', TAB), s.style)
            }));
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(rows), inner);

    if state.mode == Mode::Insert && is_focused {
        let (row, col) = state.input.cursor();
        let x = gutter_width + display_col(&state.input.lines()[row], col);
        let max_x = inner.width.saturating_sub(1) as usize;
        frame.set_cursor_position(Position {
            x: inner.x + x.min(max_x) as u16,
            y: inner.y + (row - start) as u16,
        });
    }
}
