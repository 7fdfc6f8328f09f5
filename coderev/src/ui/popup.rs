//! Modal popups: the language picker, the open-files prompt, and the quit
//! confirmation.
//!
//! All are drawn last inside the same `terminal.draw()` closure, after
//! erasing their area with `Clear`, the same way the help overlay is drawn.

use coderev_core::input::ALLOWED_EXTENSIONS;
use coderev_core::Language;
use ratatui::{
    Frame,
    layout::{Constraint, Position},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::AppState;
use crate::theme::Theme;

/// Renders the language picker centred over the panels.
pub fn render_language_picker(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let height = Language::ALL.len() as u16 + 2;
    let area = frame
        .area()
        .centered(Constraint::Length(30), Constraint::Length(height));
    frame.render_widget(Clear, area);

    let current = state.input.language();
    let items: Vec<ListItem> = Language::ALL
        .iter()
        .map(|lang| {
            let marker = if *lang == current { "● " } else { "  " };
            ListItem::new(Line::raw(format!("{marker}{}", lang.label())))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::bordered()
                .title(" Language  Enter select ")
                .border_style(Style::default().fg(theme.border_active)),
        )
        .highlight_style(
            Style::default()
                .fg(theme.border_active)
                .add_modifier(Modifier::REVERSED),
        );
    let mut list_state = ListState::default().with_selected(Some(state.language_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Renders the open-files prompt with the typed paths and a cursor.
pub fn render_open_files(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Length(4));
    frame.render_widget(Clear, area);

    let allowed = ALLOWED_EXTENSIONS
        .iter()
        .map(|e| format!(".{e}"))
        .collect::<Vec<_>>()
        .join(" ");
    let block = Block::bordered()
        .title(" Open files  space-separated paths, Enter load, Esc cancel ")
        .border_style(Style::default().fg(theme.border_active));
    let inner = block.inner(area);

    let lines = vec![
        Line::from(vec![Span::raw("> "), Span::raw(state.path_input.clone())]),
        Line::styled(
            format!("accepted: {allowed}"),
            Style::default().fg(theme.placeholder),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);

    let x = inner.x + 2 + state.path_input.chars().count() as u16;
    frame.set_cursor_position(Position {
        x: x.min(inner.right().saturating_sub(1)),
        y: inner.y,
    });
}

/// Renders the quit confirmation over the panels.
pub fn render_confirm_quit(frame: &mut Frame, theme: &Theme) {
    let area = frame
        .area()
        .centered(Constraint::Length(44), Constraint::Length(4));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Quit? ")
        .border_style(Style::default().fg(theme.error));
    let lines = vec![
        Line::raw("The code buffer will be discarded."),
        Line::from(vec![
            Span::styled("y", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit   "),
            Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" / Esc stay"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
