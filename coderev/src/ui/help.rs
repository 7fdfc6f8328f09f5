//! Help overlay: every keybinding, grouped by what it is for.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// `(section, [(keys, description)])`, rendered in this order.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Review",
        &[
            ("Ctrl-s / r", "Submit the code for review (disabled while analyzing)"),
            ("o", "Open one or more files (replaces the buffer)"),
            ("t", "Choose the source language"),
        ],
    ),
    (
        "Editing",
        &[
            ("i", "Start typing in the code panel"),
            ("Esc", "Back to normal mode"),
            ("Arrows", "Move the cursor"),
            ("Home / End", "Start / end of line"),
            ("Paste", "Pasted text is inserted at the cursor"),
            ("D", "Clear the code buffer"),
        ],
    ),
    (
        "Panels",
        &[
            ("j / k", "Scroll down / up one line"),
            ("g / G", "Jump to top / bottom"),
            ("Ctrl-d / u", "Scroll half a page down / up"),
            ("H / L / Tab", "Switch panel focus"),
        ],
    ),
    (
        "General",
        &[("?", "Show or hide this help"), ("q / Esc", "Quit (asks first if there is code)"), ("Ctrl-c", "Quit immediately")],
    ),
];

const KEY_COLUMN: usize = 14;

/// Draws the overlay centred on the frame, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 60 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    let area = frame.area();
    if area.width < 60 {
        return;
    }

    let popup = area.centered(Constraint::Percentage(80), Constraint::Percentage(80));
    frame.render_widget(Clear, popup);

    let body = Paragraph::new(help_text(theme))
        .block(
            Block::bordered()
                .title(" Help  j/k scroll, ? or Esc to dismiss ")
                .border_style(Style::default().fg(theme.border_active)),
        )
        .wrap(Wrap { trim: false })
        .scroll((help_scroll, 0));
    frame.render_widget(body, popup);
}

fn help_text(theme: &Theme) -> Text<'static> {
    let heading = Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for (i, (section, bindings)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::styled(*section, heading));
        for (keys, description) in bindings.iter() {
            lines.push(Line::from(vec![
                Span::raw(format!("  {keys:<KEY_COLUMN$}")),
                Span::raw(*description),
            ]));
        }
    }
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_is_listed() {
        let text = help_text(&Theme::dark());
        let rendered: Vec<String> = text.lines.iter().map(|l| l.to_string()).collect();
        for (section, _) in SECTIONS {
            assert!(rendered.iter().any(|l| l == *section));
        }
        assert!(rendered.iter().any(|l| l.starts_with("  Ctrl-s / r") && l.contains("Submit")));
    }
}
