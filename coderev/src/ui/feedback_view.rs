//! Feedback panel renderer for coderev.
//!
//! Shows exactly one of: the idle placeholder, the loading spinner, the error
//! message, the "no issues" banner, or one card per feedback item. Which one is
//! decided by `ReviewState` alone.

use coderev_core::FeedbackItem;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::app::{AppState, PanelFocus, ReviewState};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Renders the feedback panel from `state.review`.
pub fn render_feedback(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Feedback;
    let title = match &state.review {
        ReviewState::Ready(items) if !items.is_empty() => {
            format!(" Review Feedback ({}) ", items.len())
        }
        _ => " Review Feedback ".to_owned(),
    };
    let block = panel_block(Line::from(title), is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let (text, alignment) = feedback_text(&state.review, state.tick_count, theme);
    let max_scroll = u16::try_from(text.lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
    state.feedback_scroll = state.feedback_scroll.min(max_scroll);

    frame.render_widget(
        Paragraph::new(text)
            .alignment(alignment)
            .wrap(Wrap { trim: false })
            .scroll((state.feedback_scroll, 0)),
        inner,
    );
}

/// Builds the panel body for `review`.
///
/// `tick` selects the spinner frame while loading.
pub fn feedback_text(review: &ReviewState, tick: usize, theme: &Theme) -> (Text<'static>, Alignment) {
    match review {
        ReviewState::Idle => (
            Text::from(vec![
                Line::raw(""),
                Line::styled(
                    "Your code review results will appear here.",
                    Style::default().fg(theme.placeholder),
                ),
            ]),
            Alignment::Center,
        ),
        ReviewState::Loading => (
            Text::from(vec![
                Line::raw(""),
                Line::from(vec![
                    Span::styled(SPINNER[tick % SPINNER.len()], Style::default().fg(theme.spinner)),
                    Span::raw(" Analyzing..."),
                ]),
            ]),
            Alignment::Center,
        ),
        ReviewState::Failed(message) => (
            Text::from(vec![
                Line::styled("Error", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
                Line::styled(message.clone(), Style::default().fg(theme.error)),
            ]),
            Alignment::Left,
        ),
        ReviewState::Ready(items) if items.is_empty() => (
            Text::from(vec![
                Line::raw(""),
                Line::styled("✓", Style::default().fg(theme.success)),
                Line::styled(
                    "Excellent!",
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                ),
                Line::styled("No issues found in your code.", Style::default().fg(theme.success)),
            ]),
            Alignment::Center,
        ),
        ReviewState::Ready(items) => {
            let mut lines = Vec::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    lines.push(Line::raw(""));
                }
                lines.extend(card_lines(item, theme));
            }
            (Text::from(lines), Alignment::Left)
        }
    }
}

/// One feedback card: `<CATEGORY> on Line <n>`, the comment, and the suggestion block.
fn card_lines(item: &FeedbackItem, theme: &Theme) -> Vec<Line<'static>> {
    let color = theme.category(item.category);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("▌ ", Style::default().fg(color)),
            Span::styled(
                format!("{} on Line {}", item.category, item.line),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(format!("  {}", item.comment)),
        Line::styled("  Suggestion:", Style::default().add_modifier(Modifier::BOLD)),
    ];
    lines.extend(item.suggestion.lines().map(|l| {
        Line::styled(format!("    {}", l.replace('\t', "    ")), Style::default().fg(theme.suggestion))
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use coderev_core::FeedbackCategory;

    fn plain(text: &Text<'_>) -> String {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn idle_shows_placeholder() {
        let (text, _) = feedback_text(&ReviewState::Idle, 0, &Theme::dark());
        assert!(plain(&text).contains("Your code review results will appear here."));
    }

    #[test]
    fn loading_shows_spinner_only() {
        let (text, _) = feedback_text(&ReviewState::Loading, 3, &Theme::dark());
        let s = plain(&text);
        assert!(s.contains("Analyzing..."));
        assert!(s.contains(SPINNER[3]));
        assert!(!s.contains("appear here"));
    }

    #[test]
    fn empty_result_is_success_not_error() {
        let (text, _) = feedback_text(&ReviewState::Ready(vec![]), 0, &Theme::dark());
        let s = plain(&text);
        assert!(s.contains("No issues found in your code."));
        assert!(!s.contains("Error"));
    }

    #[test]
    fn failure_shows_message_and_no_cards() {
        let review = ReviewState::Failed("Please enter some code to review.".to_owned());
        let (text, _) = feedback_text(&review, 0, &Theme::dark());
        let s = plain(&text);
        assert!(s.contains("Please enter some code to review."));
        assert!(!s.contains("Suggestion:"));
    }

    #[test]
    fn cards_show_category_line_comment_and_suggestion() {
        let items = vec![
            FeedbackItem {
                line: 12,
                category: FeedbackCategory::Security,
                comment: "gets() is unbounded".to_owned(),
                suggestion: "fgets(buf, sizeof buf, stdin);\nif (!ok) return;".to_owned(),
            },
            FeedbackItem {
                line: 3,
                category: FeedbackCategory::Style,
                comment: "naming".to_owned(),
                suggestion: "rename".to_owned(),
            },
        ];
        let (text, alignment) = feedback_text(&ReviewState::Ready(items), 0, &Theme::dark());
        let s = plain(&text);
        assert_eq!(alignment, Alignment::Left);
        assert!(s.contains("SECURITY on Line 12"));
        assert!(s.contains("gets() is unbounded"));
        assert!(s.contains("    fgets(buf, sizeof buf, stdin);\n    if (!ok) return;"));
        assert!(s.contains("STYLE on Line 3"));
        assert_eq!(s.matches("Suggestion:").count(), 2);
    }
}
