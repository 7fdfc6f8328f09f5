//! Syntax highlighting for the code panel.
//!
//! Highlighting runs on the render path, so results are cached and only
//! recomputed when the buffer text or the language changes. syntect state is
//! carried line to line, which means the whole buffer is highlighted at once.

use std::sync::LazyLock;

use coderev_core::Language;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Caches the highlighted form of the code buffer.
#[derive(Default)]
pub struct CodeHighlighter {
    source: Vec<String>,
    language: Option<Language>,
    lines: Vec<Line<'static>>,
}

impl CodeHighlighter {
    /// Returns highlighted lines for `source`, recomputing only on change.
    pub fn highlight(&mut self, source: &[String], language: Language) -> &[Line<'static>] {
        if self.language != Some(language) || self.source.as_slice() != source {
            self.lines = highlight_lines(source, language);
            self.source = source.to_vec();
            self.language = Some(language);
        }
        &self.lines
    }
}

/// Highlights every line of `source` with the grammar for `language`.
///
/// Falls back to unstyled lines when no theme is available.
pub fn highlight_lines(source: &[String], language: Language) -> Vec<Line<'static>> {
    let syntax = PS
        .find_syntax_by_extension(language.syntax_extension())
        .unwrap_or_else(|| PS.find_syntax_plain_text());
    let Some(theme) = TS.themes.get("base16-ocean.dark").or_else(|| TS.themes.values().next()) else {
        return source.iter().map(|l| Line::raw(l.clone())).collect();
    };

    let mut h = HighlightLines::new(syntax, theme);
    source
        .iter()
        .map(|raw| {
            let code = raw.trim_end_matches('\r');
            // load_defaults_newlines grammars expect the trailing newline.
            let with_nl = format!("{code}\n");
            let ranges = h.highlight_line(&with_nl, &PS).unwrap_or_default();
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .map(|(style, text)| syntect_to_span(style, text.trim_end_matches('\n')))
                .filter(|s| !s.content.is_empty())
                .collect();
            if spans.is_empty() {
                Line::raw(code.to_owned())
            } else {
                Line::from(spans)
            }
        })
        .collect()
}

/// Converts a syntect style run into a ratatui span with owned content.
///
/// The background is dropped so the panel's own background shows through.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    let fg = style.foreground;
    let mut ratatui_style = Style::default();
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    let fs = style.font_style;
    if fs.contains(syntect::highlighting::FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if fs.contains(syntect::highlighting::FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if fs.contains(syntect::highlighting::FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}
