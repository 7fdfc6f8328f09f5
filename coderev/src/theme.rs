//! Color theme system for coderev.
//!
//! A `Theme` holds named `ratatui::style::Color` fields for every surface the
//! TUI draws. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors only, safe on any terminal.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.

use coderev_core::FeedbackCategory;
use ratatui::style::Color;

/// All color values used across coderev's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Code panel
    /// Gutter line numbers.
    pub line_number: Color,
    /// Placeholder text in an empty buffer.
    pub placeholder: Color,

    // Feedback categories
    pub category_bug: Color,
    pub category_performance: Color,
    pub category_style: Color,
    pub category_suggestion: Color,
    pub category_security: Color,

    // Feedback panel
    /// Suggestion block text.
    pub suggestion: Color,
    /// Error messages.
    pub error: Color,
    /// "No issues found" banner.
    pub success: Color,
    /// Loading spinner.
    pub spinner: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator color when in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color when in INSERT mode.
    pub status_mode_insert: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            line_number: Color::DarkGray,
            placeholder: Color::DarkGray,

            category_bug: Color::Red,
            category_performance: Color::Yellow,
            category_style: Color::Blue,
            category_suggestion: Color::Green,
            category_security: Color::Magenta,

            suggestion: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            spinner: Color::Cyan,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let sky = Color::Rgb(137, 220, 235); // #89dceb
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay0 = Color::Rgb(108, 112, 134); // #6c7086
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let peach = Color::Rgb(250, 179, 135); // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            line_number: overlay0,
            placeholder: overlay1,

            category_bug: red,
            category_performance: yellow,
            category_style: blue,
            category_suggestion: green,
            category_security: mauve,

            suggestion: peach,
            error: red,
            success: green,
            spinner: sky,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
        }
    }

    /// Resolves a theme name to a built-in theme.
    ///
    /// Unknown names fall back to `dark()` with a warning in the log.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    /// Badge color for a feedback category.
    pub fn category(&self, category: FeedbackCategory) -> Color {
        match category {
            FeedbackCategory::Bug => self.category_bug,
            FeedbackCategory::Performance => self.category_performance,
            FeedbackCategory::Style => self.category_style,
            FeedbackCategory::Suggestion => self.category_suggestion,
            FeedbackCategory::Security => self.category_security,
        }
    }
}
