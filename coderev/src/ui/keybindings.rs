//! Keybinding dispatcher for coderev.
//!
//! Translates crossterm key, mouse, and paste events into `AppState` mutations
//! and returns a `KeyAction` telling the event loop what else to do. The
//! dispatcher branches first on `state.mode` so each mode has its own handler.

use std::path::PathBuf;

use coderev_core::Language;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus};

/// Control-flow signal returned from the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing further to do; redraw on the next render tick.
    Continue,
    /// User asked for a review. The loop calls `AppState::begin_review`.
    Submit,
    /// Load these paths into the buffer.
    OpenFiles(Vec<PathBuf>),
    /// Exit cleanly.
    Quit,
}

/// Dispatches a key event to the handler for the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    // Ctrl-c always quits, whatever the mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::LanguagePicker => handle_language_picker(key, state),
        Mode::OpenFiles => handle_open_files(key, state),
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::Normal => handle_normal(key, state),
        Mode::Insert => handle_insert(key, state),
    }
}

/// Handles a bracketed paste: text goes to the prompt or the code buffer.
///
/// Pasting in Normal mode focuses the code panel and inserts at the cursor, so
/// the common "paste my code" flow needs no mode switch.
pub fn handle_paste(text: &str, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::OpenFiles => {
            state.path_input.push_str(&text.replace(['\r', '\n'], " "));
        }
        Mode::Normal | Mode::Insert => {
            state.focus = PanelFocus::Code;
            state.input.insert_str(text);
            state.follow_cursor();
        }
        Mode::HelpOverlay | Mode::LanguagePicker | Mode::ConfirmQuit => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') if ctrl => KeyAction::Submit,
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Submit,

        KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Enter => {
            state.focus = PanelFocus::Code;
            state.mode = Mode::Insert;
            KeyAction::Continue
        }
        KeyCode::Char('o') => {
            state.path_input.clear();
            state.mode = Mode::OpenFiles;
            KeyAction::Continue
        }
        KeyCode::Char('t') => {
            state.open_language_picker();
            KeyAction::Continue
        }
        KeyCode::Char('D') => {
            state.input.clear();
            state.code_scroll = 0;
            KeyAction::Continue
        }

        KeyCode::Char('H') | KeyCode::Char('L') | KeyCode::Tab | KeyCode::BackTab => {
            state.focus = state.focus.toggle();
            KeyAction::Continue
        }

        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }

        // Typed or pasted code exists only in memory; ask before dropping it.
        KeyCode::Char('q') | KeyCode::Esc => {
            if state.input.is_blank() {
                KeyAction::Quit
            } else {
                state.mode = Mode::ConfirmQuit;
                KeyAction::Continue
            }
        }

        _ => KeyAction::Continue,
    }
}

/// Scroll keys in Normal mode: j / k / g / G / arrows and Ctrl-d / Ctrl-u.
///
/// Returns `None` when the key is not a scroll key.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') => state.scroll_top(),
        KeyCode::Char('G') => state.scroll_bottom(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::PageDown => state.half_page_down(),
        KeyCode::PageUp => state.half_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// Insert mode
// ---------------------------------------------------------------------------

/// Editing keys go to the code buffer. `Esc` returns to Normal; `Ctrl-s` submits.
fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let input = &mut state.input;

    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            return KeyAction::Continue;
        }
        KeyCode::Char('s') if ctrl => return KeyAction::Submit,
        KeyCode::Char(c) if !ctrl => input.insert_char(c),
        KeyCode::Tab => input.insert_char('\t'),
        KeyCode::Enter => input.insert_newline(),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Up => input.move_up(),
        KeyCode::Down => input.move_down(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
    state.follow_cursor();
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Modals
// ---------------------------------------------------------------------------

/// `?`, `Esc`, or `q` dismisses the overlay; j/k/g/G scroll it.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

fn handle_language_picker(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let last = Language::ALL.len() - 1;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.language_cursor = (state.language_cursor + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.language_cursor = state.language_cursor.saturating_sub(1);
        }
        KeyCode::Enter => state.select_language(),
        KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

/// `y` quits; `n` or `Esc` goes back to Normal. Other keys are ignored.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

fn handle_open_files(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            state.mode = Mode::Normal;
            let paths = state.take_path_input();
            if paths.is_empty() {
                KeyAction::Continue
            } else {
                KeyAction::OpenFiles(paths)
            }
        }
        KeyCode::Esc => {
            state.path_input.clear();
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        KeyCode::Backspace => {
            state.path_input.pop();
            KeyAction::Continue
        }
        KeyCode::Char(c) => {
            state.path_input.push(c);
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Left click focuses the panel under the pointer; the wheel scrolls by 3 lines.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let pos = Position { x: mouse.column, y: mouse.row };
            let [code, feedback] = state.panel_rects;
            if code.contains(pos) {
                state.focus = PanelFocus::Code;
            } else if feedback.contains(pos) {
                state.focus = PanelFocus::Feedback;
            }
        }
        MouseEventKind::ScrollUp => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_sub(3);
            } else {
                state.scroll_up(3);
            }
        }
        MouseEventKind::ScrollDown => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_add(3);
            } else {
                state.scroll_down(3);
            }
        }
        _ => {}
    }
    KeyAction::Continue
}
