//! Terminal setup and teardown.
//!
//! The TUI draws to stderr so stdout stays free for shell pipelines. Bracketed
//! paste is on, so pasting a source file arrives as one `Event::Paste` rather
//! than thousands of key events that would also fire keybindings.

use std::io::{self, stderr, BufWriter, Stderr};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;

/// Terminal drawing through a buffered stderr writer.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stderr>>>;

/// Switches the terminal into TUI mode. Pair with [`restore_tui`] on every exit path.
///
/// # Errors
///
/// Returns `Err` if a terminal command or `Terminal::new` fails.
pub fn init_tui() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut writer = BufWriter::new(stderr());
    execute!(
        writer,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    Terminal::new(CrosstermBackend::new(writer))
}

/// Puts the terminal back the way the shell expects it. Safe to call twice.
///
/// ratatui does not do this on `Drop`; it runs after the event loop and from
/// the panic hook.
///
/// # Errors
///
/// Returns `Err` if a terminal command fails.
pub fn restore_tui() -> io::Result<()> {
    execute!(
        stderr(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()
}

/// Chains a panic hook that restores the terminal before the message prints.
///
/// Call before [`init_tui`].
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_tui();
        previous(info);
    }));
}

/// Returns a flag that flips to `true` when SIGTERM arrives.
///
/// # Errors
///
/// Returns `Err` if the handler cannot be registered.
pub fn register_sigterm() -> io::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&flag))?;
    Ok(flag)
}
