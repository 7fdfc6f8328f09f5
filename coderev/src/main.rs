//! coderev: AI-assisted C/C++ code review in the terminal.
//!
//! Entry point for the `coderev` binary. Wires together configuration and CLI
//! flags, the operator log (`logging`), the Gemini client (`coderev-core`), the
//! terminal lifecycle (`tui`), the unified event bus (`event`), background work
//! (`worker`), and rendering (`ui`).
//!
//! # Startup sequence
//!
//! 1. Parse flags and load `config.toml`; flags win over the file.
//! 2. Open the log file and build the client. A missing `API_KEY` aborts here,
//!    before the terminal is touched, so the message stays readable.
//! 3. `install_panic_hook()`, then `register_sigterm()`, then `init_tui()`.
//! 4. Create the event channel and `spawn_event_task()`.
//! 5. Start loading any files named on the command line.
//!
//! `restore_tui()` runs after the event loop exits. Inside the loop `?` is only
//! used in the Render arm, and that error is carried out with `break` so the
//! terminal is restored before it is returned.

mod app;
mod event;
mod highlight;
mod logging;
mod theme;
mod tui;
mod ui;
mod worker;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use clap::Parser;
use coderev_core::config::{config_path, state_dir};
use coderev_core::{Config, GeminiClient, Language, ReviewService};

use crate::app::AppState;
use crate::event::AppEvent;
use crate::ui::keybindings::{self, KeyAction};

/// Review C and C++ code with Gemini from the terminal.
#[derive(Parser, Debug)]
#[command(name = "coderev")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source language (c or cpp); overrides the config file
    #[arg(short, long)]
    language: Option<Language>,

    /// Gemini model name; overrides the config file
    #[arg(long, env = "CODEREV_MODEL")]
    model: Option<String>,

    /// Colour theme (dark or catppuccin-mocha)
    #[arg(long)]
    theme: Option<String>,

    /// Alternate config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Files to load into the code buffer on startup (.c .cpp .h .hpp .txt)
    files: Vec<PathBuf>,
}

impl Cli {
    /// Loads the config file and applies flag overrides.
    ///
    /// Config errors are soft: they are printed to stderr and defaults are used.
    fn resolve_config(&self) -> Config {
        let path = self.config.clone().unwrap_or_else(config_path);
        let mut config = match Config::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("coderev: {e}; using defaults");
                Config::default()
            }
        };
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.resolve_config();

    let log = match logging::init_logging(&state_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("coderev: cannot open log file: {e}");
            None
        }
    };

    let client = match GeminiClient::from_env(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "startup aborted");
            eprintln!("coderev: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(model = client.model(), language = %config.language, "coderev starting");

    let result = run(config, Arc::new(client), cli.files).await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "coderev exited with an error");
        eprintln!("coderev: {e}");
    }
    if let Some(guard) = &log {
        tracing::info!(log = %guard.path.display(), "coderev stopped");
    }
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Runs the TUI until the user quits or SIGTERM arrives.
async fn run(
    config: Config,
    service: Arc<dyn ReviewService>,
    files: Vec<PathBuf>,
) -> std::io::Result<()> {
    let theme = theme::Theme::from_name(&config.theme);
    let mut state = AppState::new(config.language);

    // Panic hook first so it is the innermost hook and restores the terminal.
    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let tx = handler.tx;
    let mut rx = handler.rx;

    if !files.is_empty() {
        worker::spawn_file_load(files, tx.clone());
    }

    let mut outcome = Ok(());

    // Exits only via `break`, so `restore_tui()` below is always reached.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50ms even when
            // nothing else arrives on the channel.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    tracing::info!("SIGTERM received");
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                let action = match maybe_event {
                    Some(AppEvent::Render) => {
                        // Exactly one draw() per Render event.
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            outcome = Err(e);
                            break 'event_loop;
                        }
                        KeyAction::Continue
                    }
                    Some(AppEvent::Tick) => {
                        state.tick_count = state.tick_count.wrapping_add(1);
                        KeyAction::Continue
                    }
                    Some(AppEvent::Key(key)) => keybindings::handle_key(key, &mut state),
                    Some(AppEvent::Paste(text)) => keybindings::handle_paste(&text, &mut state),
                    Some(AppEvent::Mouse(mouse)) => keybindings::handle_mouse(mouse, &mut state),
                    // The next Render picks up the new frame size.
                    Some(AppEvent::Resize(_, _)) => KeyAction::Continue,
                    Some(AppEvent::FilesLoaded(result)) => {
                        state.apply_loaded_files(result);
                        KeyAction::Continue
                    }
                    Some(AppEvent::ReviewFinished(result)) => {
                        state.finish_review(result);
                        KeyAction::Continue
                    }
                    Some(AppEvent::Quit) | None => KeyAction::Quit,
                };

                match action {
                    KeyAction::Continue => {}
                    KeyAction::Quit => break 'event_loop,
                    KeyAction::Submit => {
                        if let Some(request) = state.begin_review() {
                            worker::spawn_review(Arc::clone(&service), request, tx.clone());
                        }
                    }
                    KeyAction::OpenFiles(paths) => worker::spawn_file_load(paths, tx.clone()),
                }

                // Also check after every event so quit latency is one event cycle.
                if term_flag.load(Ordering::Relaxed) {
                    tracing::info!("SIGTERM received");
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    outcome
}
