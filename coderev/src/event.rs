//! Event bus for coderev.
//!
//! Terminal input, timer ticks, and background-task results are all normalised
//! into one `AppEvent` enum and sent over a tokio unbounded MPSC channel. The
//! main loop is the only receiver and the only place `AppState` is mutated.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms, about 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (120 ms) advances the loading spinner.

use std::time::Duration;

use coderev_core::SourceFile;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::interval;

use crate::app::ReviewOutcome;

const TICK_RATE: Duration = Duration::from_millis(120);
const FRAME_RATE: Duration = Duration::from_millis(33);

/// Everything the main loop reacts to, whatever produced it.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// Key press (releases and repeats are filtered out).
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste: the whole pasted text in one event.
    Paste(String),
    /// New terminal size in (columns, rows).
    Resize(u16, u16),
    /// Spinner step.
    Tick,
    /// Time to draw a frame.
    Render,
    /// A file batch finished reading (all files, or the first error).
    FilesLoaded(std::io::Result<Vec<SourceFile>>),
    /// A review task finished.
    ReviewFinished(ReviewOutcome),
    /// The terminal input stream ended or failed.
    Quit,
}

/// Sender and receiver ends of the event channel.
///
/// `tx` is cloned into every producer; `rx` belongs to the main loop.
pub struct EventHandler {
    pub tx: UnboundedSender<AppEvent>,
    pub rx: UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a crossterm event to the `AppEvent` the loop cares about, if any.
///
/// Only `KeyEventKind::Press` survives; some platforms also report releases.
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Spawns the task that feeds terminal input and both timers into `tx`.
///
/// `reader.next().fuse()` keeps `select!` from polling a finished stream. The
/// task ends after sending `Quit` when the input stream closes or errors, or as
/// soon as the receiver is dropped.
pub fn spawn_event_task(tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut ticks = interval(TICK_RATE);
        let mut frames = interval(FRAME_RATE);
        let mut reader = EventStream::new();

        while !tx.is_closed() {
            let next = tokio::select! {
                _ = ticks.tick() => Some(AppEvent::Tick),
                _ = frames.tick() => Some(AppEvent::Render),
                input = reader.next().fuse() => match input {
                    Some(Ok(event)) => translate(event),
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "terminal event stream error");
                        let _ = tx.send(AppEvent::Quit);
                        break;
                    }
                    None => {
                        let _ = tx.send(AppEvent::Quit);
                        break;
                    }
                },
            };
            if let Some(event) = next {
                let _ = tx.send(event);
            }
        }
    });
}
