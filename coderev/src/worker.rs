//! Background tasks that report back over the event channel.
//!
//! The review call and the file batch read both run off the main loop. Each
//! finishes by sending exactly one `AppEvent`; neither can be cancelled.

use std::path::PathBuf;
use std::sync::Arc;

use coderev_core::input::{filter_allowed, read_sources};
use coderev_core::ReviewService;
use tokio::sync::mpsc::UnboundedSender;
use tracing::Instrument;

use crate::app::{ReviewOutcome, ReviewRequest};
use crate::event::AppEvent;

/// Runs one review against `service` and converts the result for the UI.
pub async fn run_review(service: &dyn ReviewService, request: ReviewRequest) -> ReviewOutcome {
    tracing::info!(language = %request.language, bytes = request.code.len(), "review submitted");
    let result = service
        .review(&request.code, request.language)
        .await
        .map_err(|e| e.to_string());
    match &result {
        Ok(items) => tracing::info!(findings = items.len(), "review finished"),
        Err(message) => tracing::warn!(%message, "review failed"),
    }
    ReviewOutcome { id: request.id, result }
}

/// Spawns [`run_review`] and sends `AppEvent::ReviewFinished` when done.
pub fn spawn_review(
    service: Arc<dyn ReviewService>,
    request: ReviewRequest,
    event_tx: UnboundedSender<AppEvent>,
) {
    let span = tracing::info_span!("review", id = %request.id);
    tokio::spawn(
        async move {
            let outcome = run_review(service.as_ref(), request).await;
            let _ = event_tx.send(AppEvent::ReviewFinished(outcome));
        }
        .instrument(span),
    );
}

/// Reads a batch of files and sends `AppEvent::FilesLoaded`.
///
/// Paths outside the extension allow-list are dropped first. If nothing is
/// left no event is sent.
pub fn spawn_file_load(paths: Vec<PathBuf>, event_tx: UnboundedSender<AppEvent>) {
    let paths = filter_allowed(paths);
    if paths.is_empty() {
        return;
    }
    tokio::spawn(async move {
        let result = read_sources(&paths).await;
        let _ = event_tx.send(AppEvent::FilesLoaded(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use coderev_core::{Error, FeedbackItem, Language};
    use tokio::sync::mpsc;

    use crate::app::{AppState, ReviewState};

    /// Records every call and answers with a canned result.
    struct StubService {
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, Language)>>,
        fail: bool,
    }

    impl StubService {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl ReviewService for StubService {
        async fn review(&self, code: &str, language: Language) -> coderev_core::Result<Vec<FeedbackItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((code.to_owned(), language));
            if self.fail {
                Err(Error::ReviewFailed)
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[tokio::test]
    async fn one_submit_makes_one_call_with_verbatim_code() {
        let service = Arc::new(StubService::new(false));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut state = AppState::new(Language::C);
        state.input.set_code("char buf[8];\ngets(buf);");

        let request = state.begin_review().unwrap();
        assert!(state.begin_review().is_none());
        spawn_review(service.clone(), request, tx);

        let Some(AppEvent::ReviewFinished(outcome)) = rx.recv().await else {
            panic!("expected ReviewFinished");
        };
        state.finish_review(outcome);

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            service.seen.lock().unwrap()[0],
            ("char buf[8];\ngets(buf);".to_owned(), Language::C)
        );
        assert_eq!(state.review, ReviewState::Ready(Vec::new()));
    }

    #[tokio::test]
    async fn blank_submit_never_calls_service() {
        let service = StubService::new(false);
        let mut state = AppState::new(Language::Cpp);
        state.input.set_code(" \n ");
        if let Some(request) = state.begin_review() {
            run_review(&service, request).await;
        }
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_surfaces_generic_message() {
        let service = StubService::new(true);
        let mut state = AppState::new(Language::Cpp);
        state.input.set_code("x");
        let request = state.begin_review().unwrap();
        let outcome = run_review(&service, request).await;
        state.finish_review(outcome);
        assert_eq!(
            state.review,
            ReviewState::Failed(coderev_core::REVIEW_FAILED_MESSAGE.to_owned())
        );
    }

    #[tokio::test]
    async fn file_load_skips_disallowed_and_reports_once() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let a = dir.join("a.cpp");
        std::fs::write(&a, "X").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_file_load(vec![a, dir.join("notes.md")], tx);
        let Some(AppEvent::FilesLoaded(Ok(files))) = rx.recv().await else {
            panic!("expected FilesLoaded");
        };
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.cpp");
    }

    #[tokio::test]
    async fn file_load_with_only_disallowed_paths_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_file_load(vec![PathBuf::from("x.rs")], tx);
        assert!(rx.recv().await.is_none());
    }
}
