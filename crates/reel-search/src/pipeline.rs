//! Search query pipeline: debounced queries in, bounded results out
//!
//! Every debounced query cancels whatever lookup is still in flight before
//! a new one is issued, so at most one request is ever current. Task
//! messages carry the token they were issued under; a cancelled token marks
//! the message stale and it is dropped, never applied.

use std::sync::Arc;
use std::time::Duration;

use reel_catalog::CatalogLookup;
use reel_core::CatalogItem;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const LOOKUP_FAILED_MESSAGE: &str = "Failed to search movies.";

/// Lifecycle of the current query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Success,
    Failed,
}

/// Messages sent back to the event loop by lookup and timer tasks
#[derive(Debug)]
pub enum SearchEvent {
    Completed {
        token: CancellationToken,
        results: Vec<CatalogItem>,
    },
    Failed {
        token: CancellationToken,
        message: String,
    },
    EmptyGraceElapsed {
        token: CancellationToken,
    },
}

pub struct SearchPipeline {
    lookup: Arc<dyn CatalogLookup>,
    events: mpsc::UnboundedSender<SearchEvent>,
    /// Token for all in-flight work of the current query; cancelled when
    /// the query is superseded, cleared, or a result gets selected.
    current: CancellationToken,
    phase: SearchPhase,
    results: Vec<CatalogItem>,
    error: Option<String>,
    show_empty_notice: bool,
    result_limit: usize,
    empty_grace: Duration,
}

impl SearchPipeline {
    pub fn new(
        lookup: Arc<dyn CatalogLookup>,
        result_limit: usize,
        empty_grace: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                lookup,
                events,
                current: CancellationToken::new(),
                phase: SearchPhase::Idle,
                results: Vec::new(),
                error: None,
                show_empty_notice: false,
                result_limit,
                empty_grace,
            },
            rx,
        )
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_searching(&self) -> bool {
        self.phase == SearchPhase::Searching
    }

    pub fn results(&self) -> &[CatalogItem] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show_empty_notice(&self) -> bool {
        self.show_empty_notice
    }

    /// Raw (pre-debounce) input changed; retract the empty-state notice
    /// right away so it never lingers while the user is typing.
    pub fn input_changed(&mut self) {
        self.show_empty_notice = false;
    }

    /// Feed the debounced query. Supersedes the in-flight lookup and any
    /// pending grace timer. A blank query goes straight to idle without
    /// issuing a request.
    pub fn query_changed(&mut self, query: &str) {
        self.current.cancel();
        self.current = CancellationToken::new();
        self.show_empty_notice = false;
        self.error = None;

        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.phase = SearchPhase::Idle;
            self.results.clear();
            return;
        }

        self.phase = SearchPhase::Searching;
        let lookup = Arc::clone(&self.lookup);
        let events = self.events.clone();
        let token = self.current.clone();
        let query = trimmed.to_string();
        tokio::spawn(async move {
            match lookup.search(&query, token.clone()).await {
                Ok(results) => {
                    let _ = events.send(SearchEvent::Completed { token, results });
                }
                Err(err) if err.is_cancelled() => {
                    // Superseded by a newer query; stay silent.
                }
                Err(err) => {
                    tracing::warn!(%query, error = %err, "catalog lookup failed");
                    let _ = events.send(SearchEvent::Failed {
                        token,
                        message: LOOKUP_FAILED_MESSAGE.to_string(),
                    });
                }
            }
        });
    }

    /// Apply a task message. Messages issued under a superseded token are
    /// dropped, so a stale response can never overwrite newer results.
    pub fn handle_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Completed { token, mut results } => {
                if token.is_cancelled() {
                    return;
                }
                results.truncate(self.result_limit);
                let empty = results.is_empty();
                self.results = results;
                self.phase = SearchPhase::Success;
                self.error = None;
                if empty {
                    self.schedule_empty_notice(token);
                }
            }
            SearchEvent::Failed { token, message } => {
                if token.is_cancelled() {
                    return;
                }
                self.results.clear();
                self.phase = SearchPhase::Failed;
                self.error = Some(message);
            }
            SearchEvent::EmptyGraceElapsed { token } => {
                if token.is_cancelled() {
                    return;
                }
                self.show_empty_notice = true;
            }
        }
    }

    /// Empty result sets only say so after a grace period, so a fast lookup
    /// that legitimately finds nothing does not flash the message while the
    /// user is still typing.
    fn schedule_empty_notice(&self, token: CancellationToken) {
        let events = self.events.clone();
        let grace = self.empty_grace;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(grace) => {
                    let _ = events.send(SearchEvent::EmptyGraceElapsed {
                        token: token.clone(),
                    });
                }
            }
        });
    }

    /// Take the result at `index` and return the pipeline to idle. The
    /// caller hands the item to the schedule and clears its input buffer.
    pub fn select(&mut self, index: usize) -> Option<CatalogItem> {
        let item = self.results.get(index)?.clone();
        self.reset();
        Some(item)
    }

    /// Cancel all in-flight work and return to idle
    pub fn reset(&mut self) {
        self.current.cancel();
        self.current = CancellationToken::new();
        self.phase = SearchPhase::Idle;
        self.results.clear();
        self.error = None;
        self.show_empty_notice = false;
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        // Teardown: suppress any late lookup results and grace timers
        self.current.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reel_catalog::LookupError;
    use tokio::sync::mpsc::error::TryRecvError;

    /// Lookup stub that answers after a fixed delay with one item named
    /// after the query, a canned list, or a failure.
    struct StubLookup {
        delay: Duration,
        outcome: StubOutcome,
    }

    enum StubOutcome {
        EchoQuery,
        Items(Vec<CatalogItem>),
        Fail,
    }

    fn item(id: u64, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            overview: String::new(),
            poster_path: None,
            release_date: String::new(),
            vote_average: 0.0,
        }
    }

    #[async_trait]
    impl CatalogLookup for StubLookup {
        async fn search(
            &self,
            query: &str,
            cancel: CancellationToken,
        ) -> Result<Vec<CatalogItem>, LookupError> {
            tokio::select! {
                _ = cancel.cancelled() => return Err(LookupError::Cancelled),
                _ = tokio::time::sleep(self.delay) => {}
            }
            match &self.outcome {
                StubOutcome::EchoQuery => Ok(vec![item(query.len() as u64, query)]),
                StubOutcome::Items(items) => Ok(items.clone()),
                StubOutcome::Fail => Err(LookupError::Status(500)),
            }
        }
    }

    fn pipeline_with(
        outcome: StubOutcome,
        delay_ms: u64,
    ) -> (SearchPipeline, mpsc::UnboundedReceiver<SearchEvent>) {
        SearchPipeline::new(
            Arc::new(StubLookup {
                delay: Duration::from_millis(delay_ms),
                outcome,
            }),
            10,
            Duration::from_millis(2000),
        )
    }

    fn drain(pipeline: &mut SearchPipeline, rx: &mut mpsc::UnboundedReceiver<SearchEvent>) {
        while let Ok(event) = rx.try_recv() {
            pipeline.handle_event(event);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_lookup_populates_results() {
        let (mut pipeline, mut rx) = pipeline_with(StubOutcome::EchoQuery, 50);
        pipeline.query_changed("batman");
        assert!(pipeline.is_searching());

        tokio::time::sleep(Duration::from_millis(60)).await;
        drain(&mut pipeline, &mut rx);

        assert_eq!(pipeline.phase(), SearchPhase::Success);
        assert_eq!(pipeline.results().len(), 1);
        assert_eq!(pipeline.results()[0].title, "batman");
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_are_truncated_to_limit() {
        let many: Vec<CatalogItem> = (0..25).map(|i| item(i, "m")).collect();
        let (mut pipeline, mut rx) = pipeline_with(StubOutcome::Items(many), 10);
        pipeline.query_changed("m");
        tokio::time::sleep(Duration::from_millis(20)).await;
        drain(&mut pipeline, &mut rx);
        assert_eq!(pipeline.results().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_goes_idle_without_request() {
        let (mut pipeline, mut rx) = pipeline_with(StubOutcome::EchoQuery, 10);
        pipeline.query_changed("   ");
        assert_eq!(pipeline.phase(), SearchPhase::Idle);
        assert!(pipeline.results().is_empty());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_never_displayed() {
        let (mut pipeline, mut rx) = pipeline_with(StubOutcome::EchoQuery, 50);

        // First query resolves and its event is already queued...
        pipeline.query_changed("a");
        tokio::time::sleep(Duration::from_millis(60)).await;

        // ...when a newer query supersedes it before the event is applied
        pipeline.query_changed("ab");
        drain(&mut pipeline, &mut rx);
        assert!(pipeline.is_searching());
        assert!(pipeline.results().is_empty());

        tokio::time::sleep(Duration::from_millis(60)).await;
        drain(&mut pipeline, &mut rx);
        assert_eq!(pipeline.results().len(), 1);
        assert_eq!(pipeline.results()[0].title, "ab");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_lookup_is_cancelled_silently() {
        let (mut pipeline, mut rx) = pipeline_with(StubOutcome::EchoQuery, 200);
        pipeline.query_changed("a");
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Cleared before the lookup resolves; the task must not emit
        pipeline.query_changed("");
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(pipeline.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_surfaces_error_message() {
        let (mut pipeline, mut rx) = pipeline_with(StubOutcome::Fail, 10);
        pipeline.query_changed("x");
        tokio::time::sleep(Duration::from_millis(20)).await;
        drain(&mut pipeline, &mut rx);

        assert_eq!(pipeline.phase(), SearchPhase::Failed);
        assert_eq!(pipeline.error(), Some("Failed to search movies."));
        assert!(pipeline.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_notice_waits_for_grace_period() {
        let (mut pipeline, mut rx) = pipeline_with(StubOutcome::Items(Vec::new()), 10);
        pipeline.query_changed("zzz");
        tokio::time::sleep(Duration::from_millis(20)).await;
        drain(&mut pipeline, &mut rx);

        assert_eq!(pipeline.phase(), SearchPhase::Success);
        assert!(!pipeline.show_empty_notice());

        // Still quiet one millisecond before the grace period ends
        tokio::time::sleep(Duration::from_millis(1999)).await;
        drain(&mut pipeline, &mut rx);
        assert!(!pipeline.show_empty_notice());

        tokio::time::sleep(Duration::from_millis(2)).await;
        drain(&mut pipeline, &mut rx);
        assert!(pipeline.show_empty_notice());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_query_suppresses_pending_empty_notice() {
        let (mut pipeline, mut rx) = pipeline_with(StubOutcome::Items(Vec::new()), 10);
        pipeline.query_changed("zzz");
        tokio::time::sleep(Duration::from_millis(20)).await;
        drain(&mut pipeline, &mut rx);

        // Superseded inside the grace window
        tokio::time::sleep(Duration::from_millis(1000)).await;
        pipeline.query_changed("zzzz");

        tokio::time::sleep(Duration::from_millis(5000)).await;
        drain(&mut pipeline, &mut rx);
        assert!(!pipeline.show_empty_notice());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_returns_item_and_goes_idle() {
        let (mut pipeline, mut rx) = pipeline_with(StubOutcome::EchoQuery, 10);
        pipeline.query_changed("dune");
        tokio::time::sleep(Duration::from_millis(20)).await;
        drain(&mut pipeline, &mut rx);

        let selected = pipeline.select(0).unwrap();
        assert_eq!(selected.title, "dune");
        assert_eq!(pipeline.phase(), SearchPhase::Idle);
        assert!(pipeline.results().is_empty());

        // Out-of-range selection is a no-op
        assert!(pipeline.select(3).is_none());
    }
}
