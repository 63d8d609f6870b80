use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use reel_catalog::CatalogLookup;
use reel_config::SearchConfig;
use reel_core::{
    AddOutcome, DragController, Notice, NotificationSink, Schedule, Session,
};
use reel_search::{Debouncer, SearchEvent, SearchPipeline};
use tokio::sync::mpsc;

/// How long a toast stays on screen
const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Schedule,
}

pub struct App {
    pub session: Session,
    pub schedule: Schedule,
    pub drag: DragController,
    pub search: SearchPipeline,
    pub query: String,
    pub focus: Focus,
    pub result_index: usize,
    pub schedule_index: usize,
    pub notice: Option<(Notice, Instant)>,
    pub should_quit: bool,
    /// List areas recorded at draw time for mouse hit-testing
    pub results_area: Option<Rect>,
    pub schedule_area: Option<Rect>,
    debouncer: Debouncer<String>,
    debounced_rx: mpsc::UnboundedReceiver<String>,
    search_rx: mpsc::UnboundedReceiver<SearchEvent>,
}

impl App {
    pub fn new(session: Session, lookup: Arc<dyn CatalogLookup>, config: &SearchConfig) -> Self {
        let (debouncer, debounced_rx) = Debouncer::new(Duration::from_millis(config.debounce_ms));
        let (search, search_rx) = SearchPipeline::new(
            lookup,
            config.result_limit,
            Duration::from_millis(config.grace_ms),
        );
        Self {
            session,
            schedule: Schedule::new(),
            drag: DragController::new(),
            search,
            query: String::new(),
            focus: Focus::Search,
            result_index: 0,
            schedule_index: 0,
            notice: None,
            should_quit: false,
            results_area: None,
            schedule_area: None,
            debouncer,
            debounced_rx,
            search_rx,
        }
    }

    /// Drain pending debounce emissions and search task messages, then tidy
    /// derived state. Called once per frame; each message is applied as one
    /// atomic step.
    pub fn pump(&mut self) {
        while let Ok(query) = self.debounced_rx.try_recv() {
            self.search.query_changed(&query);
            self.result_index = 0;
        }
        while let Ok(event) = self.search_rx.try_recv() {
            self.search.handle_event(event);
        }

        let result_count = self.search.results().len();
        if result_count > 0 {
            self.result_index = self.result_index.min(result_count - 1);
        } else {
            self.result_index = 0;
        }
        if self.schedule.is_empty() {
            self.schedule_index = 0;
        } else {
            self.schedule_index = self.schedule_index.min(self.schedule.len() - 1);
        }

        if let Some((_, shown_at)) = &self.notice {
            if shown_at.elapsed() > NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    // -- Search input -----------------------------------------------------

    pub fn input_char(&mut self, c: char) {
        self.query.push(c);
        self.search.input_changed();
        self.debouncer.update(self.query.clone());
    }

    pub fn input_backspace(&mut self) {
        self.query.pop();
        self.search.input_changed();
        self.debouncer.update(self.query.clone());
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.debouncer.update(String::new());
        self.search.reset();
        self.result_index = 0;
    }

    pub fn next_result(&mut self) {
        let count = self.search.results().len();
        if count > 0 {
            self.result_index = (self.result_index + 1) % count;
        }
    }

    pub fn previous_result(&mut self) {
        let count = self.search.results().len();
        if count > 0 {
            self.result_index = self.result_index.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Add the highlighted (or clicked) result to the schedule and return
    /// the search to idle, mirroring the pipeline's select contract.
    pub fn select_result(&mut self, index: usize) {
        let Some(item) = self.search.select(index) else {
            return;
        };
        self.query.clear();
        // Supersede any still-pending debounce emission from earlier typing
        self.debouncer.update(String::new());
        self.result_index = 0;

        let (outcome, _) = self.schedule.add(&item);
        match outcome {
            AddOutcome::Added => {
                self.notify(Notice::success(format!("Added \"{}\" to schedule!", item.title)));
            }
            AddOutcome::AlreadyPresent => {
                self.notify(Notice::warning("This movie is already in your schedule!"));
            }
        }
    }

    // -- Schedule navigation & editing ------------------------------------

    pub fn next_schedule_entry(&mut self) {
        if !self.schedule.is_empty() {
            self.schedule_index = (self.schedule_index + 1) % self.schedule.len();
        }
    }

    pub fn previous_schedule_entry(&mut self) {
        if !self.schedule.is_empty() {
            self.schedule_index = self
                .schedule_index
                .checked_sub(1)
                .unwrap_or(self.schedule.len() - 1);
        }
    }

    pub fn remove_selected(&mut self) {
        let Some(entry) = self.schedule.entries().get(self.schedule_index) else {
            return;
        };
        let catalog_id = entry.catalog_id;
        self.schedule.remove(catalog_id);
        if !self.schedule.is_empty() {
            self.schedule_index = self.schedule_index.min(self.schedule.len() - 1);
        } else {
            self.schedule_index = 0;
        }
    }

    // -- Keyboard drag gesture --------------------------------------------

    /// Space grabs the selected entry, Space again drops it at the hover
    /// position. Both paths go through the same controller the mouse uses.
    pub fn toggle_grab(&mut self) {
        if self.drag.is_dragging() {
            let target = self.drag.hover_index().unwrap_or(self.schedule_index);
            if self.drag.drop_on(&mut self.schedule, target).is_some() {
                self.schedule_index = target.min(self.schedule.len().saturating_sub(1));
            }
        } else if let Some(entry) = self.schedule.entries().get(self.schedule_index) {
            self.drag.drag_start(entry.catalog_id);
            self.drag.drag_over(self.schedule_index);
        }
    }

    pub fn move_hover_down(&mut self) {
        if self.schedule.is_empty() {
            return;
        }
        let current = self.drag.hover_index().unwrap_or(self.schedule_index);
        let next = (current + 1).min(self.schedule.len() - 1);
        self.drag.drag_over(next);
    }

    pub fn move_hover_up(&mut self) {
        let current = self.drag.hover_index().unwrap_or(self.schedule_index);
        self.drag.drag_over(current.saturating_sub(1));
    }

    pub fn abandon_drag(&mut self) {
        self.drag.reset();
    }

    // -- Session ----------------------------------------------------------

    pub fn logout(&mut self) {
        self.session.logout();
        self.should_quit = true;
    }
}

impl NotificationSink for App {
    fn notify(&mut self, notice: Notice) {
        self.notice = Some((notice, Instant::now()));
    }
}
