//! Core domain models and logic for reel
//!
//! This crate contains:
//! - Domain models (CatalogItem, ScheduleEntry)
//! - The schedule engine (ordered, deduplicated watch queue)
//! - The drag-reorder controller

pub mod drag;
pub mod models;
pub mod notify;
pub mod schedule;
pub mod session;

pub use drag::DragController;
pub use models::{movie_year, CatalogItem};
pub use notify::{Notice, NoticeKind, NotificationSink};
pub use schedule::{AddOutcome, Schedule, ScheduleEntry, ScheduleSnapshot};
pub use session::Session;
