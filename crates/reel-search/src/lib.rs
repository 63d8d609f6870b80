//! Search pipeline for reel
//!
//! This crate contains:
//! - The debounce primitive (hold a changing value until it settles)
//! - The query pipeline (cancel-and-replace async lookups, bounded results,
//!   delayed empty-state feedback)

pub mod debounce;
pub mod pipeline;

pub use debounce::Debouncer;
pub use pipeline::{SearchEvent, SearchPhase, SearchPipeline};
