//! Drag-reorder controller
//!
//! Interprets a start / hover / drop gesture against the schedule. The
//! controller is a plain state machine so it can be driven by any event
//! source (mouse, keyboard) and tested without synthesizing pointer events.

use crate::schedule::{Schedule, ScheduleSnapshot};

#[derive(Debug, Default)]
pub struct DragController {
    dragged_id: Option<u64>,
    hover_index: Option<usize>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragged_id(&self) -> Option<u64> {
        self.dragged_id
    }

    pub fn hover_index(&self) -> Option<usize> {
        self.hover_index
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged_id.is_some()
    }

    /// Begin a gesture. Starting while another gesture is active abandons
    /// the previous one.
    pub fn drag_start(&mut self, catalog_id: u64) {
        self.dragged_id = Some(catalog_id);
        self.hover_index = None;
    }

    /// Update the hover highlight. Visual feedback only; the schedule is
    /// untouched until the drop.
    pub fn drag_over(&mut self, index: usize) {
        self.hover_index = Some(index);
    }

    /// Pointer left the list area. The grab itself stays active so the
    /// gesture resumes if the pointer re-enters.
    pub fn drag_leave(&mut self) {
        self.hover_index = None;
    }

    /// Abandon the gesture entirely.
    pub fn reset(&mut self) {
        self.dragged_id = None;
        self.hover_index = None;
    }

    /// Complete the gesture: move the dragged entry to `target_index` and
    /// commit through the schedule's reorder. Returns the new snapshot when
    /// the schedule changed, `None` on the no-op paths (no active gesture,
    /// dragged entry no longer scheduled, self-drop). Controller state is
    /// cleared on every path so the next gesture starts clean.
    pub fn drop_on(
        &mut self,
        schedule: &mut Schedule,
        target_index: usize,
    ) -> Option<ScheduleSnapshot> {
        let Some(dragged_id) = self.dragged_id else {
            self.reset();
            return None;
        };
        let result = match schedule.position_of(dragged_id) {
            Some(from) if from != target_index => {
                let mut sequence: Vec<_> = schedule.entries().to_vec();
                let entry = sequence.remove(from);
                let target = target_index.min(sequence.len());
                sequence.insert(target, entry);
                Some(schedule.reorder(sequence))
            }
            _ => None,
        };
        self.reset();
        result
    }
}
