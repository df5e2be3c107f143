//! Block creation and in-place editing on the day grid
//!
//! Two flows share one collision rule: a candidate may not overlap any span
//! in the caller's collision set (the viewer's own blocks for the day).
//! Updates that would collide are dropped, so the gesture sticks at its last
//! valid position.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use whenly_domain::{
    AvailabilityBlock, BlockId, BlockSpan, EditMode, GridConfig, ParticipantId, Result,
    TimeInterval, WhenlyError,
};

use crate::interval::{clamp_interval, has_collision, meets_minimum, snap_to_grid};

/// Pointer sample: client Y plus the grid time it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPoint {
    pub y: f64,
    pub time: NaiveDateTime,
}

/// In-progress drag-to-create (the draft block).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreateDrag {
    pub anchor: DragPoint,
    pub current: DragPoint,
}

impl CreateDrag {
    /// Ordered bounds, which may be equal.
    fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        ordered(self.anchor.time, self.current.time)
    }

    /// Draft interval, or `None` while anchor and current coincide.
    pub fn interval(&self) -> Option<TimeInterval> {
        let (start, end) = self.bounds();
        TimeInterval::new(start, end).ok()
    }
}

/// Move/resize of an existing block.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub block_id: BlockId,
    pub mode: EditMode,
    pub original: TimeInterval,
    pub current: TimeInterval,
    pub anchor_y: f64,
}

/// Finished move/resize to forward to `update_block`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCommit {
    pub block_id: BlockId,
    pub interval: TimeInterval,
}

/// Create-drag, edit session and edit-dialog slot for one day grid.
#[derive(Debug, Clone, Default)]
pub struct BlockEditor {
    grid: GridConfig,
    drag: Option<CreateDrag>,
    edit: Option<EditSession>,
    dialog: Option<BlockSpan>,
}

impl BlockEditor {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn grid_config(&self) -> &GridConfig {
        &self.grid
    }

    // ------------------------------------------------------------------
    // Create-by-drag
    // ------------------------------------------------------------------

    /// Begin a draft at `(y, time)`. Refused while an edit session is open.
    pub fn start_drag(&mut self, y: f64, time: NaiveDateTime) -> bool {
        if self.edit.is_some() {
            return false;
        }
        let point = DragPoint { y, time };
        self.drag = Some(CreateDrag {
            anchor: point,
            current: point,
        });
        debug!(%time, "create drag started");
        true
    }

    /// Move the draft's free end. Rejected (the previous end is kept) when
    /// the provisional range collides with `existing`.
    pub fn update_drag(&mut self, y: f64, time: NaiveDateTime, existing: &[BlockSpan]) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let (start, end) = ordered(drag.anchor.time, time);
        if range_collides(start, end, existing, None) {
            trace!(%time, "create drag update blocked by collision");
            return false;
        }
        drag.current = DragPoint { y, time };
        true
    }

    /// Finish the draft. Returns the interval to persist, or `None` when it
    /// is shorter than the minimum or collides.
    pub fn end_drag(&mut self, existing: &[BlockSpan]) -> Option<TimeInterval> {
        let drag = self.drag.take()?;
        let Some(interval) = drag.interval() else {
            debug!("create drag discarded: empty");
            return None;
        };
        if !meets_minimum(&interval, self.grid.min_block_minutes) {
            debug!(minutes = interval.minutes(), "create drag discarded: too short");
            return None;
        }
        if has_collision(&interval, existing, None) {
            debug!(%interval, "create drag discarded: collision");
            return None;
        }
        debug!(%interval, "create drag committed");
        Some(interval)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn create_drag(&self) -> Option<&CreateDrag> {
        self.drag.as_ref()
    }

    /// Draft interval for rendering.
    pub fn drag_preview(&self) -> Option<TimeInterval> {
        self.drag.as_ref().and_then(CreateDrag::interval)
    }

    // ------------------------------------------------------------------
    // Move / resize
    // ------------------------------------------------------------------

    /// Open an edit session on `block`.
    ///
    /// # Errors
    /// - `Unauthorized` when `viewer` is not the block's owner
    /// - `InvalidInput` while a create-drag or another edit is in progress
    pub fn start_edit(
        &mut self,
        block: &AvailabilityBlock,
        viewer: Option<&ParticipantId>,
        mode: EditMode,
        anchor_y: f64,
    ) -> Result<()> {
        if viewer != Some(&block.participant_id) {
            return Err(WhenlyError::Unauthorized(format!(
                "block {} belongs to another participant",
                block.id
            )));
        }
        if self.drag.is_some() {
            return Err(WhenlyError::InvalidInput("a new block is being drawn".into()));
        }
        if let Some(active) = &self.edit {
            return Err(WhenlyError::InvalidInput(format!(
                "block {} is already being edited",
                active.block_id
            )));
        }
        debug!(block_id = %block.id, %mode, "edit session started");
        self.edit = Some(EditSession {
            block_id: block.id.clone(),
            mode,
            original: block.interval,
            current: block.interval,
            anchor_y,
        });
        Ok(())
    }

    /// Recompute the session's interval from the pointer. Returns whether the
    /// update was applied; collisions with `existing` (other than the block
    /// itself) leave `current` unchanged.
    pub fn update_edit(
        &mut self,
        y: f64,
        time: NaiveDateTime,
        grid_start: NaiveDateTime,
        grid_end: NaiveDateTime,
        existing: &[BlockSpan],
    ) -> bool {
        let Some(session) = self.edit.as_ref() else {
            return false;
        };
        let candidate = match session.mode {
            EditMode::Move => self.moved(session, y, grid_start, grid_end),
            EditMode::ResizeTop => self.resized_top(session, time, grid_start),
            EditMode::ResizeBottom => self.resized_bottom(session, time, grid_end),
        };
        let Some(candidate) = candidate else {
            return false;
        };
        if has_collision(&candidate, existing, Some(&session.block_id)) {
            trace!(block_id = %session.block_id, %candidate, "edit update blocked by collision");
            return false;
        }
        if let Some(session) = self.edit.as_mut() {
            session.current = candidate;
        }
        true
    }

    fn moved(
        &self,
        session: &EditSession,
        y: f64,
        grid_start: NaiveDateTime,
        grid_end: NaiveDateTime,
    ) -> Option<TimeInterval> {
        let delta_minutes = (y - session.anchor_y) * self.grid.minutes_per_pixel();
        if delta_minutes.is_nan() {
            return None;
        }
        // Anything past the grid span is pinned by the clamp below.
        let span = (grid_end - grid_start).num_minutes().abs() as f64;
        let delta_minutes = delta_minutes.clamp(-span, span);
        let delta = Duration::milliseconds((delta_minutes * 60_000.0).round() as i64);
        let start = snap_to_grid(session.original.start + delta, self.grid.snap_minutes);
        Some(clamp_interval(session.original.shifted_to(start), grid_start, grid_end))
    }

    fn resized_top(
        &self,
        session: &EditSession,
        time: NaiveDateTime,
        grid_start: NaiveDateTime,
    ) -> Option<TimeInterval> {
        let end = session.original.end;
        let mut start = snap_to_grid(time, self.grid.snap_minutes).max(grid_start);
        if start >= end {
            start = end - self.min_block();
        }
        TimeInterval::new(start, end).ok()
    }

    fn resized_bottom(
        &self,
        session: &EditSession,
        time: NaiveDateTime,
        grid_end: NaiveDateTime,
    ) -> Option<TimeInterval> {
        let start = session.original.start;
        let mut end = snap_to_grid(time, self.grid.snap_minutes).min(grid_end);
        if end <= start {
            end = start + self.min_block();
        }
        TimeInterval::new(start, end).ok()
    }

    fn min_block(&self) -> Duration {
        Duration::minutes(i64::from(self.grid.min_block_minutes))
    }

    /// Close the session. Returns the new interval only if it differs from
    /// the original.
    pub fn end_edit(&mut self) -> Option<EditCommit> {
        let session = self.edit.take()?;
        if session.current == session.original {
            debug!(block_id = %session.block_id, "edit session ended without change");
            return None;
        }
        debug!(block_id = %session.block_id, interval = %session.current, "edit session committed");
        Some(EditCommit {
            block_id: session.block_id,
            interval: session.current,
        })
    }

    /// Discard the session and any in-progress change.
    pub fn cancel_edit(&mut self) {
        if let Some(session) = self.edit.take() {
            debug!(block_id = %session.block_id, "edit session cancelled");
        }
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn edit_mode(&self) -> Option<EditMode> {
        self.edit.as_ref().map(|session| session.mode)
    }

    pub fn editing_block_id(&self) -> Option<&BlockId> {
        self.edit.as_ref().map(|session| &session.block_id)
    }

    pub fn editing_current(&self) -> Option<TimeInterval> {
        self.edit.as_ref().map(|session| session.current)
    }

    // ------------------------------------------------------------------
    // Dialog slot
    // ------------------------------------------------------------------

    pub fn open_dialog(&mut self, block: BlockSpan) {
        debug!(block_id = %block.id, "edit dialog opened");
        self.dialog = Some(block);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Update the dialog's working interval. No-op when closed.
    pub fn update_dialog_block(&mut self, interval: TimeInterval) {
        if let Some(block) = self.dialog.as_mut() {
            block.interval = interval;
        }
    }

    pub fn dialog_block(&self) -> Option<&BlockSpan> {
        self.dialog.as_ref()
    }

    /// Drop every transient state; used on view teardown.
    pub fn reset(&mut self) {
        self.drag = None;
        self.edit = None;
        self.dialog = None;
    }
}

fn ordered(a: NaiveDateTime, b: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Collision test that also accepts a zero-length range, which collides only
/// when it sits strictly inside an existing span.
fn range_collides(
    start: NaiveDateTime,
    end: NaiveDateTime,
    existing: &[BlockSpan],
    exclude: Option<&BlockId>,
) -> bool {
    match TimeInterval::new(start, end) {
        Ok(interval) => has_collision(&interval, existing, exclude),
        Err(_) => existing
            .iter()
            .filter(|span| exclude != Some(&span.id))
            .any(|span| span.interval.start < start && start < span.interval.end),
    }
}
