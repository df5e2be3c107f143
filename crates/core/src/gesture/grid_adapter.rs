//! Day-grid gesture routing
//!
//! Routes pointer input on one day column into a [`BlockEditor`]:
//! - mouse down on empty grid starts a create-drag (touch uses the add
//!   dialog instead)
//! - down on a block body starts a move; touch also arms a long-press that
//!   opens the edit dialog
//! - down on an edge strip starts a resize and cancels any long-press
//! - double-click opens the edit dialog; Escape cancels an edit session
//!
//! Move and release are expected from window-level listeners while a
//! gesture is active; every response says whether to install or remove them.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};
use whenly_common::{Clock, SystemClock};
use whenly_domain::{AvailabilityBlock, BlockId, BlockSpan, EditMode, GestureConfig, TimeInterval};

use super::long_press::LongPress;
use super::pointer::PointerEvent;
use super::ListenerChange;
use crate::availability::{DayBlocks, PendingWrites};
use crate::geometry::{DayGrid, Edge};
use crate::selection::{BlockEditor, EditCommit};

/// What the pointer went down on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridTarget {
    EmptyGrid,
    BlockBody(BlockId),
    BlockEdge(BlockId, Edge),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridInput {
    PointerDown { event: PointerEvent, target: GridTarget },
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    DoubleClick { block_id: BlockId },
    KeyDown(Key),
}

/// Result of one gesture step for the host to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum GestureOutcome {
    #[default]
    None,
    /// Persist a new block for the day.
    CreateCommitted(TimeInterval),
    /// Persist a move/resize.
    EditCommitted(EditCommit),
    /// The edit dialog was opened for this block.
    DialogOpened(BlockSpan),
    /// An edit session was abandoned.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct GestureResponse {
    pub outcome: GestureOutcome,
    pub listeners: ListenerChange,
}

impl GestureResponse {
    fn idle() -> Self {
        Self::default()
    }
}

/// Read-only context for one input.
#[derive(Clone, Copy)]
pub struct GridContext<'a> {
    pub grid: &'a DayGrid,
    pub blocks: &'a DayBlocks,
    pub pending: &'a PendingWrites,
    pub touch_primary: bool,
}

impl<'a> GridContext<'a> {
    /// Block the viewer may edit right now, if `id` is one. A block is not
    /// editable while it, or its owner's whole day, has a write in flight.
    fn editable(&self, id: &BlockId) -> Option<&'a AvailabilityBlock> {
        let block = self.blocks.find(id)?;
        (self.blocks.is_own(id) && !self.pending.is_locked(block)).then_some(block)
    }
}

/// Gesture bookkeeping for a day grid: the block long-press and whether
/// window listeners are currently bound.
pub struct DayGridGestures<C: Clock = SystemClock> {
    clock: C,
    config: GestureConfig,
    long_press: Option<(LongPress, BlockSpan)>,
    captured: bool,
}

impl DayGridGestures<SystemClock> {
    pub fn new(config: GestureConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> DayGridGestures<C> {
    pub fn with_clock(config: GestureConfig, clock: C) -> Self {
        Self {
            clock,
            config,
            long_press: None,
            captured: false,
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.captured
    }

    /// Edge strip height for the given input kind.
    pub fn edge_strip_px(&self, touch: bool) -> f64 {
        if touch {
            self.config.edge_hit_touch_px
        } else {
            self.config.edge_hit_mouse_px
        }
    }

    pub fn handle(&mut self, editor: &mut BlockEditor, ctx: &GridContext<'_>, input: GridInput) -> GestureResponse {
        match input {
            GridInput::PointerDown { event, target } => self.pointer_down(editor, ctx, event, target),
            GridInput::PointerMove(event) => self.pointer_move(editor, ctx, event),
            GridInput::PointerUp(_) => self.pointer_up(editor, ctx),
            GridInput::DoubleClick { block_id } => self.open_dialog(editor, ctx, &block_id),
            GridInput::KeyDown(Key::Escape) => self.escape(editor),
            GridInput::KeyDown(Key::Other) => GestureResponse::idle(),
        }
    }

    /// Poll the long-press timer. Call from the host's frame/timer loop.
    pub fn tick(&mut self, editor: &mut BlockEditor) -> GestureResponse {
        let now = self.clock.now();
        let Some((press, span)) = self.long_press.as_mut() else {
            return GestureResponse::idle();
        };
        if !press.poll(now) {
            return GestureResponse::idle();
        }
        let span = span.clone();
        debug!(block_id = %span.id, "block long-press fired");
        editor.cancel_edit();
        editor.open_dialog(span.clone());
        GestureResponse {
            outcome: GestureOutcome::DialogOpened(span),
            listeners: self.release_capture(),
        }
    }

    fn pointer_down(
        &mut self,
        editor: &mut BlockEditor,
        ctx: &GridContext<'_>,
        event: PointerEvent,
        target: GridTarget,
    ) -> GestureResponse {
        match target {
            GridTarget::EmptyGrid => {
                if event.is_touch() || ctx.touch_primary || ctx.blocks.viewer().is_none() {
                    return GestureResponse::idle();
                }
                let time = ctx.grid.y_to_time(event.y());
                if editor.start_drag(event.y(), time) {
                    return self.capture();
                }
                GestureResponse::idle()
            }
            GridTarget::BlockBody(id) => {
                let Some(block) = ctx.editable(&id) else {
                    return GestureResponse::idle();
                };
                if !self.start_edit(editor, ctx, block, EditMode::Move, event) {
                    return GestureResponse::idle();
                }
                if event.is_touch() {
                    self.long_press = Some((
                        LongPress::arm(
                            event.position(),
                            self.clock.now(),
                            Duration::from_millis(self.config.long_press_ms),
                            self.config.block_long_press_slop_px,
                        ),
                        block.span(),
                    ));
                }
                self.capture()
            }
            GridTarget::BlockEdge(id, edge) => {
                self.clear_long_press();
                let Some(block) = ctx.editable(&id) else {
                    return GestureResponse::idle();
                };
                let mode = match edge {
                    Edge::Top => EditMode::ResizeTop,
                    Edge::Bottom => EditMode::ResizeBottom,
                };
                if self.start_edit(editor, ctx, block, mode, event) {
                    self.capture()
                } else {
                    GestureResponse::idle()
                }
            }
        }
    }

    fn start_edit(
        &self,
        editor: &mut BlockEditor,
        ctx: &GridContext<'_>,
        block: &AvailabilityBlock,
        mode: EditMode,
        event: PointerEvent,
    ) -> bool {
        match editor.start_edit(block, ctx.blocks.viewer(), mode, event.y()) {
            Ok(()) => true,
            Err(err) => {
                debug!(block_id = %block.id, error = %err, "edit session refused");
                false
            }
        }
    }

    fn pointer_move(&mut self, editor: &mut BlockEditor, ctx: &GridContext<'_>, event: PointerEvent) -> GestureResponse {
        if let Some((press, span)) = self.long_press.as_mut() {
            if press.on_move(event.position()) {
                trace!(block_id = %span.id, "block long-press cancelled by movement");
            }
        }
        let y = event.y();
        let time = ctx.grid.y_to_time(y);
        let own = ctx.blocks.own_spans();
        if editor.edit_session().is_some() {
            editor.update_edit(y, time, ctx.grid.grid_start(), ctx.grid.grid_end(), &own);
        } else if editor.is_dragging() {
            editor.update_drag(y, time, &own);
        }
        GestureResponse::idle()
    }

    fn pointer_up(&mut self, editor: &mut BlockEditor, ctx: &GridContext<'_>) -> GestureResponse {
        self.clear_long_press();
        let outcome = if editor.edit_session().is_some() {
            editor
                .end_edit()
                .map_or(GestureOutcome::None, GestureOutcome::EditCommitted)
        } else if editor.is_dragging() {
            editor
                .end_drag(&ctx.blocks.own_spans())
                .map_or(GestureOutcome::None, GestureOutcome::CreateCommitted)
        } else {
            GestureOutcome::None
        };
        GestureResponse {
            outcome,
            listeners: self.release_capture(),
        }
    }

    fn open_dialog(&mut self, editor: &mut BlockEditor, ctx: &GridContext<'_>, id: &BlockId) -> GestureResponse {
        let Some(block) = ctx.editable(id) else {
            return GestureResponse::idle();
        };
        self.clear_long_press();
        editor.cancel_edit();
        let span = block.span();
        editor.open_dialog(span.clone());
        GestureResponse {
            outcome: GestureOutcome::DialogOpened(span),
            listeners: self.release_capture(),
        }
    }

    fn escape(&mut self, editor: &mut BlockEditor) -> GestureResponse {
        if editor.edit_session().is_none() {
            return GestureResponse::idle();
        }
        self.clear_long_press();
        editor.cancel_edit();
        GestureResponse {
            outcome: GestureOutcome::Cancelled,
            listeners: self.release_capture(),
        }
    }

    fn clear_long_press(&mut self) {
        if let Some((mut press, _)) = self.long_press.take() {
            press.release();
        }
    }

    fn capture(&mut self) -> GestureResponse {
        let listeners = if self.captured {
            ListenerChange::Unchanged
        } else {
            self.captured = true;
            ListenerChange::Install
        };
        GestureResponse {
            outcome: GestureOutcome::None,
            listeners,
        }
    }

    fn release_capture(&mut self) -> ListenerChange {
        if self.captured {
            self.captured = false;
            ListenerChange::Remove
        } else {
            ListenerChange::Unchanged
        }
    }

    /// Forget gesture bookkeeping; used on view teardown.
    pub fn reset(&mut self) {
        self.clear_long_press();
        self.captured = false;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use whenly_common::MockClock;
    use whenly_domain::{GridConfig, ParticipantId, TimeWindow};

    use super::*;
    use crate::availability::WriteTarget;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn block(id: &str, owner: &str, sh: u32, eh: u32) -> AvailabilityBlock {
        AvailabilityBlock {
            id: BlockId::from(id),
            participant_id: ParticipantId::from(owner),
            participant_name: owner.into(),
            participant_color: None,
            interval: TimeInterval::new(at(sh, 0), at(eh, 0)).unwrap(),
        }
    }

    struct Fixture {
        grid: DayGrid,
        blocks: DayBlocks,
        pending: PendingWrites,
        editor: BlockEditor,
        clock: MockClock,
        gestures: DayGridGestures<MockClock>,
    }

    impl Fixture {
        fn new() -> Self {
            let clock = MockClock::new();
            Self {
                grid: DayGrid::new(day(), &TimeWindow::default(), GridConfig::default()),
                blocks: DayBlocks::new(
                    day(),
                    Some(ParticipantId::from("me")),
                    vec![block("mine", "me", 9, 10), block("theirs", "you", 11, 12)],
                ),
                pending: PendingWrites::new(),
                editor: BlockEditor::default(),
                gestures: DayGridGestures::with_clock(GestureConfig::default(), clock.clone()),
                clock,
            }
        }

        fn send(&mut self, input: GridInput) -> GestureResponse {
            let ctx = GridContext {
                grid: &self.grid,
                blocks: &self.blocks,
                pending: &self.pending,
                touch_primary: false,
            };
            self.gestures.handle(&mut self.editor, &ctx, input)
        }
    }

    fn down(event: PointerEvent, target: GridTarget) -> GridInput {
        GridInput::PointerDown { event, target }
    }

    /// Validates `DayGridGestures` behavior for the mouse create-drag scenario.
    ///
    /// Assertions:
    /// - mouse down on empty grid installs listeners
    /// - release commits the snapped interval and removes listeners
    #[test]
    fn test_mouse_create_drag() {
        let mut fx = Fixture::new();
        let response = fx.send(down(PointerEvent::mouse(10.0, 360.0), GridTarget::EmptyGrid));
        assert_eq!(response.listeners, ListenerChange::Install);
        fx.send(GridInput::PointerMove(PointerEvent::mouse(10.0, 407.0)));
        let response = fx.send(GridInput::PointerUp(PointerEvent::mouse(10.0, 407.0)));
        assert_eq!(
            response.outcome,
            GestureOutcome::CreateCommitted(TimeInterval::new(at(14, 0), at(14, 45)).unwrap())
        );
        assert_eq!(response.listeners, ListenerChange::Remove);
    }

    #[test]
    fn test_touch_on_empty_grid_does_nothing() {
        let mut fx = Fixture::new();
        let response = fx.send(down(PointerEvent::touch(10.0, 360.0), GridTarget::EmptyGrid));
        assert_eq!(response, GestureResponse::default());
        assert!(!fx.editor.is_dragging());
    }

    #[test]
    fn test_other_participants_block_is_inert() {
        let mut fx = Fixture::new();
        let response = fx.send(down(PointerEvent::mouse(0.0, 190.0), GridTarget::BlockBody(BlockId::from("theirs"))));
        assert_eq!(response.listeners, ListenerChange::Unchanged);
        assert!(fx.editor.edit_session().is_none());
        let response = fx.send(GridInput::DoubleClick { block_id: BlockId::from("theirs") });
        assert_eq!(response.outcome, GestureOutcome::None);
    }

    #[test]
    fn test_pending_block_is_inert() {
        let mut fx = Fixture::new();
        let _guard = fx
            .pending
            .try_acquire(vec![WriteTarget::block(&block("mine", "me", 9, 10))])
            .unwrap();
        fx.send(down(PointerEvent::mouse(0.0, 70.0), GridTarget::BlockBody(BlockId::from("mine"))));
        assert!(fx.editor.edit_session().is_none());
    }

    /// Validates `DayGridGestures` behavior for the day replace in flight scenario.
    ///
    /// Assertions:
    /// - while the viewer's day is being replaced, body, edge and double-click input on their block is ignored
    /// - the block becomes editable again once the replace resolves
    #[test]
    fn test_block_inert_while_its_day_is_replaced() {
        let mut fx = Fixture::new();
        let guard = fx
            .pending
            .try_acquire(vec![WriteTarget::Day(ParticipantId::from("me"), day())])
            .unwrap();
        let mine = BlockId::from("mine");

        fx.send(down(PointerEvent::mouse(0.0, 70.0), GridTarget::BlockBody(mine.clone())));
        assert!(fx.editor.edit_session().is_none());
        fx.send(down(PointerEvent::mouse(0.0, 61.0), GridTarget::BlockEdge(mine.clone(), Edge::Top)));
        assert!(fx.editor.edit_session().is_none());
        let response = fx.send(GridInput::DoubleClick { block_id: mine.clone() });
        assert_eq!(response.outcome, GestureOutcome::None);

        drop(guard);
        fx.send(down(PointerEvent::mouse(0.0, 70.0), GridTarget::BlockBody(mine)));
        assert_eq!(fx.editor.edit_mode(), Some(EditMode::Move));
    }

    /// Validates `DayGridGestures` behavior for the mouse move scenario.
    ///
    /// Assertions:
    /// - moving 60px moves the block one hour
    /// - release emits an edit commit
    #[test]
    fn test_mouse_move_block() {
        let mut fx = Fixture::new();
        fx.send(down(PointerEvent::mouse(0.0, 80.0), GridTarget::BlockBody(BlockId::from("mine"))));
        assert_eq!(fx.editor.edit_mode(), Some(EditMode::Move));
        fx.send(GridInput::PointerMove(PointerEvent::mouse(0.0, 140.0)));
        let response = fx.send(GridInput::PointerUp(PointerEvent::mouse(0.0, 140.0)));
        assert_eq!(
            response.outcome,
            GestureOutcome::EditCommitted(EditCommit {
                block_id: BlockId::from("mine"),
                interval: TimeInterval::new(at(10, 0), at(11, 0)).unwrap(),
            })
        );
    }

    #[test]
    fn test_edge_starts_resize() {
        let mut fx = Fixture::new();
        fx.send(down(
            PointerEvent::mouse(0.0, 118.0),
            GridTarget::BlockEdge(BlockId::from("mine"), Edge::Bottom),
        ));
        assert_eq!(fx.editor.edit_mode(), Some(EditMode::ResizeBottom));
        fx.send(GridInput::PointerMove(PointerEvent::mouse(0.0, 150.0)));
        assert_eq!(fx.editor.editing_current(), Some(TimeInterval::new(at(9, 0), at(10, 30)).unwrap()));
    }

    /// Validates `DayGridGestures::tick` behavior for the touch long-press scenario.
    ///
    /// Assertions:
    /// - a stationary touch on a block opens the dialog after the delay
    /// - the move session is cancelled
    /// - the later release commits nothing
    #[test]
    fn test_touch_long_press_opens_dialog() {
        let mut fx = Fixture::new();
        fx.send(down(PointerEvent::touch(0.0, 80.0), GridTarget::BlockBody(BlockId::from("mine"))));
        fx.clock.advance(Duration::from_millis(499));
        assert_eq!(fx.gestures.tick(&mut fx.editor).outcome, GestureOutcome::None);

        fx.clock.advance(Duration::from_millis(1));
        let response = fx.gestures.tick(&mut fx.editor);
        assert!(matches!(response.outcome, GestureOutcome::DialogOpened(ref span) if span.id.as_str() == "mine"));
        assert_eq!(response.listeners, ListenerChange::Remove);
        assert!(fx.editor.edit_session().is_none());
        assert!(fx.editor.dialog_block().is_some());

        let response = fx.send(GridInput::PointerUp(PointerEvent::touch(0.0, 80.0)));
        assert_eq!(response.outcome, GestureOutcome::None);
    }

    #[test]
    fn test_touch_movement_cancels_long_press() {
        let mut fx = Fixture::new();
        fx.send(down(PointerEvent::touch(0.0, 80.0), GridTarget::BlockBody(BlockId::from("mine"))));
        fx.send(GridInput::PointerMove(PointerEvent::touch(0.0, 95.0)));
        fx.clock.advance(Duration::from_secs(1));
        assert_eq!(fx.gestures.tick(&mut fx.editor).outcome, GestureOutcome::None);
        assert_eq!(fx.editor.edit_mode(), Some(EditMode::Move));
    }

    #[test]
    fn test_touch_edge_never_arms_long_press() {
        let mut fx = Fixture::new();
        fx.send(down(
            PointerEvent::touch(0.0, 62.0),
            GridTarget::BlockEdge(BlockId::from("mine"), Edge::Top),
        ));
        fx.clock.advance(Duration::from_secs(1));
        assert_eq!(fx.gestures.tick(&mut fx.editor).outcome, GestureOutcome::None);
        assert_eq!(fx.editor.edit_mode(), Some(EditMode::ResizeTop));
    }

    #[test]
    fn test_double_click_supersedes_move() {
        let mut fx = Fixture::new();
        fx.send(down(PointerEvent::mouse(0.0, 80.0), GridTarget::BlockBody(BlockId::from("mine"))));
        fx.send(GridInput::PointerMove(PointerEvent::mouse(0.0, 140.0)));
        let response = fx.send(GridInput::DoubleClick { block_id: BlockId::from("mine") });
        assert!(matches!(response.outcome, GestureOutcome::DialogOpened(_)));
        assert!(fx.editor.edit_session().is_none());
        assert_eq!(
            fx.editor.dialog_block().map(|b| b.interval),
            Some(TimeInterval::new(at(9, 0), at(10, 0)).unwrap())
        );
    }

    /// Validates `DayGridGestures` behavior for the Escape key scenario.
    ///
    /// Assertions:
    /// - Escape cancels an edit session
    /// - Escape leaves a create-drag alone
    #[test]
    fn test_escape_cancels_edit_only() {
        let mut fx = Fixture::new();
        fx.send(down(PointerEvent::mouse(0.0, 80.0), GridTarget::BlockBody(BlockId::from("mine"))));
        let response = fx.send(GridInput::KeyDown(Key::Escape));
        assert_eq!(response.outcome, GestureOutcome::Cancelled);
        assert_eq!(response.listeners, ListenerChange::Remove);

        fx.send(down(PointerEvent::mouse(0.0, 400.0), GridTarget::EmptyGrid));
        let response = fx.send(GridInput::KeyDown(Key::Escape));
        assert_eq!(response.outcome, GestureOutcome::None);
        assert!(fx.editor.is_dragging());
    }

    #[test]
    fn test_edge_strip_sizes() {
        let gestures = DayGridGestures::new(GestureConfig::default());
        assert_eq!(gestures.edge_strip_px(false), 8.0);
        assert_eq!(gestures.edge_strip_px(true), 12.0);
        assert!(!gestures.is_capturing());
    }
}
