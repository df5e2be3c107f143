//! App-level calendar state
//!
//! One [`CalendarStore`] per mounted calendar. It owns the interactive
//! machines and turns toolbar actions into [`Commit`]s; it never performs
//! I/O itself. Hosts call [`CalendarStore::reset`] on teardown.

use chrono::NaiveDate;
use tracing::debug;
use whenly_domain::{
    EventSchedule, GridConfig, ParticipantId, Result, TimeInterval, ValidDates, WhenlyError,
};

use crate::availability::{Commit, DayBlocks};
use crate::calendar::{is_date_valid, MonthCursor};
use crate::selection::{AddBlockDialog, BlockEditor, DaySelection, EditCommit, EditDialog, FinalizeDialog};

#[derive(Debug, Clone)]
pub struct CalendarStore {
    pub selection: DaySelection,
    pub editor: BlockEditor,
    pub cursor: MonthCursor,
    add_dialog: Option<AddBlockDialog>,
    edit_dialog: Option<EditDialog>,
    finalize_dialog: Option<FinalizeDialog>,
    current_participant: Option<ParticipantId>,
    is_host: bool,
    today: NaiveDate,
}

impl CalendarStore {
    pub fn new(today: NaiveDate, grid: GridConfig) -> Self {
        Self {
            selection: DaySelection::new(),
            editor: BlockEditor::new(grid),
            cursor: MonthCursor::new(today),
            add_dialog: None,
            edit_dialog: None,
            finalize_dialog: None,
            current_participant: None,
            is_host: false,
            today,
        }
    }

    pub fn current_participant(&self) -> Option<&ParticipantId> {
        self.current_participant.as_ref()
    }

    pub fn set_current_participant(&mut self, participant: Option<ParticipantId>) {
        self.current_participant = participant;
    }

    /// Selected days that the event actually allows, in order.
    pub fn valid_selected_days(&self, valid: &ValidDates) -> Vec<NaiveDate> {
        self.selection
            .selected_days()
            .iter()
            .copied()
            .filter(|day| is_date_valid(valid, *day))
            .collect()
    }

    /// Whether the selection toolbar should be shown.
    pub fn has_actionable_selection(&self, valid: &ValidDates) -> bool {
        self.current_participant.is_some() && !self.valid_selected_days(valid).is_empty()
    }

    /// "Mark All Day" over the valid selected days.
    pub fn mark_all_day_commit(&self, event: &EventSchedule) -> Option<Commit> {
        let participant = self.current_participant.clone()?;
        let days = self.valid_selected_days(&event.valid_dates);
        if days.is_empty() {
            return None;
        }
        Some(Commit::MarkAllDay {
            participant,
            event: event.id.clone(),
            days,
            window: event.time_window,
        })
    }

    /// "Clear Availability" over the valid selected days.
    pub fn clear_commit(&self, event: &EventSchedule) -> Option<Commit> {
        let participant = self.current_participant.clone()?;
        let days = self.valid_selected_days(&event.valid_dates);
        if days.is_empty() {
            return None;
        }
        Some(Commit::ClearDays { participant, days })
    }

    /// "Mark All Day" from the day view, for the open day.
    pub fn mark_open_day_commit(&self, event: &EventSchedule) -> Option<Commit> {
        let participant = self.current_participant.clone()?;
        let day = self.selection.open_day_value()?;
        Some(Commit::MarkAllDay {
            participant,
            event: event.id.clone(),
            days: vec![day],
            window: event.time_window,
        })
    }

    /// Open the day view when exactly one valid day is selected.
    pub fn view_details(&mut self, valid: &ValidDates) -> bool {
        match self.valid_selected_days(valid).as_slice() {
            [day] => {
                self.selection.open_day(*day);
                true
            }
            _ => false,
        }
    }

    /// Call after a bulk toolbar commit succeeded.
    pub fn bulk_action_succeeded(&mut self) {
        self.selection.clear_selection();
    }

    /// Commit for a move, resize or edit-dialog save of the viewer's block.
    pub fn update_commit(&self, edit: EditCommit) -> Option<Commit> {
        let owner = self.current_participant.clone()?;
        Some(Commit::UpdateBlock { owner, edit })
    }

    /// Commit deleting the block the edit dialog is showing.
    pub fn delete_commit(&self) -> Option<Commit> {
        let owner = self.current_participant.clone()?;
        let dialog = self.edit_dialog.as_ref()?;
        Some(Commit::DeleteBlock {
            owner,
            id: dialog.delete(),
            day: dialog.day(),
        })
    }

    /// Commit for a new block drawn or picked on `blocks`' day.
    pub fn create_commit(&self, event: &EventSchedule, blocks: &DayBlocks, interval: TimeInterval) -> Option<Commit> {
        let participant = self.current_participant.clone()?;
        Some(Commit::CreateBlock {
            participant,
            event: event.id.clone(),
            existing: blocks.own_intervals(),
            interval,
        })
    }

    // Dialog slots
    // ------------------------------------------------------------------

    /// Open the add-block dialog for the open day.
    pub fn open_add_dialog(&mut self, event: &EventSchedule) -> Option<&mut AddBlockDialog> {
        self.current_participant.as_ref()?;
        let day = self.selection.open_day_value()?;
        self.add_dialog = Some(AddBlockDialog::open(day, &event.time_window));
        self.add_dialog.as_mut()
    }

    pub fn add_dialog(&mut self) -> Option<&mut AddBlockDialog> {
        self.add_dialog.as_mut()
    }

    pub fn close_add_dialog(&mut self) {
        self.add_dialog = None;
    }

    /// Build the edit form for the block the editor's dialog slot holds.
    pub fn open_edit_dialog(&mut self, event: &EventSchedule) -> Option<&mut EditDialog> {
        let block = self.editor.dialog_block()?;
        self.edit_dialog = Some(EditDialog::open(block, &event.time_window));
        self.edit_dialog.as_mut()
    }

    pub fn edit_dialog(&mut self) -> Option<&mut EditDialog> {
        self.edit_dialog.as_mut()
    }

    pub fn close_edit_dialog(&mut self) {
        self.edit_dialog = None;
        self.editor.close_dialog();
    }

    pub fn is_host(&self) -> bool {
        self.is_host
    }

    pub fn set_host(&mut self, is_host: bool) {
        self.is_host = is_host;
    }

    /// Open the finalize picker. Only the host may, and only once per event.
    pub fn open_finalize_dialog(&mut self, event: &EventSchedule) -> Option<&mut FinalizeDialog> {
        if !self.is_host || event.is_finalized() {
            return None;
        }
        self.finalize_dialog = Some(FinalizeDialog::open(self.today));
        self.finalize_dialog.as_mut()
    }

    pub fn finalize_dialog(&mut self) -> Option<&mut FinalizeDialog> {
        self.finalize_dialog.as_mut()
    }

    pub fn close_finalize_dialog(&mut self) {
        self.finalize_dialog = None;
    }

    /// Validate the open finalize picker and build its commit.
    ///
    /// # Errors
    /// - `Unauthorized` when the viewer is not the host
    /// - `InvalidInput` when no finalize dialog is open
    /// - the dialog's own validation errors
    pub fn finalize_commit(&mut self, event: &EventSchedule) -> Result<Commit> {
        if !self.is_host {
            return Err(WhenlyError::Unauthorized(format!(
                "only the host can finalize {}",
                event.slug
            )));
        }
        let dialog = self
            .finalize_dialog
            .as_mut()
            .ok_or_else(|| WhenlyError::InvalidInput("finalize dialog is not open".into()))?;
        let slot = dialog.confirm()?;
        Ok(Commit::Finalize {
            event: event.id.clone(),
            slot,
        })
    }

    /// Drop all transient state and return to this month's grid.
    pub fn reset(&mut self) {
        debug!("calendar store reset");
        self.selection = DaySelection::new();
        self.editor.reset();
        self.cursor = MonthCursor::new(self.today);
        self.add_dialog = None;
        self.edit_dialog = None;
        self.finalize_dialog = None;
    }
}
