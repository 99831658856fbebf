use tracing::warn;

use crate::{
    core::{
        homograph,
        models::{
            Handle,
            WsHandle,
            MORE_HANDLE,
            SEPARATOR_HANDLE,
        },
        morph,
        LexineError,
    },
    repository::{
        Attr,
        EntryWriter,
        Navigator,
        NewEntry,
        Repository,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Idle,       // Popup closed
    Open,       // Popup visible, nothing chosen yet
    Chooser,    // Popup hidden, external chooser dialog up
}

/// What the external chooser dialog came back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooserOutcome {
    Created(Handle),
    Navigate { tool: String, target: Handle },
    Cancelled,
}

/// What the host has to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorAction {
    Ignored,
    Confirmed(Handle),
    LaunchChooser,
    RebuildAndSelect(Handle),   // Full re-traversal rooted at the new item's list
    Navigated,                  // Host may close the dialog entirely
    Reverted(Handle),           // Back to the last confirmed selection
}

/// Selection state machine around the "More..." escape hatch. The chooser
/// dialog only ever launches from a direct mouse pick; keyboard or
/// programmatic selection of the sentinel is ignored, so a list rebuild can
/// never re-enter the dialog.
pub struct PopupChooser {
    state: PopupState,
    confirmed: Handle,
}

impl PopupChooser {
    pub fn new(initial: Handle) -> Self {
        PopupChooser { state: PopupState::Idle, confirmed: initial }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn confirmed(&self) -> Handle {
        self.confirmed
    }

    pub fn open(&mut self) {
        if self.state == PopupState::Idle {
            self.state = PopupState::Open;
        }
    }

    pub fn select(&mut self, handle: Handle, by_mouse: bool) -> SelectorAction {
        if handle == SEPARATOR_HANDLE {
            return SelectorAction::Ignored;
        }

        if handle == MORE_HANDLE {
            if by_mouse && self.state == PopupState::Open {
                self.state = PopupState::Chooser;
                return SelectorAction::LaunchChooser;
            }
            return SelectorAction::Ignored;
        }

        self.confirmed = handle;
        self.state = PopupState::Idle;
        SelectorAction::Confirmed(handle)
    }

    pub fn chooser_closed(
        &mut self,
        outcome: ChooserOutcome,
        navigator: &dyn Navigator,
    ) -> SelectorAction {
        self.state = PopupState::Idle;

        match outcome {
            ChooserOutcome::Created(handle) => {
                self.confirmed = handle;
                SelectorAction::RebuildAndSelect(handle)
            }
            ChooserOutcome::Navigate { tool, target } => {
                navigator.jump_to(&tool, target);
                SelectorAction::Navigated
            }
            ChooserOutcome::Cancelled => SelectorAction::Reverted(self.confirmed),
        }
    }
}

/// Build the record for a new entry from the form as typed: strip affix
/// markers, deduce the morph type, and pick the homograph number from the
/// entries already carrying the bare form.
pub fn prepare_entry(repo: &dyn Repository, form: &str, ws: WsHandle) -> NewEntry {
    let (morph_type, lexeme_form) = morph::split_markers(form);

    let existing = repo
        .all_entries()
        .iter()
        .filter(|&&entry| {
            repo.string_alt(entry, Attr::EntryLexemeForm, ws).as_deref()
                == Some(lexeme_form.as_str())
        })
        .count();

    NewEntry { lexeme_form, ws, morph_type, homograph: homograph::next_number(existing) }
}

/// All-or-nothing creation: on any failure the snapshot is restored and the
/// repository is exactly as it was.
pub fn create_with_rollback<W: EntryWriter>(
    writer: &mut W,
    entry: &NewEntry,
) -> Result<Handle, LexineError> {
    let snapshot = writer.snapshot();

    match writer.create_entry(entry) {
        Ok(handle) => Ok(handle),
        Err(e) => {
            warn!(form = %entry.lexeme_form, "entry creation failed, rolling back");
            writer.restore(snapshot);
            Err(LexineError::CreationFailed(e.to_string()))
        }
    }
}
