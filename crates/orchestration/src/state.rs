//! Order edit state machine.

use common::Gid;
use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// The state of one order edit request.
///
/// State transitions:
/// ```text
/// Validated ──► OwnershipChecked ──► EditSessionOpen ──► LineItemResolved ──► MutationApplied
///                                          │                    │                    │
///                                          └────────────────────┴──► Abandoned ◄─────┘
/// MutationApplied ──► Committed ──► NotificationAttempted ──► Responded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EditState {
    /// The request passed validation; nothing has been sent yet.
    #[default]
    Validated,
    OwnershipChecked,
    /// A calculated order exists on the platform.
    EditSessionOpen,
    LineItemResolved,
    MutationApplied,
    /// The edit is durable. Later failures no longer abort the request.
    Committed,
    NotificationAttempted,
    Responded,
    /// An open session was left uncommitted after a failure (terminal state).
    Abandoned,
}

impl EditState {
    /// Returns true if `next` directly follows this state.
    pub fn can_transition_to(&self, next: EditState) -> bool {
        use EditState::*;
        matches!(
            (self, next),
            (Validated, OwnershipChecked)
                | (OwnershipChecked, EditSessionOpen)
                | (EditSessionOpen, LineItemResolved)
                | (LineItemResolved, MutationApplied)
                | (MutationApplied, Committed)
                | (Committed, NotificationAttempted)
                | (NotificationAttempted, Responded)
                | (EditSessionOpen | LineItemResolved | MutationApplied, Abandoned)
        )
    }

    /// Returns true while an uncommitted calculated order is open.
    pub fn can_abandon(&self) -> bool {
        self.can_transition_to(EditState::Abandoned)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EditState::Responded | EditState::Abandoned)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditState::Validated => "Validated",
            EditState::OwnershipChecked => "OwnershipChecked",
            EditState::EditSessionOpen => "EditSessionOpen",
            EditState::LineItemResolved => "LineItemResolved",
            EditState::MutationApplied => "MutationApplied",
            EditState::Committed => "Committed",
            EditState::NotificationAttempted => "NotificationAttempted",
            EditState::Responded => "Responded",
            EditState::Abandoned => "Abandoned",
        }
    }
}

impl std::fmt::Display for EditState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks one request through the state machine.
#[derive(Debug, Clone, Default)]
pub struct EditProgress {
    state: EditState,
    calculated_order_id: Option<Gid>,
}

impl EditProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// The open (or abandoned) calculated order, once begin succeeded.
    pub fn calculated_order_id(&self) -> Option<&Gid> {
        self.calculated_order_id.as_ref()
    }

    /// Moves to `next`, rejecting transitions the machine does not allow.
    pub fn advance(&mut self, next: EditState) -> Result<(), EditError> {
        if !self.state.can_transition_to(next) {
            return Err(EditError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Records the calculated order and enters `EditSessionOpen`.
    pub fn open_session(&mut self, calculated_order_id: Gid) -> Result<(), EditError> {
        self.advance(EditState::EditSessionOpen)?;
        self.calculated_order_id = Some(calculated_order_id);
        Ok(())
    }
}
