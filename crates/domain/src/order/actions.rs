//! Edit actions.

use std::fmt;
use std::str::FromStr;

use common::Gid;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Percentage applied when a discount request names none.
pub const DEFAULT_DISCOUNT_PERCENT: f64 = 10.0;

/// Units added when an add request names no positive quantity.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;

/// The wire name of an edit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Discount,
    Remove,
    Add,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Discount => "discount",
            ActionKind::Remove => "remove",
            ActionKind::Add => "add",
        }
    }

    /// Discount and remove act on an existing line item; add does not.
    pub fn needs_target(&self) -> bool {
        matches!(self, ActionKind::Discount | ActionKind::Remove)
    }

    /// Client-facing message once the edit is committed.
    pub fn success_message(&self) -> &'static str {
        match self {
            ActionKind::Discount => "Discount applied",
            ActionKind::Remove => "Item removed",
            ActionKind::Add => "Item added",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discount" => Ok(ActionKind::Discount),
            "remove" => Ok(ActionKind::Remove),
            "add" => Ok(ActionKind::Add),
            other => Err(ValidationError::InvalidAction {
                action: other.to_string(),
            }),
        }
    }
}

/// A single validated edit, with defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// Percentage discount on one line item.
    Discount { percent: f64 },
    /// Set one line item's quantity to zero.
    Remove,
    /// Add units of a variant as a new line item.
    Add { variant_id: Gid, quantity: i64 },
}

impl EditAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            EditAction::Discount { .. } => ActionKind::Discount,
            EditAction::Remove => ActionKind::Remove,
            EditAction::Add { .. } => ActionKind::Add,
        }
    }
}

/// Description recorded on a manually applied discount, e.g. `10% Discount (manual apply)`.
pub fn discount_description(percent: f64) -> String {
    format!("{percent}% Discount (manual apply)")
}

/// Resolves a requested add quantity: non-positive or absent means one unit.
pub fn add_quantity(requested: Option<i64>) -> i64 {
    requested
        .filter(|q| *q > 0)
        .unwrap_or(DEFAULT_ADD_QUANTITY)
}
