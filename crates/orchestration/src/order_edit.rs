//! Order edit step names, used as the `step` log field.

/// Verify the order carries the caller's identity tag.
pub const STEP_CHECK_OWNERSHIP: &str = "check_ownership";

/// Open a calculated order.
pub const STEP_BEGIN_EDIT: &str = "begin_edit";

/// Map the requested line item into the calculated namespace.
pub const STEP_RESOLVE_LINE_ITEM: &str = "resolve_line_item";

/// Apply the single discount, remove or add mutation.
pub const STEP_APPLY_MUTATION: &str = "apply_mutation";

pub const STEP_COMMIT: &str = "commit";

/// Best-effort marketing notification.
pub const STEP_NOTIFY: &str = "notify";
