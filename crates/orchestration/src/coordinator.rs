//! Order edit orchestrator.

use std::time::Instant;

use commerce::{AdminOperations, CommerceGateway};
use common::{CalculatedOrder, Gid, UserError};
use domain::{EditAction, ModifyCommand, discount_description, ensure_owned};

use crate::error::{EditError, Result};
use crate::events::MarketingEvent;
use crate::order_edit;
use crate::outcome::{ModifyOutcome, deliver};
use crate::services::MarketingSink;
use crate::state::{EditProgress, EditState};

/// What phase one produced once the edit is durable.
struct CommittedEdit {
    calculated_order_id: Gid,
    target_line_item_id: Option<Gid>,
    order_name: Option<String>,
}

/// Orchestrates order edits.
///
/// Each call runs ownership check, begin, resolve, one mutation and commit
/// as a strictly sequential chain of platform round trips, then attempts a
/// marketing notification whose failure never fails the call. A failure
/// after begin abandons the open calculated order.
pub struct OrderEditOrchestrator<G, M>
where
    G: CommerceGateway,
    M: MarketingSink,
{
    gateway: G,
    sink: M,
    identity_tag: String,
}

impl<G, M> OrderEditOrchestrator<G, M>
where
    G: CommerceGateway,
    M: MarketingSink,
{
    /// Creates an orchestrator acting on behalf of `identity_tag`.
    pub fn new(gateway: G, sink: M, identity_tag: impl Into<String>) -> Self {
        Self {
            gateway,
            sink,
            identity_tag: identity_tag.into(),
        }
    }

    pub fn identity_tag(&self) -> &str {
        &self.identity_tag
    }

    /// Applies one validated edit and reports the outcome.
    ///
    /// Errors are returned only for failures before the commit; the
    /// notification result is part of the outcome.
    #[tracing::instrument(
        skip(self, cmd),
        fields(order_id = %cmd.order_id, action = %cmd.action.kind())
    )]
    pub async fn modify(&self, cmd: ModifyCommand) -> Result<ModifyOutcome> {
        let action = cmd.action.kind();
        metrics::counter!("order_edits_total", "action" => action.as_str()).increment(1);
        let started = Instant::now();
        let mut progress = EditProgress::new();

        let committed = match self.edit(&cmd, &mut progress).await {
            Ok(committed) => committed,
            Err(err) => {
                if progress.state().can_abandon() {
                    self.abandon(&mut progress, &err);
                }
                metrics::counter!("order_edits_failed_total", "action" => action.as_str())
                    .increment(1);
                tracing::warn!(state = %progress.state(), error = %err, "order edit failed");
                return Err(err);
            }
        };

        progress.advance(EditState::NotificationAttempted)?;
        tracing::info!(step = order_edit::STEP_NOTIFY, "order edit step");
        let event = MarketingEvent::order_modified(
            &cmd,
            &self.identity_tag,
            committed.target_line_item_id.as_ref(),
            chrono::Utc::now().timestamp_millis(),
        );
        let notification = deliver(&self.sink, &event).await;
        progress.advance(EditState::Responded)?;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("order_edit_duration_seconds").record(duration);
        tracing::info!(
            duration,
            order_name = committed.order_name.as_deref(),
            notification_failed = notification.is_failed(),
            "order edit completed"
        );

        Ok(ModifyOutcome {
            action,
            calculated_order_id: committed.calculated_order_id,
            target_line_item_id: committed.target_line_item_id,
            order_name: committed.order_name,
            notification,
        })
    }

    /// Phase one: everything up to and including the commit.
    async fn edit(&self, cmd: &ModifyCommand, progress: &mut EditProgress) -> Result<CommittedEdit> {
        tracing::info!(step = order_edit::STEP_CHECK_OWNERSHIP, "order edit step");
        ensure_owned(&self.gateway, &cmd.order_id, &self.identity_tag).await?;
        progress.advance(EditState::OwnershipChecked)?;

        tracing::info!(step = order_edit::STEP_BEGIN_EDIT, "order edit step");
        let begin = self.gateway.order_edit_begin(&cmd.order_id).await?;
        if !begin.user_errors.is_empty() {
            return Err(EditError::EditBeginFailed {
                errors: begin.user_errors,
            });
        }
        let calculated = begin
            .calculated_order
            .filter(|calculated| !calculated.id.is_blank())
            .ok_or(EditError::EditSessionUnavailable)?;
        progress.open_session(calculated.id.clone())?;

        tracing::info!(step = order_edit::STEP_RESOLVE_LINE_ITEM, "order edit step");
        let target = if cmd.action.kind().needs_target() {
            let target = resolve_target(cmd.line_item_id.as_ref(), &calculated);
            Some(target.ok_or(EditError::NoTargetLineItem)?)
        } else {
            None
        };
        progress.advance(EditState::LineItemResolved)?;

        tracing::info!(
            step = order_edit::STEP_APPLY_MUTATION,
            target = target.as_ref().map(Gid::as_str),
            "order edit step"
        );
        self.apply(&calculated.id, target.as_ref(), &cmd.action)
            .await?;
        progress.advance(EditState::MutationApplied)?;

        tracing::info!(step = order_edit::STEP_COMMIT, "order edit step");
        let commit = self.gateway.order_edit_commit(&calculated.id, false).await?;
        if !commit.user_errors.is_empty() {
            return Err(EditError::CommitFailed {
                errors: commit.user_errors,
            });
        }
        progress.advance(EditState::Committed)?;

        Ok(CommittedEdit {
            calculated_order_id: calculated.id,
            target_line_item_id: target,
            order_name: commit.order.map(|order| order.name),
        })
    }

    /// Dispatches exactly one mutation for the action.
    async fn apply(
        &self,
        calculated_order_id: &Gid,
        target: Option<&Gid>,
        action: &EditAction,
    ) -> Result<()> {
        match action {
            EditAction::Discount { percent } => {
                let target = target.ok_or(EditError::NoTargetLineItem)?;
                let payload = self
                    .gateway
                    .order_edit_add_line_item_discount(
                        calculated_order_id,
                        target,
                        *percent,
                        &discount_description(*percent),
                    )
                    .await?;
                reject_on_user_errors(payload.user_errors, |errors| EditError::DiscountFailed {
                    errors,
                })
            }
            EditAction::Remove => {
                let target = target.ok_or(EditError::NoTargetLineItem)?;
                let payload = self
                    .gateway
                    .order_edit_set_quantity(calculated_order_id, target, 0)
                    .await?;
                reject_on_user_errors(payload.user_errors, |errors| EditError::RemoveFailed {
                    errors,
                })
            }
            EditAction::Add {
                variant_id,
                quantity,
            } => {
                let payload = self
                    .gateway
                    .order_edit_add_variant(calculated_order_id, variant_id, *quantity)
                    .await?;
                reject_on_user_errors(payload.user_errors, |errors| EditError::AddFailed {
                    errors,
                })
            }
        }
    }

    /// The platform has no abort mutation; an uncommitted calculated order
    /// simply expires, so abandonment is recorded locally.
    fn abandon(&self, progress: &mut EditProgress, err: &EditError) {
        let from = progress.state();
        if progress.advance(EditState::Abandoned).is_ok() {
            metrics::counter!("order_edit_sessions_abandoned_total").increment(1);
            tracing::warn!(
                calculated_order_id = progress.calculated_order_id().map(Gid::as_str),
                %from,
                error = %err,
                "edit session abandoned"
            );
        }
    }
}

/// Resolves the line item an edit targets inside the calculated order.
///
/// A supplied id is rewritten into the calculated namespace; otherwise the
/// first calculated line item is used.
pub fn resolve_target(supplied: Option<&Gid>, calculated: &CalculatedOrder) -> Option<Gid> {
    match supplied {
        Some(id) => Some(id.to_calculated_line_item()),
        None => calculated.first_line_item().map(|li| li.id.clone()),
    }
}

fn reject_on_user_errors(
    errors: Vec<UserError>,
    wrap: impl FnOnce(Vec<UserError>) -> EditError,
) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(wrap(errors))
    }
}
