//! Results of orchestrated operations.
//!
//! Phase one (the platform edit) is durable and reported through `Result`;
//! phase two (the marketing notification) is advisory and captured here as
//! data.

use common::Gid;
use domain::ActionKind;
use serde::Serialize;

use crate::events::MarketingEvent;
use crate::services::MarketingSink;

/// Advisory result of a marketing notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOutcome {
    pub status: Option<u16>,
    pub event_id: Option<String>,
    /// Failure text; `None` when the event was accepted.
    pub error: Option<String>,
}

impl NotificationOutcome {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Suffix appended to the client-facing message.
    pub fn suffix(&self) -> &'static str {
        if self.is_failed() {
            " (Klaviyo event failed)"
        } else {
            " (Klaviyo event sent)"
        }
    }
}

/// Sends `event` once, never failing the caller.
pub async fn deliver<M>(sink: &M, event: &MarketingEvent) -> NotificationOutcome
where
    M: MarketingSink + ?Sized,
{
    let metric = event.metric.name();
    match sink.send(event).await {
        Ok(receipt) => {
            metrics::counter!("marketing_events_sent_total", "metric" => metric).increment(1);
            tracing::info!(
                metric,
                status = receipt.status,
                event_id = receipt.event_id.as_deref(),
                "marketing event sent"
            );
            NotificationOutcome {
                status: Some(receipt.status),
                event_id: receipt.event_id,
                error: None,
            }
        }
        Err(err) => {
            metrics::counter!("marketing_events_failed_total", "metric" => metric).increment(1);
            tracing::error!(metric, error = %err, "failed to send marketing event");
            NotificationOutcome {
                status: None,
                event_id: None,
                error: Some(err.to_string()),
            }
        }
    }
}

/// A committed order edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyOutcome {
    pub action: ActionKind,
    pub calculated_order_id: Gid,
    /// The calculated line item acted on; `None` for add.
    pub target_line_item_id: Option<Gid>,
    /// Display name of the committed order, if the platform returned one.
    pub order_name: Option<String>,
    pub notification: NotificationOutcome,
}

impl ModifyOutcome {
    /// e.g. `Item removed (Klaviyo event sent)`.
    pub fn message(&self) -> String {
        format!(
            "{}{}",
            self.action.success_message(),
            self.notification.suffix()
        )
    }
}

/// A placed, tagged and paid order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementOutcome {
    pub order_id: Gid,
    pub name: String,
    pub financial_status: String,
    pub notification: NotificationOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryMarketingSink;

    fn outcome(notification: NotificationOutcome) -> ModifyOutcome {
        ModifyOutcome {
            action: ActionKind::Discount,
            calculated_order_id: Gid::new("gid://shopify/CalculatedOrder/1"),
            target_line_item_id: None,
            order_name: Some("#1001".to_string()),
            notification,
        }
    }

    #[test]
    fn message_reflects_notification() {
        let sent = outcome(NotificationOutcome {
            status: Some(202),
            ..Default::default()
        });
        assert_eq!(sent.message(), "Discount applied (Klaviyo event sent)");

        let failed = outcome(NotificationOutcome {
            error: Some("Klaviyo error 500: {}".to_string()),
            ..Default::default()
        });
        assert_eq!(failed.message(), "Discount applied (Klaviyo event failed)");
    }

    #[tokio::test]
    async fn deliver_captures_failures() {
        let sink = InMemoryMarketingSink::new();
        let event = MarketingEvent::order_created(
            &Gid::new("gid://shopify/Order/1"),
            "alice",
            "buyer@example.com",
        );

        let ok = deliver(&sink, &event).await;
        assert_eq!(ok.status, Some(202));
        assert!(!ok.is_failed());

        sink.set_fail_on_send(true).await;
        let failed = deliver(&sink, &event).await;
        assert!(failed.is_failed());
        assert_eq!(failed.status, None);
        assert_eq!(
            failed.error.as_deref(),
            Some("Klaviyo error 503: marketing sink unavailable")
        );
    }
}
