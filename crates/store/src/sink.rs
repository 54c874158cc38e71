//! Notification sink that writes to `tracing`.

use leavedesk_core::notification::{Notification, NotificationKind, NotificationSink};
use tracing::{info, warn};

/// Logs every notification as a structured event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn publish(&mut self, notification: Notification) {
        let request_id = notification.request_id.map(|id| id.to_string());
        match notification.kind {
            NotificationKind::Success => info!(
                title = %notification.title,
                request_id = ?request_id,
                "{}",
                notification.message
            ),
            NotificationKind::Error => warn!(
                title = %notification.title,
                request_id = ?request_id,
                "{}",
                notification.message
            ),
        }
    }
}
