//! User-facing notifications emitted after workflow transitions.
//!
//! Notifications are delivered synchronously to a `NotificationSink` passed
//! explicitly to each workflow operation. They are informational only; a
//! sink cannot veto or roll back a transition.

use leavedesk_shared::types::LeaveRequestId;
use serde::{Deserialize, Serialize};

use crate::leave::LeaveType;
use crate::validation::ValidationError;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// The action went through.
    Success,
    /// The action was refused or the request was rejected.
    Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Full message.
    pub message: String,
    /// Request the notification is about, when one exists.
    pub request_id: Option<LeaveRequestId>,
}

impl Notification {
    /// A request was submitted for approval.
    #[must_use]
    pub fn submitted(request_id: LeaveRequestId, leave_type: LeaveType, days: u32) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Leave Request Submitted".to_string(),
            message: format!(
                "Your {leave_type} leave request for {days} days has been submitted for approval."
            ),
            request_id: Some(request_id),
        }
    }

    /// Submission was refused by validation; no request exists.
    #[must_use]
    pub fn validation_failed(errors: &[ValidationError]) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(". ");
        Self {
            kind: NotificationKind::Error,
            title: "Leave Request Validation Failed".to_string(),
            message,
            request_id: None,
        }
    }

    /// A step was approved; `fully_approved` tells whether the chain is done.
    #[must_use]
    pub fn approved(
        request_id: LeaveRequestId,
        employee_name: &str,
        leave_type: LeaveType,
        fully_approved: bool,
    ) -> Self {
        let (title, message) = if fully_approved {
            (
                "Leave Request Fully Approved",
                format!("{employee_name}'s {leave_type} leave request has been fully approved."),
            )
        } else {
            (
                "Leave Request Approved",
                format!(
                    "{employee_name}'s {leave_type} leave request has been approved and forwarded to the next approver."
                ),
            )
        };
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            message,
            request_id: Some(request_id),
        }
    }

    /// A request was rejected.
    #[must_use]
    pub fn rejected(request_id: LeaveRequestId, employee_name: &str, leave_type: LeaveType) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Leave Request Rejected".to_string(),
            message: format!("{employee_name}'s {leave_type} leave request has been rejected."),
            request_id: Some(request_id),
        }
    }
}

/// Observer receiving notifications after workflow transitions.
pub trait NotificationSink {
    /// Deliver one notification.
    fn publish(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn publish(&mut self, notification: Notification) {
        self.push(notification);
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn publish(&mut self, notification: Notification) {
        (**self).publish(notification);
    }
}

/// Sink that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn publish(&mut self, _notification: Notification) {}
}
