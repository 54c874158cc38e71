//! Typed validation failures for leave request candidates.

use serde::Serialize;
use thiserror::Error;

use crate::leave::LeaveType;

/// A single reason a candidate request breaks policy.
///
/// The `Display` output is the user-facing message; callers branch on the
/// variant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// No active policy exists for the leave type.
    #[error("No active policy found for {leave_type} leave")]
    PolicyMissing {
        /// The requested leave type.
        leave_type: LeaveType,
    },

    /// The leave starts sooner than the policy's notice period allows.
    #[error("Minimum {required} days notice required for {leave_type} leave")]
    NoticeViolation {
        /// The requested leave type.
        leave_type: LeaveType,
        /// The policy's minimum notice, in days.
        required: u32,
    },

    /// The request spans more days than the policy allows at once.
    #[error("Maximum {max} consecutive days allowed for {leave_type} leave")]
    SpanViolation {
        /// The requested leave type.
        leave_type: LeaveType,
        /// The policy's consecutive-day cap.
        max: u32,
    },

    /// The request exceeds the employee's remaining balance.
    #[error("Insufficient leave balance. Available: {available} days")]
    BalanceViolation {
        /// Days remaining in the balance.
        available: u32,
    },
}

impl ValidationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PolicyMissing { .. } => "POLICY_MISSING",
            Self::NoticeViolation { .. } => "NOTICE_VIOLATION",
            Self::SpanViolation { .. } => "SPAN_VIOLATION",
            Self::BalanceViolation { .. } => "BALANCE_VIOLATION",
        }
    }
}
