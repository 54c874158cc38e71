//! Workflow error types for leave request lifecycle management.
//!
//! This module defines all error types that can occur during
//! workflow operations such as submission, approval and rejection.

use chrono::NaiveDate;
use leavedesk_shared::AppError;
use leavedesk_shared::types::LeaveRequestId;
use thiserror::Error;

use crate::leave::BalanceError;
use crate::validation::ValidationError;
use crate::workflow::types::{ActionKind, RequestStatus};

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The candidate broke one or more policy rules.
    #[error("Leave request validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Attempted an approve or reject on a request that is no longer pending.
    #[error("Cannot {action} a request in status {from}")]
    InvalidTransition {
        /// The current status.
        from: RequestStatus,
        /// The attempted action.
        action: ActionKind,
    },

    /// A pending request has no current step.
    #[error("Leave request {0} has no current approval step")]
    NoCurrentStep(LeaveRequestId),

    /// Leave request not found.
    #[error("Leave request {0} not found")]
    RequestNotFound(LeaveRequestId),

    /// `to_date` precedes `from_date`.
    #[error("Leave end date {to} is before start date {from}")]
    InvalidDateRange {
        /// First day of leave.
        from: NaiveDate,
        /// Last day of leave.
        to: NaiveDate,
    },

    /// A configured approver role is not recognized.
    #[error("Unknown approver role: {0}")]
    UnknownApproverRole(String),

    /// The configured approval chain has no steps.
    #[error("Approval chain must have at least one step")]
    EmptyApprovalChain,

    /// The balance could not be debited on final approval.
    #[error(transparent)]
    Balance(#[from] BalanceError),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(". ")
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidDateRange { .. } => 400,

            Self::InvalidTransition { .. } => 409,

            Self::RequestNotFound(_) => 404,

            Self::Balance(_) => 422,

            Self::NoCurrentStep(_) | Self::UnknownApproverRole(_) | Self::EmptyApprovalChain => {
                500
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NoCurrentStep(_) => "NO_CURRENT_STEP",
            Self::RequestNotFound(_) => "REQUEST_NOT_FOUND",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::UnknownApproverRole(_) => "UNKNOWN_APPROVER_ROLE",
            Self::EmptyApprovalChain => "EMPTY_APPROVAL_CHAIN",
            Self::Balance(_) => "BALANCE_DEBIT_FAILED",
        }
    }

    /// Typed validation errors, if this is a validation failure.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        let message = err.to_string();
        match err {
            WorkflowError::Validation(_) | WorkflowError::InvalidDateRange { .. } => {
                Self::Validation(message)
            }
            WorkflowError::InvalidTransition { .. } => Self::Conflict(message),
            WorkflowError::RequestNotFound(_) => Self::NotFound(message),
            WorkflowError::Balance(_) => Self::BusinessRule(message),
            WorkflowError::UnknownApproverRole(_) | WorkflowError::EmptyApprovalChain => {
                Self::Configuration(message)
            }
            WorkflowError::NoCurrentStep(_) => Self::Internal(message),
        }
    }
}
