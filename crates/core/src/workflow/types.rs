//! Workflow domain types for leave request approval.
//!
//! A `LeaveRequest` carries an ordered chain of `ApprovalStep`s. Its overall
//! status is always derived from the step statuses, never stored
//! independently of them.

use chrono::{DateTime, NaiveDate, Utc};
use leavedesk_shared::types::{ApprovalStepId, EmployeeId, LeaveRequestId};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::leave::{DateRange, LeaveType};
use crate::validation::LeaveCandidate;

/// Overall status of a leave request.
///
/// The valid transitions are:
/// - Pending → Pending (approve a non-final step)
/// - Pending → Approved (approve the final step)
/// - Pending → Rejected (reject any step)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting action on the current step.
    Pending,
    /// Every step approved (terminal).
    Approved,
    /// Some step rejected (terminal).
    Rejected,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if no further transitions are accepted.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Derives the request status from its approval steps.
    ///
    /// Rejected if any step is rejected, approved if every step is approved,
    /// pending otherwise.
    #[must_use]
    pub fn derive(steps: &[ApprovalStep]) -> Self {
        if steps.iter().any(|s| s.status == StepStatus::Rejected) {
            Self::Rejected
        } else if steps.iter().all(|s| s.status == StepStatus::Approved) {
            Self::Approved
        } else {
            Self::Pending
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Not yet acted on.
    Pending,
    /// Approved by the step's approver.
    Approved,
    /// Rejected by the step's approver.
    Rejected,
}

/// Role that owns an approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApproverRole {
    /// The employee's line manager.
    LineManager,
    /// Human resources.
    Hr,
    /// System administrator.
    Admin,
}

impl ApproverRole {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line_manager" => Some(Self::LineManager),
            "hr" => Some(Self::Hr),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LineManager => "line_manager",
            Self::Hr => "hr",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for ApproverRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One stage of a request's approval chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStep {
    /// Unique identifier for the step.
    pub id: ApprovalStepId,
    /// 1-based position in the chain.
    pub step_order: u32,
    /// Role expected to act on this step.
    pub approver_role: ApproverRole,
    /// Step status.
    pub status: StepStatus,
    /// Whether this step is the one awaiting action.
    pub is_current: bool,
    /// Who acted on the step.
    pub approver_id: Option<EmployeeId>,
    /// Approver's comments.
    pub comments: Option<String>,
    /// When the step was acted on.
    pub approved_at: Option<DateTime<Utc>>,
}

impl ApprovalStep {
    /// Creates a pending step.
    #[must_use]
    pub fn pending(step_order: u32, approver_role: ApproverRole, is_current: bool) -> Self {
        Self {
            id: ApprovalStepId::new(),
            step_order,
            approver_role,
            status: StepStatus::Pending,
            is_current,
            approver_id: None,
            comments: None,
            approved_at: None,
        }
    }
}

/// What an employee submits when asking for leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Employee asking for leave.
    pub employee_id: EmployeeId,
    /// Requested leave type.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub to_date: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl LeaveApplication {
    /// Inclusive date range, or `None` if `to_date` precedes `from_date`.
    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        DateRange::new(self.from_date, self.to_date)
    }

    /// Validation candidate for this application.
    #[must_use]
    pub fn candidate(&self, range: DateRange) -> LeaveCandidate {
        LeaveCandidate::new(self.employee_id, self.leave_type, range)
    }
}

/// A leave request moving through its approval chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: LeaveRequestId,
    /// Employee asking for leave.
    pub employee_id: EmployeeId,
    /// Requested leave type.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub to_date: NaiveDate,
    /// Free-text reason.
    pub reason: String,
    /// Inclusive day span.
    pub days_count: u32,
    /// Approval chain ordered by `step_order`.
    pub approvals: Vec<ApprovalStep>,
    /// Overall status, derived from `approvals`.
    pub status: RequestStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the request last changed.
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// The step awaiting action, if the request is still pending.
    #[must_use]
    pub fn current_step(&self) -> Option<&ApprovalStep> {
        self.approvals.iter().find(|s| s.is_current)
    }

    /// Applies a transition computed by `WorkflowService`.
    ///
    /// The action must have been computed against this request.
    pub fn apply(&mut self, action: &WorkflowAction) {
        let (step_order, acted_by, acted_at, comments, step_status) = match action {
            WorkflowAction::Approve {
                step_order,
                approved_by,
                approved_at,
                comments,
                ..
            } => (*step_order, *approved_by, *approved_at, comments, StepStatus::Approved),
            WorkflowAction::Reject {
                step_order,
                rejected_by,
                rejected_at,
                comments,
                ..
            } => (*step_order, *rejected_by, *rejected_at, comments, StepStatus::Rejected),
        };
        let next_step = action.next_step();

        for step in &mut self.approvals {
            if step.step_order == step_order {
                step.status = step_status;
                step.approver_id = Some(acted_by);
                step.comments.clone_from(comments);
                step.approved_at = Some(acted_at);
                step.is_current = false;
            } else if Some(step.step_order) == next_step {
                step.is_current = true;
            }
        }

        self.status = RequestStatus::derive(&self.approvals);
        self.updated_at = acted_at;
    }
}

/// Workflow action representing a state transition with audit data.
///
/// Actions are computed from a request without mutating it, then applied in
/// one step with `LeaveRequest::apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowAction {
    /// Approve the current step.
    Approve {
        /// The step being approved.
        step_order: u32,
        /// The step that becomes current, if any.
        next_step: Option<u32>,
        /// The request status after approval.
        new_status: RequestStatus,
        /// Who approved.
        approved_by: EmployeeId,
        /// When the approval happened.
        approved_at: DateTime<Utc>,
        /// Optional approver comments.
        comments: Option<String>,
    },
    /// Reject the current step, ending the workflow.
    Reject {
        /// The step being rejected.
        step_order: u32,
        /// Who rejected.
        rejected_by: EmployeeId,
        /// When the rejection happened.
        rejected_at: DateTime<Utc>,
        /// Optional approver comments.
        comments: Option<String>,
    },
}

impl WorkflowAction {
    /// Returns the request status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> RequestStatus {
        match self {
            Self::Approve { new_status, .. } => *new_status,
            Self::Reject { .. } => RequestStatus::Rejected,
        }
    }

    /// Returns the step that becomes current after this action.
    #[must_use]
    pub fn next_step(&self) -> Option<u32> {
        match self {
            Self::Approve { next_step, .. } => *next_step,
            Self::Reject { .. } => None,
        }
    }

    /// Returns true if the action completes the whole approval chain.
    #[must_use]
    pub fn completes_chain(&self) -> bool {
        self.new_status() == RequestStatus::Approved
    }
}

/// Kind of transition attempted on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Approve the current step.
    Approve,
    /// Reject the current step.
    Reject,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}
