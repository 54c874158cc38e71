//! Workflow service for leave request state transitions.
//!
//! This module implements the core state machine logic for
//! moving leave requests through their sequential approval chain.

use chrono::{DateTime, Utc};
use leavedesk_shared::types::{EmployeeId, LeaveRequestId};

use crate::leave::DateRange;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{
    ActionKind, ApprovalStep, ApproverRole, LeaveApplication, LeaveRequest, RequestStatus,
    StepStatus, WorkflowAction,
};

/// Stateless service for managing leave request workflow transitions.
///
/// Transitions are computed as `WorkflowAction` values without touching
/// the request; callers apply them with `LeaveRequest::apply`.
pub struct WorkflowService;

impl WorkflowService {
    /// The default two-step chain: line manager, then HR.
    #[must_use]
    pub fn default_chain() -> Vec<ApproverRole> {
        vec![ApproverRole::LineManager, ApproverRole::Hr]
    }

    /// Parse a configured chain of role names.
    ///
    /// # Returns
    /// * `Err(WorkflowError::EmptyApprovalChain)` if `names` is empty
    /// * `Err(WorkflowError::UnknownApproverRole)` for an unrecognized name
    pub fn parse_chain<S: AsRef<str>>(names: &[S]) -> Result<Vec<ApproverRole>, WorkflowError> {
        if names.is_empty() {
            return Err(WorkflowError::EmptyApprovalChain);
        }
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                ApproverRole::parse(name)
                    .ok_or_else(|| WorkflowError::UnknownApproverRole(name.to_string()))
            })
            .collect()
    }

    /// Build pending approval steps for `chain`, with the first one current.
    pub fn build_steps(chain: &[ApproverRole]) -> Result<Vec<ApprovalStep>, WorkflowError> {
        if chain.is_empty() {
            return Err(WorkflowError::EmptyApprovalChain);
        }
        Ok((1u32..)
            .zip(chain)
            .map(|(order, role)| ApprovalStep::pending(order, *role, order == 1))
            .collect())
    }

    /// Open a new pending request for an already-validated application.
    ///
    /// # Arguments
    /// * `application` - What the employee submitted
    /// * `range` - The application's validated date range
    /// * `chain` - Approver roles in visiting order
    /// * `now` - Creation timestamp
    pub fn open(
        application: LeaveApplication,
        range: DateRange,
        chain: &[ApproverRole],
        now: DateTime<Utc>,
    ) -> Result<LeaveRequest, WorkflowError> {
        let approvals = Self::build_steps(chain)?;
        Ok(LeaveRequest {
            id: LeaveRequestId::new(),
            employee_id: application.employee_id,
            leave_type: application.leave_type,
            from_date: range.from,
            to_date: range.to,
            reason: application.reason,
            days_count: range.days_count(),
            status: RequestStatus::derive(&approvals),
            approvals,
            created_at: now,
            updated_at: now,
        })
    }

    /// Approve the current step of a pending request.
    ///
    /// The step after the current one (by `step_order + 1`) becomes current.
    /// The request becomes approved once every step is approved.
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Approve)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if the request is terminal
    /// * `Err(WorkflowError::NoCurrentStep)` if no step is awaiting action
    pub fn approve(
        request: &LeaveRequest,
        approved_by: EmployeeId,
        comments: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<WorkflowAction, WorkflowError> {
        let current = Self::pending_current(request, ActionKind::Approve)?;
        let step_order = current.step_order;

        let next_step = request
            .approvals
            .iter()
            .find(|s| s.step_order == step_order + 1)
            .map(|s| s.step_order);

        let others_approved = request
            .approvals
            .iter()
            .filter(|s| s.step_order != step_order)
            .all(|s| s.status == StepStatus::Approved);
        let new_status = if others_approved {
            RequestStatus::Approved
        } else {
            RequestStatus::Pending
        };

        Ok(WorkflowAction::Approve {
            step_order,
            next_step,
            new_status,
            approved_by,
            approved_at: now,
            comments,
        })
    }

    /// Reject the current step of a pending request.
    ///
    /// Rejection ends the workflow: no later step becomes current and
    /// later steps stay pending.
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Reject)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if the request is terminal
    /// * `Err(WorkflowError::NoCurrentStep)` if no step is awaiting action
    pub fn reject(
        request: &LeaveRequest,
        rejected_by: EmployeeId,
        comments: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<WorkflowAction, WorkflowError> {
        let current = Self::pending_current(request, ActionKind::Reject)?;

        Ok(WorkflowAction::Reject {
            step_order: current.step_order,
            rejected_by,
            rejected_at: now,
            comments,
        })
    }

    fn pending_current(
        request: &LeaveRequest,
        action: ActionKind,
    ) -> Result<&ApprovalStep, WorkflowError> {
        if request.status.is_terminal() {
            return Err(WorkflowError::InvalidTransition {
                from: request.status,
                action,
            });
        }
        request
            .current_step()
            .filter(|s| s.status == StepStatus::Pending)
            .ok_or(WorkflowError::NoCurrentStep(request.id))
    }
}
