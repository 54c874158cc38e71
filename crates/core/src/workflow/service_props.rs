//! Property-based tests for WorkflowService.
//!
//! These tests drive random approve/reject sequences over chains of
//! varying length and check the step and status invariants after each one.

use chrono::{NaiveDate, Utc};
use leavedesk_shared::types::EmployeeId;
use proptest::prelude::*;
use uuid::Uuid;

use crate::leave::LeaveType;
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{
    ApproverRole, LeaveApplication, LeaveRequest, RequestStatus, StepStatus,
};

/// Strategy for generating approver roles.
fn arb_role() -> impl Strategy<Value = ApproverRole> {
    prop_oneof![
        Just(ApproverRole::LineManager),
        Just(ApproverRole::Hr),
        Just(ApproverRole::Admin),
    ]
}

/// Strategy for generating non-empty approval chains.
fn arb_chain() -> impl Strategy<Value = Vec<ApproverRole>> {
    prop::collection::vec(arb_role(), 1..6)
}

/// Strategy for generating random UUIDs.
fn arb_employee_id() -> impl Strategy<Value = EmployeeId> {
    any::<u128>().prop_map(|n| EmployeeId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating optional approver comments.
fn arb_comments() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), "[a-zA-Z0-9 ]{1,60}".prop_map(Some)]
}

fn open(chain: &[ApproverRole]) -> LeaveRequest {
    let application = LeaveApplication {
        employee_id: EmployeeId::new(),
        leave_type: LeaveType::Paid,
        from_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        to_date: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
        reason: String::new(),
    };
    let range = application.date_range().unwrap();
    WorkflowService::open(application, range, chain, Utc::now()).unwrap()
}

/// Checks the structural invariants every request must satisfy.
fn check_invariants(request: &LeaveRequest) -> Result<(), TestCaseError> {
    let current: Vec<_> = request.approvals.iter().filter(|s| s.is_current).collect();

    prop_assert_eq!(request.status, RequestStatus::derive(&request.approvals));

    if request.status == RequestStatus::Pending {
        prop_assert_eq!(current.len(), 1);
        let lowest_pending = request
            .approvals
            .iter()
            .filter(|s| s.status == StepStatus::Pending)
            .map(|s| s.step_order)
            .min();
        prop_assert_eq!(Some(current[0].step_order), lowest_pending);
    } else {
        prop_assert!(current.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Full approval
    // =========================================================================

    /// Approving every step yields Approved with no current step
    #[test]
    fn prop_approving_every_step_approves(
        chain in arb_chain(),
        approver in arb_employee_id(),
        comments in arb_comments(),
    ) {
        let mut request = open(&chain);
        check_invariants(&request)?;

        for expected_order in 1..=chain.len() {
            let action = WorkflowService::approve(&request, approver, comments.clone(), Utc::now());
            prop_assert!(action.is_ok());
            let action = action.unwrap();
            request.apply(&action);
            check_invariants(&request)?;

            let step = &request.approvals[expected_order - 1];
            prop_assert_eq!(step.status, StepStatus::Approved);
            prop_assert_eq!(step.approver_id, Some(approver));
            prop_assert_eq!(&step.comments, &comments);
        }

        prop_assert_eq!(request.status, RequestStatus::Approved);
        prop_assert!(request.current_step().is_none());
    }

    // =========================================================================
    // Rejection at any step
    // =========================================================================

    /// Rejecting at step k yields Rejected immediately, later steps untouched
    #[test]
    fn prop_rejection_terminates(
        chain in arb_chain(),
        reject_at in any::<prop::sample::Index>(),
        approver in arb_employee_id(),
    ) {
        let mut request = open(&chain);
        let reject_at = reject_at.index(chain.len());

        for _ in 0..reject_at {
            let action = WorkflowService::approve(&request, approver, None, Utc::now()).unwrap();
            request.apply(&action);
        }
        let action = WorkflowService::reject(&request, approver, None, Utc::now()).unwrap();
        request.apply(&action);
        check_invariants(&request)?;

        prop_assert_eq!(request.status, RequestStatus::Rejected);
        prop_assert_eq!(request.approvals[reject_at].status, StepStatus::Rejected);
        for later in &request.approvals[reject_at + 1..] {
            prop_assert_eq!(later.status, StepStatus::Pending);
            prop_assert!(later.approver_id.is_none());
        }
    }

    // =========================================================================
    // Terminal states accept no transitions
    // =========================================================================

    /// Approve or reject after a terminal outcome fails and leaves the request unchanged
    #[test]
    fn prop_terminal_rejects_transitions(
        chain in arb_chain(),
        end_with_rejection in any::<bool>(),
        approver in arb_employee_id(),
    ) {
        let mut request = open(&chain);
        if end_with_rejection {
            let action = WorkflowService::reject(&request, approver, None, Utc::now()).unwrap();
            request.apply(&action);
        } else {
            for _ in 0..chain.len() {
                let action = WorkflowService::approve(&request, approver, None, Utc::now()).unwrap();
                request.apply(&action);
            }
        }
        let snapshot = request.clone();

        let approve = WorkflowService::approve(&request, approver, None, Utc::now());
        let reject = WorkflowService::reject(&request, approver, None, Utc::now());

        let approve_is_invalid = matches!(approve, Err(WorkflowError::InvalidTransition { .. }));
        let reject_is_invalid = matches!(reject, Err(WorkflowError::InvalidTransition { .. }));
        prop_assert!(approve_is_invalid);
        prop_assert!(reject_is_invalid);
        prop_assert_eq!(request, snapshot);
    }
}

// =========================================================================
// Unit tests for edge cases
// =========================================================================

#[cfg(test)]
mod edge_case_tests {
    use super::*;

    #[test]
    fn test_computing_action_does_not_mutate() {
        let request = open(&WorkflowService::default_chain());
        let snapshot = request.clone();

        let _ = WorkflowService::approve(&request, EmployeeId::new(), None, Utc::now()).unwrap();
        let _ = WorkflowService::reject(&request, EmployeeId::new(), None, Utc::now()).unwrap();

        assert_eq!(request, snapshot);
    }

    #[test]
    fn test_apply_stamps_updated_at() {
        let mut request = open(&WorkflowService::default_chain());
        let later = request.updated_at + chrono::Duration::minutes(5);

        let action = WorkflowService::approve(&request, EmployeeId::new(), None, later).unwrap();
        request.apply(&action);

        assert_eq!(request.updated_at, later);
        assert_eq!(request.approvals[0].approved_at, Some(later));
        assert!(request.created_at < request.updated_at);
    }

    #[test]
    fn test_repeated_roles_are_distinct_steps() {
        let mut request = open(&[ApproverRole::Hr, ApproverRole::Hr]);
        let approver = EmployeeId::new();

        let action = WorkflowService::approve(&request, approver, None, Utc::now()).unwrap();
        request.apply(&action);

        assert_eq!(request.approvals[0].status, StepStatus::Approved);
        assert_eq!(request.approvals[1].status, StepStatus::Pending);
        assert!(request.approvals[1].is_current);
    }
}
