//! The `LeaveDesk` service: owner of every store and driver of the workflow.
//!
//! `LeaveDesk` is constructed once at startup and passed to whoever needs
//! it. Every mutating method takes `&mut self`, so there is exactly one
//! mutator at a time. Each transition is computed against a snapshot of the
//! request and committed only after every check has passed, so a failed
//! operation leaves all stores untouched.

use chrono::Datelike;
use leavedesk_core::notification::{Notification, NotificationSink};
use leavedesk_core::validation::{LeaveCandidate, LeaveValidator, ValidationReport};
use leavedesk_core::workflow::{
    ApproverRole, LeaveApplication, LeaveRequest, WorkflowError, WorkflowService,
};
use leavedesk_shared::types::{EmployeeId, LeaveRequestId};
use leavedesk_shared::{AppConfig, AppResult, LeaveConfig};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::repositories::{
    BalanceRepository, EmployeeDirectory, PolicyRepository, RequestRepository,
};

/// Workflow behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveDeskOptions {
    /// Approver roles a new request visits, in order.
    pub approval_chain: Vec<ApproverRole>,
    /// Debit the employee's balance when a request is fully approved.
    pub debit_balance_on_approval: bool,
}

impl Default for LeaveDeskOptions {
    fn default() -> Self {
        Self {
            approval_chain: WorkflowService::default_chain(),
            debit_balance_on_approval: true,
        }
    }
}

impl LeaveDeskOptions {
    /// Builds options from the `[leave]` configuration section.
    pub fn from_config(config: &LeaveConfig) -> Result<Self, WorkflowError> {
        Ok(Self {
            approval_chain: WorkflowService::parse_chain(&config.approval_chain)?,
            debit_balance_on_approval: config.debit_balance_on_approval,
        })
    }
}

/// The leave management service.
pub struct LeaveDesk {
    policies: PolicyRepository,
    balances: BalanceRepository,
    requests: RequestRepository,
    employees: EmployeeDirectory,
    options: LeaveDeskOptions,
    clock: Box<dyn Clock>,
}

impl LeaveDesk {
    /// Creates an empty desk using the system clock.
    #[must_use]
    pub fn new(options: LeaveDeskOptions) -> Self {
        Self {
            policies: PolicyRepository::new(),
            balances: BalanceRepository::new(),
            requests: RequestRepository::new(),
            employees: EmployeeDirectory::new(),
            options,
            clock: Box::new(SystemClock),
        }
    }

    /// Creates an empty desk from application configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let options = LeaveDeskOptions::from_config(&config.leave)?;
        info!(
            chain = ?options.approval_chain,
            debit_balance_on_approval = options.debit_balance_on_approval,
            "Leave desk configured"
        );
        Ok(Self::new(options))
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Workflow options in effect.
    #[must_use]
    pub fn options(&self) -> &LeaveDeskOptions {
        &self.options
    }

    /// The clock in use.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Policy store.
    #[must_use]
    pub fn policies(&self) -> &PolicyRepository {
        &self.policies
    }

    /// Policy store, for administration.
    pub fn policies_mut(&mut self) -> &mut PolicyRepository {
        &mut self.policies
    }

    /// Balance store.
    #[must_use]
    pub fn balances(&self) -> &BalanceRepository {
        &self.balances
    }

    /// Balance store, for administration.
    pub fn balances_mut(&mut self) -> &mut BalanceRepository {
        &mut self.balances
    }

    /// Employee directory.
    #[must_use]
    pub fn employees(&self) -> &EmployeeDirectory {
        &self.employees
    }

    /// Employee directory, for administration.
    pub fn employees_mut(&mut self) -> &mut EmployeeDirectory {
        &mut self.employees
    }

    /// Request store. Read-only: requests change only through the workflow.
    #[must_use]
    pub fn requests(&self) -> &RequestRepository {
        &self.requests
    }

    /// Looks up a request by id.
    #[must_use]
    pub fn request(&self, id: LeaveRequestId) -> Option<&LeaveRequest> {
        self.requests.get(id)
    }

    /// Pre-flight validation of a candidate against current policies and balances.
    ///
    /// Reads state only.
    #[must_use]
    pub fn validate(&self, candidate: &LeaveCandidate) -> ValidationReport {
        let report = LeaveValidator::validate(
            candidate,
            self.policies.all(),
            self.balances.all(),
            self.clock.today(),
        );
        debug!(
            employee_id = %candidate.employee_id,
            leave_type = %candidate.leave_type,
            days = candidate.days_count,
            valid = report.is_valid(),
            "Validated leave candidate"
        );
        report
    }

    /// Submit a leave application.
    ///
    /// The application is validated first. If any rule is broken, no
    /// request is created, an error notification is published and every
    /// broken rule is returned. Otherwise a pending request with the
    /// configured approval chain is stored and a success notification is
    /// published.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `to_date` precedes `from_date`
    /// - Validation fails
    pub fn submit(
        &mut self,
        application: LeaveApplication,
        sink: &mut dyn NotificationSink,
    ) -> Result<LeaveRequest, WorkflowError> {
        let Some(range) = application.date_range() else {
            warn!(
                employee_id = %application.employee_id,
                from = %application.from_date,
                to = %application.to_date,
                "Leave application has reversed dates"
            );
            return Err(WorkflowError::InvalidDateRange {
                from: application.from_date,
                to: application.to_date,
            });
        };

        let candidate = application.candidate(range);
        if let Err(errors) = self.validate(&candidate).into_result() {
            warn!(
                employee_id = %candidate.employee_id,
                leave_type = %candidate.leave_type,
                errors = ?errors.iter().map(|e| e.error_code()).collect::<Vec<_>>(),
                "Leave application failed validation"
            );
            sink.publish(Notification::validation_failed(&errors));
            return Err(WorkflowError::Validation(errors));
        }

        let request = WorkflowService::open(
            application,
            range,
            &self.options.approval_chain,
            self.clock.now(),
        )?;
        self.requests.insert(request.clone());

        info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            leave_type = %request.leave_type,
            days = request.days_count,
            "Leave request submitted"
        );
        sink.publish(Notification::submitted(
            request.id,
            request.leave_type,
            request.days_count,
        ));
        Ok(request)
    }

    /// Approve the current step of a pending request.
    ///
    /// When this completes the chain and balance debiting is enabled, the
    /// employee's balance for the submission year is debited together with
    /// the approval; if the debit cannot be covered, nothing changes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is not found
    /// - The request is not pending
    /// - The final debit exceeds the remaining balance
    pub fn approve(
        &mut self,
        id: LeaveRequestId,
        approver_id: EmployeeId,
        comments: Option<String>,
        sink: &mut dyn NotificationSink,
    ) -> Result<LeaveRequest, WorkflowError> {
        let mut request = self.snapshot(id)?;
        let action = WorkflowService::approve(&request, approver_id, comments, self.clock.now())
            .inspect_err(|e| warn!(request_id = %id, error = %e, "Approval refused"))?;
        request.apply(&action);

        let debit = (action.completes_chain() && self.options.debit_balance_on_approval).then(
            || {
                (
                    request.employee_id,
                    request.leave_type,
                    request.created_at.year(),
                    request.days_count,
                )
            },
        );
        if let Some((employee_id, leave_type, year, days)) = debit {
            self.balances
                .check_debit(employee_id, leave_type, year, days)
                .inspect_err(|e| warn!(request_id = %id, error = %e, "Final approval refused"))?;
            self.balances.debit(employee_id, leave_type, year, days)?;
        }

        self.requests.replace(request.clone());

        info!(
            request_id = %id,
            approver_id = %approver_id,
            status = %request.status,
            "Leave request step approved"
        );
        sink.publish(Notification::approved(
            request.id,
            self.employees.name_of(request.employee_id),
            request.leave_type,
            action.completes_chain(),
        ));
        Ok(request)
    }

    /// Reject the current step of a pending request, ending its workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is not found
    /// - The request is not pending
    pub fn reject(
        &mut self,
        id: LeaveRequestId,
        approver_id: EmployeeId,
        comments: Option<String>,
        sink: &mut dyn NotificationSink,
    ) -> Result<LeaveRequest, WorkflowError> {
        let mut request = self.snapshot(id)?;
        let action = WorkflowService::reject(&request, approver_id, comments, self.clock.now())
            .inspect_err(|e| warn!(request_id = %id, error = %e, "Rejection refused"))?;
        request.apply(&action);

        self.requests.replace(request.clone());

        info!(
            request_id = %id,
            approver_id = %approver_id,
            "Leave request rejected"
        );
        sink.publish(Notification::rejected(
            request.id,
            self.employees.name_of(request.employee_id),
            request.leave_type,
        ));
        Ok(request)
    }

    /// Open next-year balances from `from_year` under the active policies.
    ///
    /// Returns the number of balance rows written.
    pub fn roll_over(&mut self, from_year: i32) -> usize {
        self.balances.roll_over(from_year, self.policies.all())
    }

    fn snapshot(&self, id: LeaveRequestId) -> Result<LeaveRequest, WorkflowError> {
        self.requests.get(id).cloned().ok_or_else(|| {
            warn!(request_id = %id, "Leave request not found");
            WorkflowError::RequestNotFound(id)
        })
    }
}

impl Default for LeaveDesk {
    fn default() -> Self {
        Self::new(LeaveDeskOptions::default())
    }
}
