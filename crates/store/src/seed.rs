//! Demo data: a small organisation with the standard leave policies.

use chrono::{Datelike, Duration};
use leavedesk_core::leave::{Employee, LeaveBalance, LeavePolicy, LeaveType};
use leavedesk_core::notification::NullSink;
use leavedesk_core::workflow::{LeaveApplication, LeaveRequest, WorkflowError};
use leavedesk_shared::types::EmployeeId;
use tracing::info;

use crate::desk::LeaveDesk;
use crate::repositories::RepositoryError;

/// Ids of the seeded employees.
#[derive(Debug, Clone, Copy)]
pub struct SeededEmployees {
    /// Admin User (EMP001).
    pub admin: EmployeeId,
    /// Sarah Johnson (EMP002), HR.
    pub hr: EmployeeId,
    /// Mike Chen (EMP003), line manager.
    pub manager: EmployeeId,
    /// Emily Davis (EMP004), reports to Mike Chen.
    pub employee: EmployeeId,
}

/// The three standard policies.
#[must_use]
pub fn standard_policies() -> Vec<LeavePolicy> {
    vec![
        LeavePolicy::new(LeaveType::Casual, 12, 2, 5).with_carry_forward(Some(5)),
        LeavePolicy::new(LeaveType::Sick, 10, 0, 10).with_medical_certificate(),
        LeavePolicy::new(LeaveType::Paid, 20, 7, 15).with_carry_forward(Some(10)),
    ]
}

/// Seeds employees, policies and the current-year balances of Emily Davis.
///
/// # Errors
///
/// Returns `RepositoryError::ActivePolicyExists` if the desk already has
/// an active policy for one of the standard leave types.
pub fn seed_demo(desk: &mut LeaveDesk) -> Result<SeededEmployees, RepositoryError> {
    for policy in standard_policies() {
        desk.policies_mut().add(policy)?;
    }

    let employees = desk.employees_mut();
    let admin = employees.add(Employee::new("Admin User", "EMP001"));
    let hr = employees.add(Employee::new("Sarah Johnson", "EMP002"));
    let manager = employees.add(Employee::new("Mike Chen", "EMP003"));
    let employee = employees.add(Employee::new("Emily Davis", "EMP004").reporting_to(manager));

    let year = desk.clock().today().year();
    let balances = desk.balances_mut();
    balances.upsert(LeaveBalance::new(employee, LeaveType::Casual, year, 12, 2));
    balances.upsert(LeaveBalance::new(employee, LeaveType::Sick, year, 10, 1));
    balances.upsert(LeaveBalance::new(employee, LeaveType::Paid, year, 20, 5));

    info!(year, employees = 4, policies = 3, "Seeded demo data");
    Ok(SeededEmployees {
        admin,
        hr,
        manager,
        employee,
    })
}

/// Submits Emily Davis's pending casual request, three days starting two
/// days from today, through the normal workflow.
///
/// # Errors
///
/// Returns the submission error if the request fails validation.
pub fn seed_pending_request(
    desk: &mut LeaveDesk,
    employees: &SeededEmployees,
) -> Result<LeaveRequest, WorkflowError> {
    let from_date = desk.clock().today() + Duration::days(2);
    let application = LeaveApplication {
        employee_id: employees.employee,
        leave_type: LeaveType::Casual,
        from_date,
        to_date: from_date + Duration::days(2),
        reason: "Family vacation".to_string(),
    };
    let request = desk.submit(application, &mut NullSink)?;
    info!(request_id = %request.id, "Seeded pending leave request");
    Ok(request)
}
