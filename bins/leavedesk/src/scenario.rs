//! JSON scenarios replayed against a seeded desk.
//!
//! Employees are referenced by employee code and requests by their
//! position in submission order. Workflow refusals are logged and the
//! scenario continues; malformed references abort it.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use leavedesk_core::leave::{DateRange, LeaveBalance, LeaveType};
use leavedesk_core::notification::{Notification, NotificationSink};
use leavedesk_core::validation::LeaveCandidate;
use leavedesk_core::workflow::{LeaveApplication, LeaveRequest};
use leavedesk_shared::types::{EmployeeId, LeaveRequestId};
use leavedesk_store::{LeaveDesk, TracingSink};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A scripted sequence of workflow operations.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Pins the desk clock to this date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Steps, run in order.
    pub steps: Vec<Step>,
}

/// One scenario step.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Submit a leave application.
    Submit {
        /// Applicant's employee code.
        employee: String,
        /// Leave type.
        leave_type: LeaveType,
        /// First day of leave.
        from_date: NaiveDate,
        /// Last day of leave.
        to_date: NaiveDate,
        /// Free-text reason.
        #[serde(default)]
        reason: String,
    },
    /// Approve the current step of a request.
    Approve {
        /// Position of the request in submission order.
        request: usize,
        /// Approver's employee code.
        approver: String,
        /// Optional remark.
        #[serde(default)]
        comments: Option<String>,
    },
    /// Reject the current step of a request.
    Reject {
        /// Position of the request in submission order.
        request: usize,
        /// Approver's employee code.
        approver: String,
        /// Optional remark.
        #[serde(default)]
        comments: Option<String>,
    },
    /// Dry-run validation without submitting.
    Validate {
        /// Applicant's employee code.
        employee: String,
        /// Leave type.
        leave_type: LeaveType,
        /// First day of leave.
        from_date: NaiveDate,
        /// Last day of leave.
        to_date: NaiveDate,
    },
    /// Open next-year balances.
    RollOver {
        /// Closing year.
        from_year: i32,
    },
}

/// Final state printed after a run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Every stored request.
    pub requests: &'a [LeaveRequest],
    /// Every balance row.
    pub balances: &'a [LeaveBalance],
    /// Notifications in publication order.
    pub notifications: &'a [Notification],
}

/// Logs each notification and keeps a copy for the report.
#[derive(Debug, Default)]
pub struct RecordingSink {
    log: TracingSink,
    recorded: Vec<Notification>,
}

impl RecordingSink {
    /// Notifications published so far.
    pub fn recorded(&self) -> &[Notification] {
        &self.recorded
    }
}

impl NotificationSink for RecordingSink {
    fn publish(&mut self, notification: Notification) {
        self.log.publish(notification.clone());
        self.recorded.push(notification);
    }
}

impl Scenario {
    /// Reads a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// Parses a scenario from JSON text.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Runs every step against `desk`.
    pub fn run(&self, desk: &mut LeaveDesk, sink: &mut dyn NotificationSink) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            run_step(desk, step, sink).with_context(|| format!("Scenario step {index} failed"))?;
        }
        Ok(())
    }
}

fn run_step(desk: &mut LeaveDesk, step: &Step, sink: &mut dyn NotificationSink) -> Result<()> {
    match step {
        Step::Submit {
            employee,
            leave_type,
            from_date,
            to_date,
            reason,
        } => {
            let application = LeaveApplication {
                employee_id: employee_id(desk, employee)?,
                leave_type: *leave_type,
                from_date: *from_date,
                to_date: *to_date,
                reason: reason.clone(),
            };
            if let Err(e) = desk.submit(application, sink) {
                warn!(employee = %employee, error = %e, "Submission refused");
            }
        }
        Step::Approve {
            request,
            approver,
            comments,
        } => {
            let id = request_id(desk, *request)?;
            let approver_id = employee_id(desk, approver)?;
            if let Err(e) = desk.approve(id, approver_id, comments.clone(), sink) {
                warn!(request = *request, error = %e, "Approval refused");
            }
        }
        Step::Reject {
            request,
            approver,
            comments,
        } => {
            let id = request_id(desk, *request)?;
            let approver_id = employee_id(desk, approver)?;
            if let Err(e) = desk.reject(id, approver_id, comments.clone(), sink) {
                warn!(request = *request, error = %e, "Rejection refused");
            }
        }
        Step::Validate {
            employee,
            leave_type,
            from_date,
            to_date,
        } => {
            let applicant = employee_id(desk, employee)?;
            let Some(range) = DateRange::new(*from_date, *to_date) else {
                bail!("Leave end date {to_date} is before start date {from_date}");
            };
            let report = desk.validate(&LeaveCandidate::new(applicant, *leave_type, range));
            info!(
                employee = %employee,
                valid = report.is_valid(),
                errors = ?report.messages(),
                "Validation result"
            );
        }
        Step::RollOver { from_year } => {
            desk.roll_over(*from_year);
        }
    }
    Ok(())
}

fn employee_id(desk: &LeaveDesk, code: &str) -> Result<EmployeeId> {
    desk.employees()
        .by_code(code)
        .map(|e| e.id)
        .with_context(|| format!("Unknown employee code {code}"))
}

fn request_id(desk: &LeaveDesk, position: usize) -> Result<LeaveRequestId> {
    desk.requests()
        .all()
        .get(position)
        .map(|r| r.id)
        .with_context(|| format!("No request at position {position}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leavedesk_core::workflow::RequestStatus;
    use leavedesk_store::seed::{seed_demo, seed_pending_request};
    use leavedesk_store::{FixedClock, LeaveDeskOptions};

    fn desk() -> LeaveDesk {
        let mut desk = LeaveDesk::new(LeaveDeskOptions::default()).with_clock(FixedClock::on(
            NaiveDate::from_ymd_opt(2024, 12, 18).unwrap(),
        ));
        seed_demo(&mut desk).unwrap();
        desk
    }

    #[test]
    fn test_parse_and_run() {
        let scenario = Scenario::parse(
            r#"{
                "steps": [
                    {"action": "submit", "employee": "EMP004", "leave_type": "casual",
                     "from_date": "2024-12-23", "to_date": "2024-12-25"},
                    {"action": "submit", "employee": "EMP004", "leave_type": "casual",
                     "from_date": "2024-12-19", "to_date": "2024-12-19"},
                    {"action": "approve", "request": 0, "approver": "EMP003"},
                    {"action": "approve", "request": 0, "approver": "emp002", "comments": "ok"},
                    {"action": "approve", "request": 0, "approver": "EMP002"},
                    {"action": "validate", "employee": "EMP004", "leave_type": "paid",
                     "from_date": "2025-01-06", "to_date": "2025-01-10"},
                    {"action": "roll_over", "from_year": 2024}
                ]
            }"#,
        )
        .unwrap();
        let mut desk = desk();
        let mut sink = RecordingSink::default();

        scenario.run(&mut desk, &mut sink).unwrap();

        assert_eq!(desk.requests().all().len(), 1);
        assert_eq!(desk.requests().all()[0].status, RequestStatus::Approved);
        let titles: Vec<_> = sink.recorded().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Leave Request Submitted",
                "Leave Request Validation Failed",
                "Leave Request Approved",
                "Leave Request Fully Approved",
            ]
        );
        assert_eq!(desk.balances().all().len(), 6);
    }

    #[test]
    fn test_demo_scenario_after_seeded_request() {
        let scenario = Scenario::parse(include_str!("../scenarios/demo.json")).unwrap();
        let mut desk = LeaveDesk::new(LeaveDeskOptions::default())
            .with_clock(FixedClock::on(scenario.today.unwrap()));
        let ids = seed_demo(&mut desk).unwrap();
        let seeded = seed_pending_request(&mut desk, &ids).unwrap();
        let mut sink = RecordingSink::default();

        scenario.run(&mut desk, &mut sink).unwrap();

        let requests = desk.requests();
        assert_eq!(requests.all().len(), 3);
        assert_eq!(requests.all()[0].id, seeded.id);
        assert!(requests.all()[0].approvals[1].is_current);
        assert_eq!(requests.with_status(RequestStatus::Pending).len(), 1);
        assert_eq!(requests.with_status(RequestStatus::Approved).len(), 1);
        assert_eq!(requests.with_status(RequestStatus::Rejected).len(), 1);

        let casual = desk
            .balances()
            .find(ids.employee, LeaveType::Casual, 2024)
            .unwrap();
        assert_eq!(casual.remaining_days, 7);
    }

    #[test]
    fn test_unknown_references_abort() {
        let mut desk = desk();
        let mut sink = RecordingSink::default();

        let unknown_employee = Scenario::parse(
            r#"{"steps": [{"action": "submit", "employee": "EMP999", "leave_type": "sick",
                "from_date": "2024-12-18", "to_date": "2024-12-18"}]}"#,
        )
        .unwrap();
        assert!(unknown_employee.run(&mut desk, &mut sink).is_err());

        let unknown_request = Scenario::parse(
            r#"{"steps": [{"action": "reject", "request": 3, "approver": "EMP003"}]}"#,
        )
        .unwrap();
        let err = unknown_request.run(&mut desk, &mut sink).unwrap_err();
        assert!(format!("{err:#}").contains("No request at position 3"));
    }

    #[test]
    fn test_today_is_optional() {
        let scenario = Scenario::parse(r#"{"today": "2024-12-18", "steps": []}"#).unwrap();
        assert_eq!(scenario.today, NaiveDate::from_ymd_opt(2024, 12, 18));
        assert!(Scenario::parse(r#"{"steps": []}"#).unwrap().today.is_none());
    }
}
