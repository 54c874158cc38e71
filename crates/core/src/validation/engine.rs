//! Policy validation of leave request candidates.
//!
//! Validation is a pure function of the candidate, the policy and balance
//! collections, and the current date. It never mutates anything, so calling
//! it twice with the same inputs yields the same report.

use chrono::{Datelike, NaiveDate};
use leavedesk_shared::types::EmployeeId;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::leave::{DateRange, LeaveBalance, LeavePolicy, LeaveType};

/// The facts about a prospective request that validation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveCandidate {
    /// Employee asking for leave.
    pub employee_id: EmployeeId,
    /// Requested leave type.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub to_date: NaiveDate,
    /// Inclusive day span of the request.
    pub days_count: u32,
}

impl LeaveCandidate {
    /// Builds a candidate whose `days_count` is derived from `range`.
    #[must_use]
    pub fn new(employee_id: EmployeeId, leave_type: LeaveType, range: DateRange) -> Self {
        Self {
            employee_id,
            leave_type,
            from_date: range.from,
            to_date: range.to,
            days_count: range.days_count(),
        }
    }
}

/// Outcome of validating a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Every rule the candidate breaks, in check order.
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Returns true if no rule was broken.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rendered messages, one per error.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Converts the report into a `Result`, yielding the errors on failure.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Stateless engine evaluating leave policies.
pub struct LeaveValidator;

impl LeaveValidator {
    /// Validate a candidate against the active policy and the employee's balance.
    ///
    /// Checks run in this order and every applicable error is collected:
    /// 1. An active policy must exist for the leave type; if not, that is
    ///    the only error reported
    /// 2. Notice: whole days from `today` to the first day of leave must
    ///    reach `min_days_notice`
    /// 3. Span: `days_count` must not exceed `max_consecutive_days`
    /// 4. Balance: `days_count` must not exceed the remaining days of the
    ///    balance for `today`'s year; skipped when there is no balance row
    ///
    /// # Arguments
    /// * `candidate` - The prospective request
    /// * `policies` - All known policies, active or not
    /// * `balances` - All known balances
    /// * `today` - The date the request is evaluated on
    #[must_use]
    pub fn validate(
        candidate: &LeaveCandidate,
        policies: &[LeavePolicy],
        balances: &[LeaveBalance],
        today: NaiveDate,
    ) -> ValidationReport {
        let Some(policy) = Self::active_policy(policies, candidate.leave_type) else {
            return ValidationReport {
                errors: vec![ValidationError::PolicyMissing {
                    leave_type: candidate.leave_type,
                }],
            };
        };

        let mut errors = Vec::new();

        let notice = (candidate.from_date - today).num_days();
        if notice < i64::from(policy.min_days_notice) {
            errors.push(ValidationError::NoticeViolation {
                leave_type: candidate.leave_type,
                required: policy.min_days_notice,
            });
        }

        if candidate.days_count > policy.max_consecutive_days {
            errors.push(ValidationError::SpanViolation {
                leave_type: candidate.leave_type,
                max: policy.max_consecutive_days,
            });
        }

        let balance = balances
            .iter()
            .find(|b| b.matches(candidate.employee_id, candidate.leave_type, today.year()));
        if let Some(balance) = balance
            && candidate.days_count > balance.remaining_days
        {
            errors.push(ValidationError::BalanceViolation {
                available: balance.remaining_days,
            });
        }

        ValidationReport { errors }
    }

    /// Returns the first active policy for `leave_type`.
    #[must_use]
    pub fn active_policy(policies: &[LeavePolicy], leave_type: LeaveType) -> Option<&LeavePolicy> {
        policies
            .iter()
            .find(|p| p.leave_type == leave_type && p.is_active)
    }
}
