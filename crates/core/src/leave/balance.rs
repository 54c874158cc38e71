//! Per-employee leave balances.

use leavedesk_shared::types::{EmployeeId, LeaveBalanceId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::policy::LeavePolicy;
use super::types::LeaveType;

/// Errors raised when mutating a balance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// Debit would drive the remaining days below zero.
    #[error("Insufficient leave balance: requested {requested} days, available {available}")]
    Insufficient {
        /// Days remaining before the debit.
        available: u32,
        /// Days the debit asked for.
        requested: u32,
    },
}

/// Entitlement of one employee for one leave type in one year.
///
/// `(employee_id, leave_type, year)` is the natural key.
/// `remaining_days` always equals `total_days - used_days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Unique identifier for the balance row.
    pub id: LeaveBalanceId,
    /// Employee owning the balance.
    pub employee_id: EmployeeId,
    /// Leave type the balance applies to.
    pub leave_type: LeaveType,
    /// Calendar year.
    pub year: i32,
    /// Days allocated for the year.
    pub total_days: u32,
    /// Days consumed by approved leave.
    pub used_days: u32,
    /// Days still available.
    pub remaining_days: u32,
}

impl LeaveBalance {
    /// Creates a balance, deriving `remaining_days`.
    #[must_use]
    pub fn new(
        employee_id: EmployeeId,
        leave_type: LeaveType,
        year: i32,
        total_days: u32,
        used_days: u32,
    ) -> Self {
        Self {
            id: LeaveBalanceId::new(),
            employee_id,
            leave_type,
            year,
            total_days,
            used_days,
            remaining_days: total_days.saturating_sub(used_days),
        }
    }

    /// Returns true if this row is keyed by the given triple.
    #[must_use]
    pub fn matches(&self, employee_id: EmployeeId, leave_type: LeaveType, year: i32) -> bool {
        self.employee_id == employee_id && self.leave_type == leave_type && self.year == year
    }

    /// Consumes `days`, re-deriving the remaining count.
    ///
    /// The balance is left untouched on error.
    pub fn debit(&mut self, days: u32) -> Result<(), BalanceError> {
        if days > self.remaining_days {
            return Err(BalanceError::Insufficient {
                available: self.remaining_days,
                requested: days,
            });
        }
        self.used_days += days;
        self.remaining_days = self.total_days.saturating_sub(self.used_days);
        Ok(())
    }

    /// Opening balance for the following year under `policy`.
    ///
    /// The new total is the annual limit plus whatever the policy lets
    /// roll over from this year's remaining days.
    #[must_use]
    pub fn rolled_over(&self, policy: &LeavePolicy) -> Self {
        let carried = policy.carry_forward_days(self.remaining_days);
        Self::new(
            self.employee_id,
            self.leave_type,
            self.year + 1,
            policy.annual_limit.saturating_add(carried),
            0,
        )
    }

    /// Resets the allocation to `total_days`, keeping the days already used.
    pub fn reopen(&mut self, total_days: u32) {
        self.total_days = total_days;
        self.remaining_days = total_days.saturating_sub(self.used_days);
    }
}
