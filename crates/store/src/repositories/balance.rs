//! Balance repository.

use leavedesk_core::leave::{BalanceError, LeaveBalance, LeavePolicy, LeaveType};
use leavedesk_core::validation::LeaveValidator;
use leavedesk_shared::types::EmployeeId;
use tracing::{debug, info};

/// In-memory store of leave balances keyed by `(employee, leave type, year)`.
#[derive(Debug, Clone, Default)]
pub struct BalanceRepository {
    balances: Vec<LeaveBalance>,
}

impl BalanceRepository {
    /// Creates an empty repository.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            balances: Vec::new(),
        }
    }

    /// Inserts a balance, replacing any row with the same key.
    pub fn upsert(&mut self, balance: LeaveBalance) {
        match self
            .balances
            .iter_mut()
            .find(|b| b.matches(balance.employee_id, balance.leave_type, balance.year))
        {
            Some(existing) => *existing = balance,
            None => self.balances.push(balance),
        }
    }

    /// Looks up the balance for a key.
    #[must_use]
    pub fn find(
        &self,
        employee_id: EmployeeId,
        leave_type: LeaveType,
        year: i32,
    ) -> Option<&LeaveBalance> {
        self.balances
            .iter()
            .find(|b| b.matches(employee_id, leave_type, year))
    }

    /// All balances of one employee.
    #[must_use]
    pub fn for_employee(&self, employee_id: EmployeeId) -> Vec<&LeaveBalance> {
        self.balances
            .iter()
            .filter(|b| b.employee_id == employee_id)
            .collect()
    }

    /// All balances in insertion order.
    #[must_use]
    pub fn all(&self) -> &[LeaveBalance] {
        &self.balances
    }

    /// Checks that `days` can be debited from the keyed balance.
    ///
    /// A missing row passes; leave without a balance row is unconstrained.
    pub fn check_debit(
        &self,
        employee_id: EmployeeId,
        leave_type: LeaveType,
        year: i32,
        days: u32,
    ) -> Result<(), BalanceError> {
        match self.find(employee_id, leave_type, year) {
            Some(balance) if days > balance.remaining_days => Err(BalanceError::Insufficient {
                available: balance.remaining_days,
                requested: days,
            }),
            _ => Ok(()),
        }
    }

    /// Debits `days` from the keyed balance.
    ///
    /// Returns the updated balance, or `None` when no row exists for the key.
    pub fn debit(
        &mut self,
        employee_id: EmployeeId,
        leave_type: LeaveType,
        year: i32,
        days: u32,
    ) -> Result<Option<&LeaveBalance>, BalanceError> {
        let Some(balance) = self
            .balances
            .iter_mut()
            .find(|b| b.matches(employee_id, leave_type, year))
        else {
            debug!(%employee_id, %leave_type, year, "No balance row; debit skipped");
            return Ok(None);
        };
        balance.debit(days)?;
        debug!(
            %employee_id,
            %leave_type,
            year,
            days,
            remaining = balance.remaining_days,
            "Debited leave balance"
        );
        Ok(Some(balance))
    }

    /// Opens `from_year + 1` balances from the `from_year` rows.
    ///
    /// Rows whose leave type has no active policy are skipped. An existing
    /// next-year row keeps its used days and only has its allocation reset.
    /// Returns the number of rows written.
    pub fn roll_over(&mut self, from_year: i32, policies: &[LeavePolicy]) -> usize {
        let opening: Vec<LeaveBalance> = self
            .balances
            .iter()
            .filter(|b| b.year == from_year)
            .filter_map(|b| {
                LeaveValidator::active_policy(policies, b.leave_type).map(|p| b.rolled_over(p))
            })
            .collect();

        let written = opening.len();
        for balance in opening {
            match self
                .balances
                .iter_mut()
                .find(|b| b.matches(balance.employee_id, balance.leave_type, balance.year))
            {
                Some(existing) => existing.reopen(balance.total_days),
                None => self.balances.push(balance),
            }
        }
        info!(from_year, written, "Rolled leave balances over");
        written
    }
}
