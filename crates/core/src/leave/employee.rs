//! Employee records as seen by the leave workflow.

use leavedesk_shared::types::EmployeeId;
use serde::{Deserialize, Serialize};

/// Minimal employee record used to address notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Human-facing staff code, e.g. `EMP004`.
    pub employee_code: String,
    /// Line manager, if any.
    pub manager_id: Option<EmployeeId>,
}

impl Employee {
    /// Creates an employee with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, employee_code: impl Into<String>) -> Self {
        Self {
            id: EmployeeId::new(),
            name: name.into(),
            employee_code: employee_code.into(),
            manager_id: None,
        }
    }

    /// Sets the line manager.
    #[must_use]
    pub fn reporting_to(mut self, manager_id: EmployeeId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }
}
