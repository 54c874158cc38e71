//! Employee directory.

use leavedesk_core::leave::Employee;
use leavedesk_shared::types::EmployeeId;

/// Name used in notifications when an employee is unknown.
pub const UNKNOWN_EMPLOYEE_NAME: &str = "Employee";

/// In-memory directory of employees.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
}

impl EmployeeDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            employees: Vec::new(),
        }
    }

    /// Adds an employee, returning its id.
    pub fn add(&mut self, employee: Employee) -> EmployeeId {
        let id = employee.id;
        self.employees.push(employee);
        id
    }

    /// Looks up an employee by id.
    #[must_use]
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Looks up an employee by staff code, e.g. `EMP004`.
    #[must_use]
    pub fn by_code(&self, employee_code: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|e| e.employee_code.eq_ignore_ascii_case(employee_code))
    }

    /// Display name, falling back to a generic label for unknown ids.
    #[must_use]
    pub fn name_of(&self, id: EmployeeId) -> &str {
        self.get(id)
            .map_or(UNKNOWN_EMPLOYEE_NAME, |e| e.name.as_str())
    }

    /// All employees in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Employee] {
        &self.employees
    }
}
