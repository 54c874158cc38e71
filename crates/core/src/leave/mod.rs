//! Leave domain model.
//!
//! - `types` - Leave types and inclusive date ranges
//! - `policy` - Per-type leave policies
//! - `balance` - Per-employee, per-year balances and carry-forward
//! - `employee` - Employee records

pub mod balance;
pub mod employee;
pub mod policy;
pub mod types;

pub use balance::{BalanceError, LeaveBalance};
pub use employee::Employee;
pub use policy::{LeavePolicy, PolicyUpdate};
pub use types::{DateRange, LeaveType};
