//! Repository abstractions over the in-memory collections.

pub mod balance;
pub mod employee;
pub mod policy;
pub mod request;

pub use balance::BalanceRepository;
pub use employee::EmployeeDirectory;
pub use policy::PolicyRepository;
pub use request::RequestRepository;

use leavedesk_core::leave::LeaveType;
use leavedesk_shared::AppError;
use leavedesk_shared::types::LeavePolicyId;
use thiserror::Error;

/// Errors raised by repository writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Policy not found.
    #[error("Leave policy {0} not found")]
    PolicyNotFound(LeavePolicyId),

    /// A second active policy for the same leave type was attempted.
    #[error("An active {0} policy already exists")]
    ActivePolicyExists(LeaveType),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        let message = err.to_string();
        match err {
            RepositoryError::PolicyNotFound(_) => Self::NotFound(message),
            RepositoryError::ActivePolicyExists(_) => Self::Conflict(message),
        }
    }
}
