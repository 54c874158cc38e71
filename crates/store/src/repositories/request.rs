//! Leave request repository.

use leavedesk_core::workflow::{LeaveRequest, RequestStatus};
use leavedesk_shared::types::{EmployeeId, LeaveRequestId};

/// In-memory store of leave requests, in submission order.
///
/// Requests are never deleted. Only `LeaveDesk` writes to this store.
#[derive(Debug, Clone, Default)]
pub struct RequestRepository {
    requests: Vec<LeaveRequest>,
}

impl RequestRepository {
    /// Creates an empty repository.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// Appends a newly submitted request.
    pub fn insert(&mut self, request: LeaveRequest) {
        self.requests.push(request);
    }

    /// Looks up a request by id.
    #[must_use]
    pub fn get(&self, id: LeaveRequestId) -> Option<&LeaveRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Replaces the stored request with the same id.
    ///
    /// Returns the previous version, or `None` (and stores nothing) if the
    /// id is unknown.
    pub fn replace(&mut self, request: LeaveRequest) -> Option<LeaveRequest> {
        let slot = self.requests.iter_mut().find(|r| r.id == request.id)?;
        Some(std::mem::replace(slot, request))
    }

    /// Requests submitted by one employee.
    #[must_use]
    pub fn for_employee(&self, employee_id: EmployeeId) -> Vec<&LeaveRequest> {
        self.requests
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .collect()
    }

    /// Requests currently in `status`.
    #[must_use]
    pub fn with_status(&self, status: RequestStatus) -> Vec<&LeaveRequest> {
        self.requests.iter().filter(|r| r.status == status).collect()
    }

    /// All requests in submission order.
    #[must_use]
    pub fn all(&self) -> &[LeaveRequest] {
        &self.requests
    }
}
