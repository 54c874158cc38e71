//! Policy repository.

use leavedesk_core::leave::{LeavePolicy, LeaveType, PolicyUpdate};
use leavedesk_core::validation::LeaveValidator;
use leavedesk_shared::types::LeavePolicyId;
use tracing::debug;

use super::RepositoryError;

/// In-memory store of leave policies.
///
/// Holds at most one active policy per leave type.
#[derive(Debug, Clone, Default)]
pub struct PolicyRepository {
    policies: Vec<LeavePolicy>,
}

impl PolicyRepository {
    /// Creates an empty repository.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Adds a policy.
    ///
    /// # Errors
    ///
    /// Returns `ActivePolicyExists` if `policy` is active and its leave type
    /// already has an active policy.
    pub fn add(&mut self, policy: LeavePolicy) -> Result<LeavePolicyId, RepositoryError> {
        if policy.is_active && self.active_for(policy.leave_type).is_some() {
            return Err(RepositoryError::ActivePolicyExists(policy.leave_type));
        }
        let id = policy.id;
        debug!(policy_id = %id, leave_type = %policy.leave_type, "Adding leave policy");
        self.policies.push(policy);
        Ok(id)
    }

    /// Applies a partial update to a policy.
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` for an unknown id, or `ActivePolicyExists` if
    /// the update would activate a second policy for the same leave type.
    pub fn update(
        &mut self,
        id: LeavePolicyId,
        update: PolicyUpdate,
    ) -> Result<&LeavePolicy, RepositoryError> {
        let index = self
            .policies
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepositoryError::PolicyNotFound(id))?;

        let leave_type = self.policies[index].leave_type;
        let activating = update.is_active == Some(true) && !self.policies[index].is_active;
        if activating && self.active_for(leave_type).is_some() {
            return Err(RepositoryError::ActivePolicyExists(leave_type));
        }

        let policy = &mut self.policies[index];
        policy.apply(update);
        debug!(policy_id = %id, leave_type = %leave_type, "Updated leave policy");
        Ok(policy)
    }

    /// Looks up a policy by id.
    #[must_use]
    pub fn get(&self, id: LeavePolicyId) -> Option<&LeavePolicy> {
        self.policies.iter().find(|p| p.id == id)
    }

    /// The active policy for `leave_type`, if any.
    #[must_use]
    pub fn active_for(&self, leave_type: LeaveType) -> Option<&LeavePolicy> {
        LeaveValidator::active_policy(&self.policies, leave_type)
    }

    /// All policies, active or not, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[LeavePolicy] {
        &self.policies
    }
}
