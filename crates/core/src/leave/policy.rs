//! Leave policies: the configurable rule set for one leave type.

use chrono::{DateTime, Utc};
use leavedesk_shared::types::LeavePolicyId;
use serde::{Deserialize, Serialize};

use super::types::LeaveType;

/// Rules governing requests of one leave type.
///
/// At most one active policy per leave type is expected. Inactive policies
/// are ignored by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Unique identifier for the policy.
    pub id: LeavePolicyId,
    /// Leave type this policy governs.
    pub leave_type: LeaveType,
    /// Days granted per year.
    pub annual_limit: u32,
    /// Minimum whole days between submission and the first day of leave.
    pub min_days_notice: u32,
    /// Longest allowed single request, in days.
    pub max_consecutive_days: u32,
    /// Whether unused days roll over into the next year.
    pub carry_forward_allowed: bool,
    /// Cap on rolled-over days (None = no cap).
    pub carry_forward_limit: Option<u32>,
    /// Whether a medical certificate must accompany the request.
    #[serde(default)]
    pub requires_medical_certificate: Option<bool>,
    /// Only active policies participate in validation.
    pub is_active: bool,
    /// When the policy was created.
    pub created_at: DateTime<Utc>,
    /// When the policy was last changed.
    pub updated_at: DateTime<Utc>,
}

impl LeavePolicy {
    /// Creates an active policy without carry-forward.
    #[must_use]
    pub fn new(
        leave_type: LeaveType,
        annual_limit: u32,
        min_days_notice: u32,
        max_consecutive_days: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LeavePolicyId::new(),
            leave_type,
            annual_limit,
            min_days_notice,
            max_consecutive_days,
            carry_forward_allowed: false,
            carry_forward_limit: None,
            requires_medical_certificate: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Allows carry-forward, optionally capped.
    #[must_use]
    pub fn with_carry_forward(mut self, limit: Option<u32>) -> Self {
        self.carry_forward_allowed = true;
        self.carry_forward_limit = limit;
        self
    }

    /// Marks the policy as requiring a medical certificate.
    #[must_use]
    pub fn with_medical_certificate(mut self) -> Self {
        self.requires_medical_certificate = Some(true);
        self
    }

    /// Marks the policy inactive.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Days that may roll over given the unused days of the closing year.
    #[must_use]
    pub fn carry_forward_days(&self, unused: u32) -> u32 {
        if !self.carry_forward_allowed {
            return 0;
        }
        self.carry_forward_limit
            .map_or(unused, |limit| unused.min(limit))
    }

    /// Applies a partial update and stamps `updated_at`.
    pub fn apply(&mut self, update: PolicyUpdate) {
        if let Some(annual_limit) = update.annual_limit {
            self.annual_limit = annual_limit;
        }
        if let Some(min_days_notice) = update.min_days_notice {
            self.min_days_notice = min_days_notice;
        }
        if let Some(max_consecutive_days) = update.max_consecutive_days {
            self.max_consecutive_days = max_consecutive_days;
        }
        if let Some(allowed) = update.carry_forward_allowed {
            self.carry_forward_allowed = allowed;
        }
        if let Some(limit) = update.carry_forward_limit {
            self.carry_forward_limit = limit;
        }
        if let Some(requires) = update.requires_medical_certificate {
            self.requires_medical_certificate = Some(requires);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of a policy. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyUpdate {
    /// New annual limit.
    pub annual_limit: Option<u32>,
    /// New notice period.
    pub min_days_notice: Option<u32>,
    /// New consecutive-day cap.
    pub max_consecutive_days: Option<u32>,
    /// New carry-forward flag.
    pub carry_forward_allowed: Option<bool>,
    /// New carry-forward cap; `Some(None)` removes the cap.
    pub carry_forward_limit: Option<Option<u32>>,
    /// New certificate requirement.
    pub requires_medical_certificate: Option<bool>,
    /// New active flag.
    pub is_active: Option<bool>,
}
