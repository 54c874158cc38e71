//! Leave domain types shared by policies, balances and requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of leave an employee can request.
///
/// Each leave type is governed by at most one active `LeavePolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Short-notice personal leave.
    Casual,
    /// Illness leave.
    Sick,
    /// Planned paid time off.
    Paid,
}

impl LeaveType {
    /// Returns the string representation of the leave type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Sick => "sick",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive calendar date range of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of leave.
    pub from: NaiveDate,
    /// Last day of leave (inclusive).
    pub to: NaiveDate,
}

impl DateRange {
    /// Builds a range, returning `None` when `to` precedes `from`.
    #[must_use]
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (to >= from).then_some(Self { from, to })
    }

    /// Number of calendar days covered, counting both ends.
    #[must_use]
    pub fn days_count(&self) -> u32 {
        let span = (self.to - self.from).num_days() + 1;
        u32::try_from(span).unwrap_or(u32::MAX)
    }

    /// Whole days between `today` and the first day of leave.
    ///
    /// Negative when the leave starts in the past.
    #[must_use]
    pub fn notice_days(&self, today: NaiveDate) -> i64 {
        (self.from - today).num_days()
    }
}
