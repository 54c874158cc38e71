//! Property-based tests for LeaveValidator.
//!
//! Uses proptest for randomized candidates, policies and balances.

use chrono::{Datelike, Duration, NaiveDate};
use leavedesk_shared::types::EmployeeId;
use proptest::prelude::*;
use uuid::Uuid;

use crate::leave::{DateRange, LeaveBalance, LeavePolicy, LeaveType};
use crate::validation::engine::{LeaveCandidate, LeaveValidator};
use crate::validation::error::ValidationError;

/// Strategy for generating leave types.
fn arb_leave_type() -> impl Strategy<Value = LeaveType> {
    prop_oneof![
        Just(LeaveType::Casual),
        Just(LeaveType::Sick),
        Just(LeaveType::Paid),
    ]
}

/// Strategy for generating employee IDs.
fn arb_employee_id() -> impl Strategy<Value = EmployeeId> {
    any::<u128>().prop_map(|n| EmployeeId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating dates across a few years.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..2000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// Strategy for generating an active policy of the given type.
fn arb_policy(leave_type: LeaveType) -> impl Strategy<Value = LeavePolicy> {
    (1u32..40, 0u32..15, 1u32..30)
        .prop_map(move |(annual, notice, max)| LeavePolicy::new(leave_type, annual, notice, max))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Span cap: over-long requests are always invalid
    // =========================================================================

    /// A request longer than max_consecutive_days always carries a SpanViolation
    #[test]
    fn prop_span_over_max_always_invalid(
        leave_type in arb_leave_type(),
        employee_id in arb_employee_id(),
        from in arb_date(),
        today in arb_date(),
        extra in 1u32..20,
        policy in arb_policy(LeaveType::Casual),
    ) {
        let mut policy = policy;
        policy.leave_type = leave_type;
        let days = policy.max_consecutive_days + extra;
        let candidate = LeaveCandidate {
            employee_id,
            leave_type,
            from_date: from,
            to_date: from + Duration::days(i64::from(days) - 1),
            days_count: days,
        };

        let report = LeaveValidator::validate(&candidate, &[policy.clone()], &[], today);

        prop_assert!(!report.is_valid());
        let expected = ValidationError::SpanViolation { leave_type, max: policy.max_consecutive_days };
        prop_assert!(report.errors.contains(&expected));
        let message = expected.to_string();
        prop_assert!(message.contains(&policy.max_consecutive_days.to_string()));
    }

    // =========================================================================
    // Day count is the inclusive span of the range
    // =========================================================================

    /// days_count == (to - from) + 1
    #[test]
    fn prop_days_count_inclusive(from in arb_date(), length in 0i64..400) {
        let to = from + Duration::days(length);
        let range = DateRange::new(from, to).unwrap();
        prop_assert_eq!(i64::from(range.days_count()), length + 1);
    }

    /// Reversed ranges never build
    #[test]
    fn prop_reversed_range_rejected(from in arb_date(), back in 1i64..400) {
        prop_assert!(DateRange::new(from, from - Duration::days(back)).is_none());
    }

    // =========================================================================
    // Validation is read-only and deterministic
    // =========================================================================

    /// Validating twice with the same inputs yields the same report
    #[test]
    fn prop_validation_idempotent(
        employee_id in arb_employee_id(),
        from in arb_date(),
        length in 0i64..30,
        today in arb_date(),
        policy in arb_policy(LeaveType::Casual),
        total in 0u32..30,
        used in 0u32..30,
    ) {
        let range = DateRange::new(from, from + Duration::days(length)).unwrap();
        let candidate = LeaveCandidate::new(employee_id, LeaveType::Casual, range);
        let balances = vec![LeaveBalance::new(employee_id, LeaveType::Casual, today.year(), total, used)];
        let policies = vec![policy];

        let first = LeaveValidator::validate(&candidate, &policies, &balances, today);
        let second = LeaveValidator::validate(&candidate, &policies, &balances, today);

        prop_assert_eq!(first, second);
    }

    // =========================================================================
    // Missing policy is the only error reported
    // =========================================================================

    /// No active policy yields exactly one PolicyMissing error
    #[test]
    fn prop_missing_policy_single_error(
        leave_type in arb_leave_type(),
        employee_id in arb_employee_id(),
        from in arb_date(),
        length in 0i64..60,
        today in arb_date(),
    ) {
        let range = DateRange::new(from, from + Duration::days(length)).unwrap();
        let candidate = LeaveCandidate::new(employee_id, leave_type, range);

        let report = LeaveValidator::validate(&candidate, &[], &[], today);

        prop_assert_eq!(report.errors, vec![ValidationError::PolicyMissing { leave_type }]);
    }

    // =========================================================================
    // Notice check is exact at the boundary
    // =========================================================================

    /// Notice violation iff whole days until start < min_days_notice
    #[test]
    fn prop_notice_boundary(
        employee_id in arb_employee_id(),
        today in arb_date(),
        lead in -10i64..30,
        policy in arb_policy(LeaveType::Sick),
    ) {
        let from = today + Duration::days(lead);
        let candidate = LeaveCandidate::new(
            employee_id,
            LeaveType::Sick,
            DateRange::new(from, from).unwrap(),
        );

        let report = LeaveValidator::validate(&candidate, &[policy.clone()], &[], today);
        let has_notice = report
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::NoticeViolation { .. }));

        prop_assert_eq!(has_notice, lead < i64::from(policy.min_days_notice));
    }
}

// =========================================================================
// Unit tests for edge cases
// =========================================================================

#[cfg(test)]
mod edge_case_tests {
    use super::*;

    #[test]
    fn test_zero_notice_allows_same_day() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let sick = LeavePolicy::new(LeaveType::Sick, 10, 0, 10).with_medical_certificate();
        let candidate = LeaveCandidate::new(
            EmployeeId::new(),
            LeaveType::Sick,
            DateRange::new(today, today).unwrap(),
        );

        let report = LeaveValidator::validate(&candidate, &[sick], &[], today);
        assert!(report.is_valid());
    }

    #[test]
    fn test_past_start_violates_zero_notice() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let sick = LeavePolicy::new(LeaveType::Sick, 10, 0, 10);
        let yesterday = today - Duration::days(1);
        let candidate = LeaveCandidate::new(
            EmployeeId::new(),
            LeaveType::Sick,
            DateRange::new(yesterday, today).unwrap(),
        );

        let report = LeaveValidator::validate(&candidate, &[sick], &[], today);
        assert_eq!(
            report.errors,
            vec![ValidationError::NoticeViolation {
                leave_type: LeaveType::Sick,
                required: 0
            }]
        );
    }

    #[test]
    fn test_exactly_max_consecutive_days_is_allowed() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let casual = LeavePolicy::new(LeaveType::Casual, 12, 0, 5);
        let from = today + Duration::days(3);
        let candidate = LeaveCandidate::new(
            EmployeeId::new(),
            LeaveType::Casual,
            DateRange::new(from, from + Duration::days(4)).unwrap(),
        );
        assert_eq!(candidate.days_count, 5);

        let report = LeaveValidator::validate(&candidate, &[casual], &[], today);
        assert!(report.is_valid());
    }

    #[test]
    fn test_first_active_policy_wins_over_inactive() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let strict = LeavePolicy::new(LeaveType::Casual, 12, 30, 1).inactive();
        let lenient = LeavePolicy::new(LeaveType::Casual, 12, 0, 10);
        let candidate = LeaveCandidate::new(
            EmployeeId::new(),
            LeaveType::Casual,
            DateRange::new(today, today + Duration::days(2)).unwrap(),
        );

        let report = LeaveValidator::validate(&candidate, &[strict, lenient], &[], today);
        assert!(report.is_valid());
    }
}
