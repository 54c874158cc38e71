//! In-memory storage layer and the `LeaveDesk` service.
//!
//! This crate provides:
//! - Repository abstractions over in-memory collections
//! - The `LeaveDesk` service that owns every store and drives the workflow
//! - A clock abstraction so "today" can be pinned in tests
//! - Demo seed data

pub mod clock;
pub mod desk;
pub mod repositories;
pub mod seed;
pub mod sink;

pub use clock::{Clock, FixedClock, SystemClock};
pub use desk::{LeaveDesk, LeaveDeskOptions};
pub use repositories::{
    BalanceRepository, EmployeeDirectory, PolicyRepository, RepositoryError, RequestRepository,
};
pub use sink::TracingSink;
