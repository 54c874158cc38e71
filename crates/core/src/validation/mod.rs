//! Policy validation for leave requests.
//!
//! - `error` - Typed validation failures
//! - `engine` - The validation engine and its report

pub mod engine;
pub mod error;

#[cfg(test)]
mod engine_props;

pub use engine::{LeaveCandidate, LeaveValidator, ValidationReport};
pub use error::ValidationError;
