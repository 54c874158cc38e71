//! Leave request approval workflow for LeaveDesk.
//!
//! This module implements the sequential approval state machine.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (LeaveRequest, ApprovalStep, WorkflowAction)
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{
    ActionKind, ApprovalStep, ApproverRole, LeaveApplication, LeaveRequest, RequestStatus,
    StepStatus, WorkflowAction,
};
