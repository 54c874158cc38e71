//! Core business logic for LeaveDesk.
//!
//! This crate contains pure business logic with ZERO storage or I/O dependencies.
//! All domain types, validation rules, and state transitions live here.
//!
//! # Modules
//!
//! - `leave` - Leave types, policies, balances and employees
//! - `validation` - Policy validation of leave request candidates
//! - `workflow` - Sequential approval state machine
//! - `notification` - User-facing notifications emitted after transitions

pub mod leave;
pub mod notification;
pub mod validation;
pub mod workflow;
