//! Shared domain types for hookrun.
//!
//! This crate contains the core domain types used across the workspace:
//! Trigger, Task status, the trigger file document, and their error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod task;
pub mod trigger;
