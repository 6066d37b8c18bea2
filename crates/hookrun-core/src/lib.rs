//! Business logic and port trait definitions for hookrun.
//!
//! This crate owns the task lifecycle: the trigger registry, the task state
//! store, the runner that spawns scripts through the [`task::executor::ScriptExecutor`]
//! port, and the dispatcher that authenticates requests. It depends only on
//! `hookrun-types` -- never on `hookrun-infra` or any process/file IO.

pub mod dispatch;
pub mod registry;
pub mod task;
