//! Task lifecycle: state tracking and script runs.
//!
//! - `store` -- in-memory task table with the restart-coalescing flag
//! - `executor` -- port trait for running a trigger's script
//! - `runner` -- starts runs, records completion, schedules coalesced restarts

pub mod executor;
pub mod runner;
pub mod store;
