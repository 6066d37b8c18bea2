//! Script process execution.
//!
//! - `executable` -- permission probe used at load time and before each run
//! - `process` -- [`process::ProcessScriptExecutor`], the `ScriptExecutor` backed by child processes

pub mod executable;
pub mod process;
