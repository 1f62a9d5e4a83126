//! # Lateral control library.
//!
//! This library allows other crates in the workspace, and the benchmarks, to
//! access items defined inside the lateral control crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Lateral PID control module - converts lateral acceleration error into a steer command
pub mod pid_ctrl;

/// Replay logs - recorded cycles used to drive the controller offline
pub mod replay;
