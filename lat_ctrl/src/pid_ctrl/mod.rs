//! # Lateral PID control module
//!
//! Lateral control drives the vehicle's measured lateral acceleration toward
//! the target lateral acceleration. It is a single PID controller, invoked once
//! per cycle, whose output is the steer command for that cycle.
//!
//! The derivative term acts on an exponentially smoothed error rate, the 
//! integral is clamped to stop wind-up during long periods of saturation, and
//! a small feedforward is taken from the nearest target of the future plan.
//! The proportional and integral gains can optionally be scheduled on speed.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod controller;
pub mod gains;
pub mod params;
pub mod plan;
pub mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use controller::*;
pub use gains::*;
pub use params::*;
pub use plan::*;
pub use state::*;
