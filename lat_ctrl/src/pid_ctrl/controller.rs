//! # Lateral acceleration PID controller
//!
//! This module provides the discrete PID controller which turns the lateral
//! acceleration error into a steer command. On top of the plain PID terms the
//! controller:
//!
//!  - clamps the integral accumulator to a symmetric limit (anti-windup),
//!  - exponentially smooths the error derivative,
//!  - optionally schedules the P and I gains on vehicle speed,
//!  - adds a feedforward from the nearest target of the future plan.
//!
//! The controller is cycle based rather than time aware, one call to `update`
//! is one control step. The final command is not saturated, that is left to
//! the caller.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;
use util::maths::{clamp_sym, exp_smooth};

// Internal
use super::{
    gains::{select_gains, GainBucket, Gains},
    params::{GainSchedule, PidCtrlParams},
    plan::{plan_feedforward, FuturePlan, VehicleState}
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PID controller on lateral acceleration error.
#[derive(Debug, Serialize, Clone)]
pub struct PidController {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Derivative gain
    k_d: f64,

    /// Feedforward gain on the future plan
    k_ff: f64,

    /// Anti-windup limit on the integral
    integral_limit: f64,

    /// The integral accumulation
    integral: f64,

    /// Previous error
    prev_error: f64,

    /// Previous smoothed derivative
    prev_deriv: f64,

    /// History weight of the derivative smoothing
    deriv_filter_coeff: f64,

    /// If true gains are scheduled on speed
    adaptive_gain: bool,

    /// The speed gain schedule
    #[serde(skip)]
    gain_schedule: GainSchedule,

    /// Number of updates performed
    num_updates: u64
}

/// Breakdown of a single controller update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct PidTerms {
    pub error: f64,
    pub integral: f64,
    pub error_diff: f64,
    pub smoothed_diff: f64,
    pub p_term: f64,
    pub i_term: f64,
    pub d_term: f64,
    pub feedforward: f64,
    pub command: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for PidController {
    fn default() -> Self {
        Self::new(&PidCtrlParams::default())
    }
}

impl PidController {

    /// Create a new controller from the parameters, with all accumulators
    /// zeroed.
    pub fn new(params: &PidCtrlParams) -> Self {
        Self {
            k_p: params.k_p,
            k_i: params.k_i,
            k_d: params.k_d,
            k_ff: params.feedforward_gain,
            integral_limit: params.integral_limit,
            integral: 0f64,
            prev_error: 0f64,
            prev_deriv: 0f64,
            deriv_filter_coeff: params.deriv_filter_coeff,
            adaptive_gain: params.adaptive_gain,
            gain_schedule: params.gain_schedule,
            num_updates: 0
        }
    }

    /// Get the steer command for this cycle.
    ///
    /// Must be called exactly once per control cycle.
    pub fn update(
        &mut self,
        target_lataccel: f64,
        current_lataccel: f64,
        state: &VehicleState,
        future_plan: Option<&FuturePlan>
    ) -> f64 {
        self.update_terms(target_lataccel, current_lataccel, state, future_plan)
            .command
    }

    /// As `update` but returns the breakdown of every term as well as the 
    /// command.
    pub fn update_terms(
        &mut self,
        target_lataccel: f64,
        current_lataccel: f64,
        state: &VehicleState,
        future_plan: Option<&FuturePlan>
    ) -> PidTerms {
        let error = target_lataccel - current_lataccel;

        // Accumulate the integral and apply anti-windup
        self.integral = clamp_sym(&(self.integral + error), &self.integral_limit);

        // Smooth the raw derivative against the previous smoothed value
        let error_diff = error - self.prev_error;
        let smoothed_diff = exp_smooth(
            self.prev_deriv, 
            error_diff, 
            self.deriv_filter_coeff
        );
        self.prev_deriv = smoothed_diff;

        self.prev_error = error;

        // Gain scheduling overwrites the P and I gains in place
        let (gains, _) = select_gains(
            state.v_ego_ms,
            self.adaptive_gain,
            &self.gain_schedule,
            self.gains()
        );
        self.k_p = gains.k_p;
        self.k_i = gains.k_i;

        let feedforward = plan_feedforward(future_plan, self.k_ff);

        let p_term = self.k_p * error;
        let i_term = self.k_i * self.integral;
        let d_term = self.k_d * smoothed_diff;
        let command = p_term + i_term + d_term + feedforward;

        self.num_updates += 1;

        trace!(
            "PidController: err {:.4}, int {:.4}, diff {:.4}, ff {:.4} -> cmd {:.4}",
            error, self.integral, smoothed_diff, feedforward, command
        );

        PidTerms {
            error,
            integral: self.integral,
            error_diff,
            smoothed_diff,
            p_term,
            i_term,
            d_term,
            feedforward,
            command
        }
    }

    /// The current proportional and integral gains.
    pub fn gains(&self) -> Gains {
        Gains { k_p: self.k_p, k_i: self.k_i }
    }

    /// The bucket the current gains would be drawn from at the given speed.
    pub fn gain_bucket(&self, v_ego_ms: f64) -> GainBucket {
        select_gains(v_ego_ms, self.adaptive_gain, &self.gain_schedule, self.gains()).1
    }

    /// The derivative gain.
    pub fn k_d(&self) -> f64 {
        self.k_d
    }

    /// The integral accumulation.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// The anti-windup limit on the integral.
    pub fn integral_limit(&self) -> f64 {
        self.integral_limit
    }

    /// Returns true if the integral is sitting on its limit.
    pub fn is_integral_saturated(&self) -> bool {
        self.integral.abs() >= self.integral_limit
    }

    /// The error from the last update.
    pub fn prev_error(&self) -> f64 {
        self.prev_error
    }

    /// The smoothed derivative from the last update.
    pub fn prev_deriv(&self) -> f64 {
        self.prev_deriv
    }

    /// Returns true until the first call to `update`.
    pub fn is_unstarted(&self) -> bool {
        self.num_updates == 0
    }

    /// Number of updates performed so far.
    pub fn num_updates(&self) -> u64 {
        self.num_updates
    }
}
