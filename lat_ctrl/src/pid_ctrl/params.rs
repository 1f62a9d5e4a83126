//! Lateral PID controller parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the lateral acceleration PID controller.
///
/// All fields may be omitted from a parameter file, in which case the tuned
/// defaults are used.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PidCtrlParams {

    // ---- GAINS ----

    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain.
    ///
    /// Negative in the tuned set, which damps the smoothed error rate.
    pub k_d: f64,

    /// Feedforward gain applied to the nearest future plan target.
    pub feedforward_gain: f64,

    // ---- INTEGRAL ----

    /// Symmetric limit on the integral accumulator (anti-windup).
    ///
    /// Units: (m/s^2) cycles
    pub integral_limit: f64,

    // ---- DERIVATIVE ----

    /// Weight given to the previous smoothed derivative, in `[0, 1)`.
    pub deriv_filter_coeff: f64,

    // ---- GAIN SCHEDULING ----

    /// If true the proportional and integral gains are selected from
    /// `gain_schedule` each cycle based on vehicle speed.
    pub adaptive_gain: bool,

    /// Speed based gain schedule, only used if `adaptive_gain` is set.
    pub gain_schedule: GainSchedule
}

/// Two bucket speed schedule for the proportional and integral gains.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GainSchedule {
    /// Speed above which the high speed gains are used. A speed exactly equal
    /// to the threshold uses the low speed gains.
    ///
    /// Units: meters/second
    pub speed_threshold_ms: f64,

    /// Proportional gain at or below the threshold
    pub low_k_p: f64,

    /// Integral gain at or below the threshold
    pub low_k_i: f64,

    /// Proportional gain above the threshold
    pub high_k_p: f64,

    /// Integral gain above the threshold
    pub high_k_i: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised when validating controller parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("The integral limit must be positive and finite, found {0}")]
    InvalidIntegralLimit(f64),

    #[error("The derivative filter coefficient must be in [0, 1), found {0}")]
    InvalidFilterCoeff(f64)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for PidCtrlParams {
    fn default() -> Self {
        Self {
            k_p: 0.3,
            k_i: 0.05,
            k_d: -0.1,
            feedforward_gain: 0.1,
            integral_limit: 10.0,
            deriv_filter_coeff: 0.9,
            adaptive_gain: false,
            gain_schedule: GainSchedule::default()
        }
    }
}

impl Default for GainSchedule {
    fn default() -> Self {
        Self {
            speed_threshold_ms: 30.0,
            low_k_p: 0.3,
            low_k_i: 0.05,
            high_k_p: 0.4,
            high_k_i: 0.07
        }
    }
}

impl PidCtrlParams {
    /// Check that the parameters describe a usable controller.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.integral_limit.is_finite() && self.integral_limit > 0.0) {
            return Err(ParamsError::InvalidIntegralLimit(self.integral_limit))
        }

        if !(0.0..1.0).contains(&self.deriv_filter_coeff) {
            return Err(ParamsError::InvalidFilterCoeff(self.deriv_filter_coeff))
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let params = PidCtrlParams::default();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.k_d, -0.1);
        assert!(!params.adaptive_gain);
    }

    #[test]
    fn test_validate() {
        let mut params = PidCtrlParams::default();
        params.integral_limit = 0.0;
        assert_eq!(params.validate(), Err(ParamsError::InvalidIntegralLimit(0.0)));

        params.integral_limit = -1.0;
        assert_eq!(params.validate(), Err(ParamsError::InvalidIntegralLimit(-1.0)));

        let mut params = PidCtrlParams::default();
        params.deriv_filter_coeff = 1.0;
        assert_eq!(params.validate(), Err(ParamsError::InvalidFilterCoeff(1.0)));

        params.deriv_filter_coeff = 0.0;
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn test_partial_toml() {
        let params: PidCtrlParams = toml::from_str(
            "adaptive_gain = true\n\
             \n\
             [gain_schedule]\n\
             speed_threshold_ms = 25.0\n"
        ).unwrap();

        assert!(params.adaptive_gain);
        assert_eq!(params.k_p, 0.3);
        assert_eq!(params.gain_schedule.speed_threshold_ms, 25.0);
        assert_eq!(params.gain_schedule.high_k_i, 0.07);
    }

    #[test]
    fn test_shipped_params_file() {
        let params: PidCtrlParams = toml::from_str(
            include_str!("../../../params/pid_ctrl.toml")
        ).unwrap();

        assert_eq!(params, PidCtrlParams::default());
    }
}
