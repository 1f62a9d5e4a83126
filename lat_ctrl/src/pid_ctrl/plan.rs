//! Vehicle state and future plan inputs, and the plan feedforward

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Snapshot of the vehicle state for the current cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Lateral acceleration due to road roll
    ///
    /// Units: meters/second^2
    pub roll_lataccel: f64,

    /// Forward speed of the vehicle
    ///
    /// Units: meters/second
    pub v_ego_ms: f64,

    /// Forward acceleration of the vehicle
    ///
    /// Units: meters/second^2
    pub a_ego_mss: f64
}

/// The planned trajectory for the upcoming cycles.
///
/// Element `n` of each sequence is the plan for `n + 1` cycles ahead. The
/// sequences are expected to have equal lengths, though only `lataccel` is
/// used by the controller.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturePlan {
    /// Target lateral accelerations
    pub lataccel: Vec<f64>,

    /// Road roll lateral accelerations
    pub roll_lataccel: Vec<f64>,

    /// Forward speeds
    pub v_ego: Vec<f64>,

    /// Forward accelerations
    pub a_ego: Vec<f64>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FuturePlan {
    /// Number of cycles covered by the plan.
    pub fn len(&self) -> usize {
        self.lataccel.len()
    }

    /// Returns true if the plan contains no targets.
    pub fn is_empty(&self) -> bool {
        self.lataccel.is_empty()
    }

    /// The nearest planned lateral acceleration, if any.
    pub fn next_lataccel(&self) -> Option<f64> {
        self.lataccel.first().copied()
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the feedforward contribution of the future plan.
///
/// Only the nearest planned target is used. An absent or empty plan gives no
/// feedforward.
pub fn plan_feedforward(future_plan: Option<&FuturePlan>, gain: f64) -> f64 {
    match future_plan.and_then(FuturePlan::next_lataccel) {
        Some(lataccel) => gain * lataccel,
        None => 0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_plan_feedforward_gating() {
        assert_eq!(plan_feedforward(None, 0.1), 0.0);
        assert_eq!(plan_feedforward(Some(&FuturePlan::default()), 0.1), 0.0);
    }

    #[test]
    fn test_plan_feedforward_uses_first_only() {
        let plan = FuturePlan {
            lataccel: vec![2.0, 5.0, -100.0],
            ..Default::default()
        };

        assert!((plan_feedforward(Some(&plan), 0.1) - 0.2).abs() < 1e-12);

        let plan = FuturePlan {
            lataccel: vec![2.0],
            ..Default::default()
        };

        assert!((plan_feedforward(Some(&plan), 0.1) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_plan_accessors() {
        let plan = FuturePlan {
            lataccel: vec![0.5, 0.6],
            roll_lataccel: vec![0.0, 0.0],
            v_ego: vec![20.0, 20.1],
            a_ego: vec![0.1, 0.1]
        };

        assert_eq!(plan.len(), 2);
        assert!(!plan.is_empty());
        assert_eq!(plan.next_lataccel(), Some(0.5));
        assert_eq!(FuturePlan::default().next_lataccel(), None);
    }
}
