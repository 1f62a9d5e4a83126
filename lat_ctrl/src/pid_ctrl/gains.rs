//! Speed based gain scheduling

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::GainSchedule;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Proportional and integral gains in use for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gains {
    pub k_p: f64,
    pub k_i: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Which gains were used by the controller in a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GainBucket {
    /// Gain scheduling is disabled, construction gains are in use.
    Fixed,

    /// Speed at or below the schedule threshold.
    Low,

    /// Speed above the schedule threshold.
    High
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Select the proportional and integral gains for this cycle.
///
/// With scheduling disabled `current` is returned untouched. Otherwise the
/// schedule is a hard step at the threshold, with no hysteresis.
pub fn select_gains(
    v_ego_ms: f64,
    adaptive_enabled: bool,
    schedule: &GainSchedule,
    current: Gains
) -> (Gains, GainBucket) {
    if !adaptive_enabled {
        return (current, GainBucket::Fixed)
    }

    if v_ego_ms > schedule.speed_threshold_ms {
        (
            Gains { k_p: schedule.high_k_p, k_i: schedule.high_k_i },
            GainBucket::High
        )
    }
    else {
        (
            Gains { k_p: schedule.low_k_p, k_i: schedule.low_k_i },
            GainBucket::Low
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CURRENT: Gains = Gains { k_p: 1.0, k_i: 2.0 };

    #[test]
    fn test_select_gains_disabled() {
        let schedule = GainSchedule::default();

        for &v in &[0.0, 30.0, 31.0, 100.0] {
            assert_eq!(
                select_gains(v, false, &schedule, CURRENT),
                (CURRENT, GainBucket::Fixed)
            );
        }
    }

    #[test]
    fn test_select_gains_threshold() {
        let schedule = GainSchedule::default();

        assert_eq!(
            select_gains(31.0, true, &schedule, CURRENT),
            (Gains { k_p: 0.4, k_i: 0.07 }, GainBucket::High)
        );

        // The threshold itself belongs to the low bucket
        assert_eq!(
            select_gains(30.0, true, &schedule, CURRENT),
            (Gains { k_p: 0.3, k_i: 0.05 }, GainBucket::Low)
        );
        assert_eq!(
            select_gains(30.000001, true, &schedule, CURRENT).1,
            GainBucket::High
        );
        assert_eq!(
            select_gains(-5.0, true, &schedule, CURRENT).1,
            GainBucket::Low
        );
    }
}
