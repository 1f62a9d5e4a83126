//! # Replay logs
//!
//! A replay log is a CSV file holding one row per control cycle, with the
//! columns
//!
//! ```text
//! target_lataccel,current_lataccel,roll_lataccel,v_ego,a_ego
//! ```
//!
//! Replaying a log feeds each row through the lateral controller in order,
//! building the future plan for each cycle from the rows that follow it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

// Internal
use crate::pid_ctrl::{FuturePlan, LatCtrlInput, VehicleState};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of cycles covered by the future plan.
pub const FUTURE_PLAN_STEPS: usize = 50;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single cycle of a replay log.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ReplayStep {
    pub target_lataccel: f64,
    pub current_lataccel: f64,
    pub roll_lataccel: f64,
    pub v_ego: f64,
    pub a_ego: f64
}

/// A full replay log.
#[derive(Debug, Clone, Default)]
pub struct Replay {
    steps: Vec<ReplayStep>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur while reading a replay log.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Cannot open the replay log: {0}")]
    OpenError(csv::Error),

    #[error("Cannot parse row {row} of the replay log: {source}")]
    RowError { row: usize, source: csv::Error },

    #[error("The replay log contains no rows")]
    Empty
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Replay {
    /// Load a replay log from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let reader = csv::Reader::from_path(path)
            .map_err(ReplayError::OpenError)?;

        Self::from_csv(reader)
    }

    /// Read a replay log from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReplayError> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, ReplayError> {
        let mut steps: Vec<ReplayStep> = vec![];

        for (i, record) in reader.deserialize().enumerate() {
            match record {
                Ok(s) => steps.push(s),
                Err(source) => return Err(ReplayError::RowError { row: i + 1, source })
            }
        }

        if steps.is_empty() {
            return Err(ReplayError::Empty)
        }

        Ok(Self { steps })
    }

    /// Number of cycles in the log.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the log has no cycles.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The raw steps of the log.
    pub fn steps(&self) -> &[ReplayStep] {
        &self.steps
    }

    /// Build the future plan seen at the given cycle.
    ///
    /// The plan holds up to `horizon` rows following `index`, so it is empty
    /// on the final cycle.
    pub fn future_plan(&self, index: usize, horizon: usize) -> FuturePlan {
        let start = (index + 1).min(self.steps.len());
        let end = (start + horizon).min(self.steps.len());
        let window = &self.steps[start..end];

        FuturePlan {
            lataccel: window.iter().map(|s| s.target_lataccel).collect(),
            roll_lataccel: window.iter().map(|s| s.roll_lataccel).collect(),
            v_ego: window.iter().map(|s| s.v_ego).collect(),
            a_ego: window.iter().map(|s| s.a_ego).collect()
        }
    }

    /// Build the controller input for the given cycle, or `None` if the index
    /// is past the end of the log.
    pub fn input(&self, index: usize) -> Option<LatCtrlInput> {
        let step = self.steps.get(index)?;

        Some(LatCtrlInput {
            target_lataccel: step.target_lataccel,
            current_lataccel: step.current_lataccel,
            state: VehicleState {
                roll_lataccel: step.roll_lataccel,
                v_ego_ms: step.v_ego,
                a_ego_mss: step.a_ego
            },
            future_plan: Some(self.future_plan(index, FUTURE_PLAN_STEPS))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const LOG: &str = "\
target_lataccel,current_lataccel,roll_lataccel,v_ego,a_ego
1.0,0.0,0.01,20.0,0.1
1.5,0.2,0.02,21.0,0.2
2.0,0.5,0.03,22.0,0.3
";

    #[test]
    fn test_from_reader() {
        let replay = Replay::from_reader(LOG.as_bytes()).unwrap();

        assert_eq!(replay.len(), 3);
        assert_eq!(replay.steps()[1], ReplayStep {
            target_lataccel: 1.5,
            current_lataccel: 0.2,
            roll_lataccel: 0.02,
            v_ego: 21.0,
            a_ego: 0.2
        });
    }

    #[test]
    fn test_bad_logs() {
        match Replay::from_reader("target_lataccel,current_lataccel,roll_lataccel,v_ego,a_ego\n".as_bytes()) {
            Err(ReplayError::Empty) => (),
            r => panic!("Expected an empty log error, got {:?}", r)
        }

        let bad = "target_lataccel,current_lataccel,roll_lataccel,v_ego,a_ego\n\
                   1.0,0.0,0.0,20.0,0.0\n\
                   1.0,oops,0.0,20.0,0.0\n";
        match Replay::from_reader(bad.as_bytes()) {
            Err(ReplayError::RowError { row, .. }) => assert_eq!(row, 2),
            r => panic!("Expected a row error, got {:?}", r)
        }
    }

    #[test]
    fn test_future_plan_window() {
        let replay = Replay::from_reader(LOG.as_bytes()).unwrap();

        let plan = replay.future_plan(0, 50);
        assert_eq!(plan.lataccel, vec![1.5, 2.0]);
        assert_eq!(plan.v_ego, vec![21.0, 22.0]);

        let plan = replay.future_plan(0, 1);
        assert_eq!(plan.lataccel, vec![1.5]);

        // Final cycle sees an empty plan
        assert!(replay.future_plan(2, 50).is_empty());
        assert!(replay.future_plan(10, 50).is_empty());
    }

    #[test]
    fn test_input() {
        let replay = Replay::from_reader(LOG.as_bytes()).unwrap();

        let input = replay.input(1).unwrap();
        assert_eq!(input.target_lataccel, 1.5);
        assert_eq!(input.current_lataccel, 0.2);
        assert_eq!(input.state.v_ego_ms, 21.0);
        assert_eq!(input.future_plan.unwrap().lataccel, vec![2.0]);

        assert!(replay.input(3).is_none());
    }
}
