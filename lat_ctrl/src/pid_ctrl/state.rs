//! Lateral control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;
use util::{
    archive::{Archived, Archiver},
    module::State,
    params,
    session::Session
};

// Internal
use super::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default parameter file, relative to the software root's params directory.
pub const DEFAULT_PARAMS_FILE: &str = "pid_ctrl.toml";

/// Archive file, relative to the session's archive directory.
pub const ARCHIVE_FILE: &str = "pid_ctrl.csv";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Lateral control module, wrapping the PID controller.
#[derive(Default)]
pub struct LatCtrl {
    params: PidCtrlParams,

    controller: PidController,

    report: StatusReport,

    /// Tuning data for the last cycle, written to the archive
    tuning_output: TuningOutput,

    arch: Archiver
}

/// Input data for a single cycle.
#[derive(Debug, Clone, Default)]
pub struct LatCtrlInput {
    /// Target lateral acceleration for this cycle
    pub target_lataccel: f64,

    /// Measured lateral acceleration for this cycle
    pub current_lataccel: f64,

    /// Vehicle state snapshot
    pub state: VehicleState,

    /// Upcoming targets, if a plan is available
    pub future_plan: Option<FuturePlan>
}

/// Status report for a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    /// Gains used for the cycle
    pub gain_bucket: GainBucket,

    /// True if the integral is held at its anti-windup limit
    pub integral_saturated: bool,

    /// Feedforward contribution to the command
    pub feedforward: f64
}

/// Per-cycle record written to the tuning archive.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct TuningOutput {
    pub cycle: u64,
    pub target_lataccel: f64,
    pub current_lataccel: f64,
    pub v_ego_ms: f64,
    pub k_p: f64,
    pub k_i: f64,
    pub error: f64,
    pub integral: f64,
    pub smoothed_diff: f64,
    pub p_term: f64,
    pub i_term: f64,
    pub d_term: f64,
    pub feedforward: f64,
    pub command: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur during processing of the module.
#[derive(Debug, thiserror::Error)]
pub enum LatCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(params::LoadError),

    #[error("Invalid parameters: {0}")]
    InvalidParams(ParamsError),

    #[error("Could not create the archive: {0}")]
    ArchiveInitError(String),

    #[error("Could not write to the archive: {0}")]
    ArchiveWriteError(String)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            gain_bucket: GainBucket::Fixed,
            integral_saturated: false,
            feedforward: 0.0
        }
    }
}

impl LatCtrl {
    /// Build the module from an already loaded parameter set, without any
    /// archiving.
    pub fn with_params(params: PidCtrlParams) -> Result<Self, LatCtrlError> {
        params.validate().map_err(LatCtrlError::InvalidParams)?;

        Ok(Self {
            controller: PidController::new(&params),
            params,
            ..Default::default()
        })
    }

    /// The parameters in use.
    pub fn params(&self) -> &PidCtrlParams {
        &self.params
    }

    /// The underlying controller.
    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    /// Tuning data from the last cycle.
    pub fn tuning_output(&self) -> &TuningOutput {
        &self.tuning_output
    }
}

impl State for LatCtrl {
    /// Explicit path to a parameter file. If `None` the default file is loaded
    /// from the software root.
    type InitData = Option<PathBuf>;
    type InitError = LatCtrlError;

    type InputData = LatCtrlInput;
    type OutputData = f64;
    type StatusReport = StatusReport;
    type ProcError = LatCtrlError;

    fn init(
        &mut self, 
        init_data: Self::InitData, 
        session: Option<&Session>
    ) -> Result<(), Self::InitError> {
        // Load the parameters
        let params: PidCtrlParams = match init_data {
            Some(path) => params::load_path::<PidCtrlParams, _>(path),
            None => params::load::<PidCtrlParams>(DEFAULT_PARAMS_FILE)
        }.map_err(LatCtrlError::ParamLoadError)?;

        *self = Self::with_params(params)?;

        if let Some(session) = session {
            self.arch = Archiver::from_path(session, ARCHIVE_FILE)
                .map_err(|e| LatCtrlError::ArchiveInitError(e.to_string()))?;
        }

        info!("LatCtrl initialised");
        debug!("LatCtrl params: {:#?}", self.params);

        Ok(())
    }

    fn proc(
        &mut self, 
        input_data: &Self::InputData
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let prev_report = self.report;

        let terms = self.controller.update_terms(
            input_data.target_lataccel,
            input_data.current_lataccel,
            &input_data.state,
            input_data.future_plan.as_ref()
        );

        self.report = StatusReport {
            gain_bucket: self.controller.gain_bucket(input_data.state.v_ego_ms),
            integral_saturated: self.controller.is_integral_saturated(),
            feedforward: terms.feedforward
        };

        if self.report.gain_bucket != prev_report.gain_bucket {
            debug!(
                "LatCtrl gain bucket changed {:?} -> {:?} at {:.2} m/s",
                prev_report.gain_bucket, 
                self.report.gain_bucket, 
                input_data.state.v_ego_ms
            );
        }
        if self.report.integral_saturated && !prev_report.integral_saturated {
            debug!("LatCtrl integral saturated at {:.3}", terms.integral);
        }

        let gains = self.controller.gains();
        self.tuning_output = TuningOutput {
            cycle: self.controller.num_updates(),
            target_lataccel: input_data.target_lataccel,
            current_lataccel: input_data.current_lataccel,
            v_ego_ms: input_data.state.v_ego_ms,
            k_p: gains.k_p,
            k_i: gains.k_i,
            error: terms.error,
            integral: terms.integral,
            smoothed_diff: terms.smoothed_diff,
            p_term: terms.p_term,
            i_term: terms.i_term,
            d_term: terms.d_term,
            feedforward: terms.feedforward,
            command: terms.command
        };

        self.write()
            .map_err(|e| LatCtrlError::ArchiveWriteError(e.to_string()))?;

        Ok((terms.command, self.report))
    }
}

impl Archived for LatCtrl {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.arch.serialise(self.tuning_output)
    }
}
