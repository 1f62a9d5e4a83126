//! Lateral control replay executable entry point.
//!
//! # Usage
//!
//! ```text
//! lat_exec <replay.csv> [params.toml]
//! ```
//!
//! The replay log is fed through the lateral controller one row per cycle.
//! Commands are written to the session's `pid_ctrl.csv` archive along with
//! the breakdown of each term. If no parameter file is given
//! `$LAT_CTRL_SW_ROOT/params/pid_ctrl.toml` is used.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::{WrapErr, eyre}};
use log::{debug, info};
use std::env;
use std::path::PathBuf;

// Internal
use lat_lib::{
    pid_ctrl::LatCtrl,
    replay::Replay
};
use util::{
    module::State,
    logger::{logger_init, LevelFilter},
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Statistics gathered over a replay.
#[derive(Debug, Default)]
struct ReplayStats {
    num_cycles: usize,
    abs_error_sum: f64,
    num_saturated: usize,
    max_abs_cmd: f64
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "lat_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Lateral Control Replay Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- ARGUMENTS ----

    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let (replay_path, params_path) = match args.len() {
        2 => (PathBuf::from(&args[1]), None),
        3 => (PathBuf::from(&args[1]), Some(PathBuf::from(&args[2]))),
        _ => return Err(eyre!(
            "Expected a replay log and optionally a parameter file, found {} arguments",
            args.len() - 1
        ))
    };

    // ---- INITIALISE MODULES ----

    let mut lat_ctrl = LatCtrl::default();
    lat_ctrl.init(params_path, Some(&session))
        .wrap_err("Failed to initialise LatCtrl")?;

    let replay = Replay::load(&replay_path)
        .wrap_err_with(|| format!("Failed to load replay log {:?}", replay_path))?;

    info!("Loaded replay log with {} cycles\n", replay.len());

    // ---- MAIN LOOP ----

    let mut stats = ReplayStats::default();

    for index in 0..replay.len() {
        let input = match replay.input(index) {
            Some(i) => i,
            None => break
        };

        let (cmd, report) = lat_ctrl.proc(&input)
            .wrap_err_with(|| format!("LatCtrl processing failed on cycle {}", index))?;

        stats.num_cycles += 1;
        stats.abs_error_sum += (input.target_lataccel - input.current_lataccel).abs();
        stats.max_abs_cmd = stats.max_abs_cmd.max(cmd.abs());
        if report.integral_saturated {
            stats.num_saturated += 1;
        }
    }

    // ---- SUMMARY ----

    info!("Replay complete");
    info!("    Cycles: {}", stats.num_cycles);
    info!(
        "    Mean absolute error: {:.4} m/s^2", 
        stats.abs_error_sum / stats.num_cycles.max(1) as f64
    );
    info!("    Max absolute command: {:.4}", stats.max_abs_cmd);
    info!("    Cycles with saturated integral: {}", stats.num_saturated);

    Ok(())
}
