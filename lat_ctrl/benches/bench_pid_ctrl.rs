//! # PID Controller Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lat_lib::pid_ctrl::{FuturePlan, PidController, PidCtrlParams, VehicleState};

fn pid_ctrl_benchmark(c: &mut Criterion) {
    // ---- Build the controller and inputs ----

    let params = PidCtrlParams {
        adaptive_gain: true,
        ..Default::default()
    };
    let mut ctrl = PidController::new(&params);

    let state = VehicleState {
        roll_lataccel: 0.05,
        v_ego_ms: 29.5,
        a_ego_mss: 0.2
    };

    let plan = FuturePlan {
        lataccel: (0..50).map(|i| (i as f64 * 0.1).sin()).collect(),
        ..Default::default()
    };

    // ---- Benchmark ----

    c.bench_function("pid_ctrl_update", |b| b.iter(|| {
        ctrl.update(
            black_box(1.2), 
            black_box(0.8), 
            black_box(&state), 
            black_box(Some(&plan))
        )
    }));

    c.bench_function("pid_ctrl_update_no_plan", |b| b.iter(|| {
        ctrl.update(
            black_box(1.2), 
            black_box(0.8), 
            black_box(&state), 
            black_box(None)
        )
    }));
}

criterion_group!(benches, pid_ctrl_benchmark);
criterion_main!(benches);
