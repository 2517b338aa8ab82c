use approx::assert_relative_eq;
use std::io::Write;
use tempfile::NamedTempFile;

use rusty_lif::core::current::{taylor_exp, Exponential};
use rusty_lif::core::params::Parameters;
use rusty_lif::core::trace::SpikeKind;
use rusty_lif::error::LIFError;
use rusty_lif::simulator::simulator::{run, Mode, ModeArgs};

fn unit_params() -> Parameters {
    Parameters {
        v_r: 0.0,
        v_thr: 1.0,
        v_spike: 2.0,
        tau_m: 0.02,
        c_m: 1e-9,
        dt: 1e-4,
        t_r: 0.0,
        ..Parameters::default()
    }
}

#[test]
fn test_trace_length_is_mode_independent() {
    let params = Parameters::default();
    for duration_ms in [0.1, 1.0, 12.34, 100.0, 250.0] {
        let expected = (duration_ms / 1000.0 / params.dt + 1e-9).floor() as usize + 1;
        let args = ModeArgs::new(duration_ms);

        let current_trace = run(params.clone(), Mode::Current, &args).unwrap();
        let spike_trace = run(params.clone(), Mode::Spike, &args).unwrap();

        assert_eq!(current_trace.len(), expected, "duration = {} ms", duration_ms);
        assert_eq!(spike_trace.len(), expected, "duration = {} ms", duration_ms);
        assert!(current_trace.is_chronological());
        assert!(spike_trace.is_chronological());
    }
}

#[test]
fn test_trace_starts_at_rest() {
    let params = Parameters::default();
    for mode in [Mode::Current, Mode::Spike] {
        let trace = run(params.clone(), mode, &ModeArgs::new(10.0)).unwrap();
        assert_eq!(trace.samples()[0].time, 0.0);
        assert_eq!(trace.samples()[0].voltage, params.v_r);
        assert_relative_eq!(trace.samples()[1].time, params.dt);
    }
}

#[test]
fn test_zero_current_is_flat() {
    let params = Parameters::default();
    let args = ModeArgs { current_na: 0.0, ..ModeArgs::new(200.0) };
    let trace = run(params.clone(), Mode::Current, &args).unwrap();

    assert!(trace.voltages().iter().all(|&v| v == params.v_r));
    assert!(trace.spikes().is_empty());
    assert_eq!(trace.firing_rate(), 0.0);
}

#[test]
fn test_single_crossing_matches_closed_form() {
    let params = unit_params();
    let current = 100e-9;

    // Below threshold, the Euler trace is V_k = V_inf * (1 - (1 - dt / tau_m)^k).
    let v_inf = current * params.tau_m / params.c_m;
    let decay = 1.0 - params.dt / params.tau_m;
    let crossing_step = (1..)
        .find(|&k| v_inf * (1.0 - decay.powi(k)) > params.v_thr)
        .unwrap() as usize;

    // Long enough for one crossing, too short for a second one.
    let duration_ms = (crossing_step + crossing_step / 2) as f64 * params.dt * 1000.0;
    let args = ModeArgs { current_na: 100.0, ..ModeArgs::new(duration_ms) };
    let trace = run(params.clone(), Mode::Current, &args).unwrap();

    assert_eq!(trace.spikes().len(), 1);
    assert_eq!(trace.spikes()[0].kind, SpikeKind::Output);

    let voltages = trace.voltages();
    assert_eq!(voltages[crossing_step], params.v_spike);
    for k in 1..crossing_step {
        assert_relative_eq!(voltages[k], v_inf * (1.0 - decay.powi(k as i32)), epsilon = 1e-12);
    }
    assert!(voltages[crossing_step + 1] < params.v_thr);
}

#[test]
fn test_constant_current_fires_regularly() {
    let params = Parameters::default();
    let trace = run(params.clone(), Mode::Current, &ModeArgs::new(500.0)).unwrap();

    assert!(trace.num_spikes(SpikeKind::Output) > 2);
    assert_eq!(trace.num_spikes(SpikeKind::Input), 0);

    // After the first spike, the neuron restarts from rest every time: intervals are equal up to
    // one step.
    let isis = trace.inter_spike_intervals();
    for isi in isis.iter() {
        assert!((isi - isis[0]).abs() <= params.dt + 1e-12);
        assert!(*isi > params.t_r);
    }
}

#[test]
fn test_spike_mode_resets() {
    let params = Parameters::default();
    let args = ModeArgs { spike_rate_hz: 200.0, ..ModeArgs::new(300.0) };
    let trace = run(params.clone(), Mode::Spike, &args).unwrap();

    assert!(!trace.spikes().is_empty());
    let voltages = trace.voltages();
    let times = trace.times();
    for spike in trace.spikes() {
        let index = times
            .iter()
            .position(|&t| t == spike.time)
            .expect("every spike has a sample");
        assert_eq!(voltages[index], params.v_spike);
        if let Some(&next) = voltages.get(index + 1) {
            assert_eq!(next, params.v_r);
        }
    }
    assert!(voltages.iter().all(|&v| v <= params.v_thr || v == params.v_spike));
}

#[test]
fn test_taylor_matches_exact_in_operating_range() {
    let params = Parameters::default();
    let rate = 200.0;

    // The kernel argument never exceeds one input interval (plus one step) over tau_syn.
    let max_argument = (1.0 / rate + params.dt) / params.tau_syn;
    for i in 0..=100 {
        let x = -max_argument * i as f64 / 100.0;
        assert!((taylor_exp(x) - x.exp()).abs() < 1e-3);
    }

    let exact = ModeArgs { spike_rate_hz: rate, ..ModeArgs::new(200.0) };
    let taylor = ModeArgs { exponential: Exponential::Taylor, ..exact.clone() };
    let exact_trace = run(params.clone(), Mode::Spike, &exact).unwrap();
    let taylor_trace = run(params, Mode::Spike, &taylor).unwrap();

    assert_eq!(exact_trace.spikes().len(), taylor_trace.spikes().len());
    for (v1, v2) in exact_trace.voltages().iter().zip(taylor_trace.voltages().iter()) {
        assert_relative_eq!(v1, v2, epsilon = 1e-6);
    }
}

#[test]
fn test_runs_are_deterministic() {
    let params = Parameters::default();
    for mode in [Mode::Current, Mode::Spike] {
        let args = ModeArgs { exponential: Exponential::Taylor, ..ModeArgs::new(150.0) };
        let trace_1 = run(params.clone(), mode, &args).unwrap();
        let trace_2 = run(params.clone(), mode, &args).unwrap();

        assert_eq!(trace_1, trace_2);
        assert_eq!(
            serde_json::to_vec(&trace_1).unwrap(),
            serde_json::to_vec(&trace_2).unwrap()
        );
    }
}

#[test]
fn test_run_from_parameter_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"v_r": -0.065, "v_thr": -0.05, "v_spike": 0.03, "v_rev": 0.0,
            "tao_m": 0.01, "tao_syn": 0.005, "c_m": 2e-10, "g_bar": 5e-8,
            "t_r": 0.001, "w": 1.0, "dt": 5e-5}}"#
    )
    .unwrap();

    let params = Parameters::load_from(file.path()).unwrap();
    let trace = run(params, Mode::Current, &ModeArgs::new(50.0)).unwrap();
    assert_eq!(trace.len(), 1001);
    assert!(trace.num_spikes(SpikeKind::Output) > 0);
}

#[test]
fn test_configuration_errors() {
    assert_eq!(
        "voltage".parse::<Mode>(),
        Err(LIFError::InvalidMode("voltage".to_string()))
    );
    assert!(matches!(
        Exponential::from_toggle(3),
        Err(LIFError::InvalidToggle(_))
    ));
    assert!(matches!(
        Parameters::load_from("does/not/exist.json"),
        Err(LIFError::IOError(_))
    ));
}
