//! Simulation driver for a single LIF neuron.
//!
//! The [`simulator`] module selects the input model from the mode, builds the neuron and steps it
//! from time 0 to the end time.
//!
//! # Example
//! ```rust
//! use rusty_lif::core::params::Parameters;
//! use rusty_lif::simulator::simulator::{run, Mode, ModeArgs};
//!
//! // Inject 2 nA for 50 ms
//! let args = ModeArgs { current_na: 2.0, ..ModeArgs::new(50.0) };
//! let trace = run(Parameters::default(), Mode::Current, &args).unwrap();
//!
//! // One sample per step of 0.1 ms, plus the initial sample
//! assert_eq!(trace.len(), 501);
//! ```

pub mod simulator;

/// The default injected current (nA).
pub const DEFAULT_CURRENT: f64 = 1.0;
/// The default input spike rate (Hz).
pub const DEFAULT_SPIKE_RATE: f64 = 50.0;
/// The default minimum quiet time before a forced input spike, in units of the input interval.
pub const DEFAULT_MIN_SPACING_FACTOR: f64 = 10.0;
/// Tolerance (in steps) when converting the end time into a number of steps.
pub const STEP_TOLERANCE: f64 = 1e-9;
/// The maximum number of steps of a run. The trace holds one sample per step.
pub const MAX_NUM_STEPS: usize = 100_000_000;
