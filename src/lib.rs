//! This crate provides tools for simulating a leaky integrate-and-fire (LIF) neuron in Rust.
//!
//! # Loading Parameters
//!
//! The physical constants of a run are read from a JSON file:
//!
//! ```json
//! {
//!     "v_r": -0.07, "v_thr": -0.054, "v_spike": 0.02, "v_rev": 0.0,
//!     "tau_m": 0.02, "tau_syn": 0.01, "c_m": 1e-9, "g_bar": 1e-7,
//!     "t_r": 0.002, "w": 1.0, "dt": 1e-4
//! }
//! ```
//!
//! See [`core::params::Parameters::load_from`].
//!
//! # Simulating a Neuron
//!
//! ## With a Constant Current
//!
//! ```rust
//! use rusty_lif::core::params::Parameters;
//! use rusty_lif::core::trace::SpikeKind;
//! use rusty_lif::simulator::simulator::{run, Mode, ModeArgs};
//!
//! // Inject 1 nA for 100 ms
//! let trace = run(Parameters::default(), Mode::Current, &ModeArgs::new(100.0)).unwrap();
//!
//! assert_eq!(trace.len(), 1001);
//! assert!(trace.num_spikes(SpikeKind::Output) > 0);
//! ```
//!
//! ## With Input Spikes
//!
//! ```rust
//! use rusty_lif::core::current::Exponential;
//! use rusty_lif::core::params::Parameters;
//! use rusty_lif::simulator::simulator::{run, Mode, ModeArgs};
//!
//! // Drive the neuron at 100 Hz through an alpha synapse, with the Taylor exponential
//! let args = ModeArgs {
//!     spike_rate_hz: 100.0,
//!     exponential: Exponential::Taylor,
//!     ..ModeArgs::new(100.0)
//! };
//! let trace = run(Parameters::default(), Mode::Spike, &args).unwrap();
//!
//! assert_eq!(trace.len(), 1001);
//! assert!(trace.is_chronological());
//! ```

pub mod core;
pub mod error;
pub mod simulator;

/// The smallest time difference considered significant (s).
pub const TIME_RESOLUTION: f64 = 1e-12;
/// Number of milliseconds in a second.
pub const MILLISECONDS_PER_SECOND: f64 = 1000.0;
/// One nanoampere, in amperes.
pub const NANOAMPERE: f64 = 1e-9;
