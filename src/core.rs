//! Core module defining the main components of the Rusty LIF library.
//!
//! It consists of the following components:
//!
//! - [`params`]: The physical parameter set of a run
//! - [`refractory`]: The refractory gate freezing the membrane after a spike
//! - [`current`]: The input current models (constant and alpha synapse)
//! - [`spike_train`]: The schedule of driving input spikes
//! - [`neuron`]: The neuron, its Euler integrator and spike state machine
//! - [`trace`]: The recorded membrane potential and spike events
//!
//! # Examples
//!
//! ```
//! use rusty_lif::core::{current::CurrentSource, neuron::LIFNeuron, params::Parameters};
//!
//! // Create a neuron at rest, receiving no input
//! let mut neuron = LIFNeuron::build(Parameters::default(), CurrentSource::constant(0.0)).unwrap();
//!
//! // Advance the neuron by 100 steps
//! neuron.run(100);
//!
//! // The membrane stays at rest
//! let trace = neuron.into_trace();
//! assert_eq!(trace.len(), 101);
//! assert!(trace.voltages().iter().all(|&v| v == -0.070));
//! ```
pub mod current;
pub mod neuron;
pub mod params;
pub mod refractory;
pub mod spike_train;
pub mod trace;
