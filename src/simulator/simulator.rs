//! This module contains the simulation modes and the driver running a neuron to the end time.
//!
use std::fmt;
use std::str::FromStr;

use crate::core::current::{CurrentSource, Exponential};
use crate::core::neuron::{InputDrive, LIFNeuron};
use crate::core::params::Parameters;
use crate::core::spike_train::SpikeSchedule;
use crate::core::trace::{SpikeKind, Trace};
use crate::error::LIFError;
use crate::MILLISECONDS_PER_SECOND;

use super::{
    DEFAULT_CURRENT, DEFAULT_MIN_SPACING_FACTOR, DEFAULT_SPIKE_RATE, MAX_NUM_STEPS, STEP_TOLERANCE,
};

/// The input driving the neuron.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    /// A constant injected current.
    Current,
    /// A regular train of input spikes through an alpha synapse.
    Spike,
}

impl FromStr for Mode {
    type Err = LIFError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Mode::Current),
            "spike" => Ok(Mode::Spike),
            other => Err(LIFError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Current => write!(f, "current"),
            Mode::Spike => write!(f, "spike"),
        }
    }
}

/// The arguments of a run. Only the fields relevant to the selected mode are used.
#[derive(Debug, PartialEq, Clone)]
pub struct ModeArgs {
    /// Simulation duration (ms).
    pub duration_ms: f64,
    /// Injected current in current mode (nA).
    pub current_na: f64,
    /// Input spike rate in spike mode (Hz).
    pub spike_rate_hz: f64,
    /// Evaluator of the alpha kernel exponential in spike mode.
    pub exponential: Exponential,
    /// Minimum quiet time before an input spike forces a spike, in units of the input interval.
    pub min_spacing_factor: f64,
}

impl ModeArgs {
    /// Create run arguments for the specified duration (ms), with default values elsewhere.
    pub fn new(duration_ms: f64) -> Self {
        ModeArgs {
            duration_ms,
            current_na: DEFAULT_CURRENT,
            spike_rate_hz: DEFAULT_SPIKE_RATE,
            exponential: Exponential::default(),
            min_spacing_factor: DEFAULT_MIN_SPACING_FACTOR,
        }
    }

    /// Returns the simulation end time (s).
    pub fn end_time(&self) -> f64 {
        self.duration_ms / MILLISECONDS_PER_SECOND
    }
}

/// A neuron prepared to run from time 0 to the end time.
#[derive(Debug, Clone)]
pub struct Simulation {
    mode: Mode,
    neuron: LIFNeuron,
    num_steps: usize,
}

impl Simulation {
    /// Prepare a run with the specified parameters, mode and arguments.
    /// The function returns an error for invalid parameters or arguments; no step is taken.
    pub fn build(params: Parameters, mode: Mode, args: &ModeArgs) -> Result<Self, LIFError> {
        params.validate()?;

        if !(args.duration_ms.is_finite() && args.duration_ms > 0.0) {
            return Err(LIFError::InvalidArgument(format!(
                "duration must be positive and finite, got {} ms",
                args.duration_ms
            )));
        }
        let end_time = args.end_time();
        let num_steps = (end_time / params.dt + STEP_TOLERANCE).floor();
        if num_steps > MAX_NUM_STEPS as f64 {
            return Err(LIFError::InvalidArgument(format!(
                "duration of {} ms requires {} steps of {} s, at most {} are allowed",
                args.duration_ms, num_steps, params.dt, MAX_NUM_STEPS
            )));
        }
        let num_steps = num_steps as usize;

        let neuron = match mode {
            Mode::Current => {
                if !args.current_na.is_finite() {
                    return Err(LIFError::InvalidArgument(format!(
                        "current must be finite, got {} nA",
                        args.current_na
                    )));
                }
                LIFNeuron::build(params, CurrentSource::constant(args.current_na))?
            }
            Mode::Spike => {
                if !(args.min_spacing_factor.is_finite() && args.min_spacing_factor >= 0.0) {
                    return Err(LIFError::InvalidArgument(format!(
                        "minimum spacing factor must be non-negative and finite, got {}",
                        args.min_spacing_factor
                    )));
                }
                let schedule = SpikeSchedule::build(args.spike_rate_hz, end_time)?;
                let min_spacing = args.min_spacing_factor * schedule.interval();
                let drive = InputDrive::build(schedule, min_spacing)?;
                let source = CurrentSource::alpha(&params, args.exponential);
                LIFNeuron::build(params, source)?.with_input_drive(drive)
            }
        };

        log::info!(
            "Simulation ready: {} mode, {} steps of {} s up to {} s",
            mode,
            num_steps,
            neuron.params().dt,
            end_time
        );

        Ok(Simulation {
            mode,
            neuron,
            num_steps,
        })
    }

    /// Returns the mode of the run.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the number of steps of the run.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the neuron before the run.
    pub fn neuron(&self) -> &LIFNeuron {
        &self.neuron
    }

    /// Run the neuron to the end time and return its trace.
    pub fn run(mut self) -> Trace {
        self.neuron.run(self.num_steps);
        let trace = self.neuron.into_trace();
        log::info!(
            "Simulation done: {} samples, {} output spikes, {} input spikes",
            trace.len(),
            trace.num_spikes(SpikeKind::Output),
            trace.num_spikes(SpikeKind::Input)
        );
        trace
    }
}

/// Run a neuron with the specified parameters, mode and arguments, and return its trace.
/// The trace holds the initial sample plus one sample per step.
pub fn run(params: Parameters, mode: Mode, args: &ModeArgs) -> Result<Trace, LIFError> {
    Ok(Simulation::build(params, mode, args)?.run())
}
