//! Module implementing the leaky integrate-and-fire neuron and its spike state machine.
//!
//! The membrane potential follows `dV/dt = -(V - v_r) / tau_m + I / c_m`, integrated with the
//! explicit Euler method and frozen by the refractory gate after every reset.

use crate::core::current::{CurrentModel, CurrentSource};
use crate::core::params::Parameters;
use crate::core::refractory;
use crate::core::spike_train::SpikeSchedule;
use crate::core::trace::{SpikeKind, Trace};
use crate::error::LIFError;

/// The evolving state of a neuron during a run.
#[derive(Debug, PartialEq, Clone)]
pub struct NeuronState {
    time: f64,
    membrane_voltage: f64,
    last_spike_time: f64,
    last_input_time: Option<f64>,
}

impl NeuronState {
    fn new(v_r: f64) -> Self {
        NeuronState {
            time: 0.0,
            membrane_voltage: v_r,
            last_spike_time: 0.0,
            last_input_time: None,
        }
    }

    /// Returns the simulation clock (s).
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the membrane voltage (V).
    pub fn membrane_voltage(&self) -> f64 {
        self.membrane_voltage
    }

    /// Returns the time of the last reset (s). A run starts as if the neuron had been reset at 0.
    pub fn last_spike_time(&self) -> f64 {
        self.last_spike_time
    }

    /// Returns the onset of the most recent driving input spike (s), if any has arrived.
    pub fn last_input_time(&self) -> Option<f64> {
        self.last_input_time
    }
}

/// The phase of the spike state machine, derived from the refractory gate.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NeuronPhase {
    /// The membrane integrates its input.
    Integrating,
    /// The membrane voltage is frozen.
    Refractory,
}

/// Driving input spikes delivered to the neuron.
///
/// Every arrival restarts the alpha kernel. An arrival also forces a spike when the neuron has
/// been quiet for longer than the refractory period plus the minimum spacing.
#[derive(Debug, PartialEq, Clone)]
pub struct InputDrive {
    schedule: SpikeSchedule,
    next: usize,
    min_spacing: f64,
}

impl InputDrive {
    /// Create an input drive from a schedule and a minimum spacing (s) between a reset and a
    /// forced input spike.
    /// The function returns an error for negative or non-finite spacings.
    pub fn build(schedule: SpikeSchedule, min_spacing: f64) -> Result<Self, LIFError> {
        if !(min_spacing.is_finite() && min_spacing >= 0.0) {
            return Err(LIFError::InvalidArgument(format!(
                "minimum spacing must be non-negative and finite, got {}",
                min_spacing
            )));
        }
        Ok(InputDrive {
            schedule,
            next: 0,
            min_spacing,
        })
    }

    /// Returns the schedule of input spikes.
    pub fn schedule(&self) -> &SpikeSchedule {
        &self.schedule
    }

    /// Returns the minimum spacing (s).
    pub fn min_spacing(&self) -> f64 {
        self.min_spacing
    }

    /// Consume the input spikes due at time `t` and return the onset of the latest one.
    fn receive(&mut self, t: f64) -> Option<f64> {
        let latest = self.schedule.due(self.next, t)?;
        self.next = latest + 1;
        Some(self.schedule.firing_times()[latest])
    }
}

/// A leaky integrate-and-fire neuron advanced with fixed time steps.
#[derive(Debug, Clone)]
pub struct LIFNeuron {
    params: Parameters,
    source: CurrentSource,
    drive: Option<InputDrive>,
    state: NeuronState,
    num_steps: usize,
    trace: Trace,
}

impl LIFNeuron {
    /// Create a neuron at rest with the specified parameters and current source.
    /// The trace starts with the initial sample `(0, v_r)`.
    /// The function returns an error if the parameters violate their invariants.
    pub fn build(params: Parameters, source: CurrentSource) -> Result<Self, LIFError> {
        params.validate()?;

        let state = NeuronState::new(params.v_r);
        let mut trace = Trace::default();
        trace.push(state.time, state.membrane_voltage);

        Ok(LIFNeuron {
            params,
            source,
            drive: None,
            state,
            num_steps: 0,
            trace,
        })
    }

    /// Attach driving input spikes to the neuron.
    pub fn with_input_drive(mut self, drive: InputDrive) -> Self {
        self.drive = Some(drive);
        self
    }

    /// Reserve room in the trace for the specified number of additional steps.
    pub fn reserve(&mut self, num_steps: usize) {
        self.trace.reserve(num_steps);
    }

    /// Returns the parameters of the neuron.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Returns the current source of the neuron.
    pub fn source(&self) -> &CurrentSource {
        &self.source
    }

    /// Returns the state of the neuron.
    pub fn state(&self) -> &NeuronState {
        &self.state
    }

    /// Returns the number of steps taken so far.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the trace recorded so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consume the neuron and return its trace.
    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Returns the phase the neuron will be in at the next step.
    pub fn phase(&self) -> NeuronPhase {
        let next_time = (self.num_steps + 1) as f64 * self.params.dt;
        if refractory::is_refractory(next_time, self.state.last_spike_time, self.params.t_r) {
            NeuronPhase::Refractory
        } else {
            NeuronPhase::Integrating
        }
    }

    /// Advance the neuron by one time step and record the resulting sample.
    /// Returns the kind of spike emitted during the step, if any.
    ///
    /// A step proceeds as follows:
    /// 1. the clock advances by `dt` and due input spikes are registered,
    /// 2. the membrane voltage is updated with one gated Euler step,
    /// 3. at most one spike event fires: a threshold crossing takes precedence over a forced
    ///    input spike, and both record `v_spike`, reset the voltage to `v_r` and restart the
    ///    refractory clock at the current time.
    pub fn step(&mut self) -> Option<SpikeKind> {
        self.num_steps += 1;
        self.state.time = self.num_steps as f64 * self.params.dt;

        let time = self.state.time;
        let input_due = match self.drive.as_mut().and_then(|drive| drive.receive(time)) {
            Some(onset) => {
                self.state.last_input_time = Some(onset);
                true
            }
            None => false,
        };

        let current = self.source.current(&self.state);
        self.integrate(current);

        let spike = if self.state.membrane_voltage > self.params.v_thr {
            Some(SpikeKind::Output)
        } else if input_due && self.allows_forced_spike() {
            self.state.membrane_voltage = self.params.v_spike;
            Some(SpikeKind::Input)
        } else {
            None
        };

        match spike {
            Some(kind) => self.fire(kind),
            None => self.trace.push(self.state.time, self.state.membrane_voltage),
        }

        spike
    }

    /// Step the neuron the specified number of times.
    pub fn run(&mut self, num_steps: usize) {
        self.reserve(num_steps);
        for _ in 0..num_steps {
            self.step();
        }
    }

    fn integrate(&mut self, current: f64) {
        let gate = refractory::gate(self.state.time, self.state.last_spike_time, self.params.t_r);
        let dv = -(self.state.membrane_voltage - self.params.v_r) / self.params.tau_m
            + current / self.params.c_m;
        self.state.membrane_voltage += self.params.dt * dv * gate;
    }

    fn allows_forced_spike(&self) -> bool {
        match &self.drive {
            Some(drive) => {
                self.state.time - self.state.last_spike_time - self.params.t_r > drive.min_spacing
            }
            None => false,
        }
    }

    fn fire(&mut self, kind: SpikeKind) {
        let time = self.state.time;
        log::debug!("{:?} spike at t={}", kind, time);

        self.trace.push(time, self.params.v_spike);
        self.trace.push_spike(time, kind);
        self.state.membrane_voltage = self.params.v_r;
        self.state.last_spike_time = time;
    }
}
