//! Input current models driving the neuron.
//!
//! Two models are available:
//! - [`ConstantCurrent`]: a fixed injected current,
//! - [`AlphaSynapse`]: a conductance-based synapse with an alpha-shaped kernel, whose exponential
//!   term is evaluated either exactly or with a 10th-order Taylor polynomial (see [`Exponential`]).
//!
//! The models are gathered in the closed [`CurrentSource`] enum, chosen once before a run.
use crate::core::neuron::NeuronState;
use crate::core::params::Parameters;
use crate::error::LIFError;
use crate::NANOAMPERE;

/// Order of the Taylor polynomial approximating the exponential.
pub const TAYLOR_ORDER: usize = 10;

/// A model of the current entering the neuron.
pub trait CurrentModel {
    /// Returns the instantaneous current (A) for the given neuron state.
    fn current(&self, state: &NeuronState) -> f64;
}

/// Returns the 10th-order Taylor polynomial of `e^x` centered at 0, i.e., the sum of `x^k / k!`
/// for `k = 0, ..., 10`.
///
/// The approximation is only meant for the small negative arguments produced by the alpha kernel
/// shortly after an input spike. Far from 0 it diverges from the exponential.
pub fn taylor_exp(x: f64) -> f64 {
    (1..=TAYLOR_ORDER)
        .rev()
        .fold(1.0, |acc, k| 1.0 + x * acc / k as f64)
}

/// The evaluator used for the exponential term of the alpha kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Exponential {
    /// The exponential function.
    #[default]
    Exact,
    /// The 10th-order Taylor approximation, see [`taylor_exp`].
    Taylor,
}

impl Exponential {
    /// Select the evaluator from a 0/1 toggle (1 selects the Taylor approximation).
    pub fn from_toggle(toggle: u8) -> Result<Self, LIFError> {
        match toggle {
            0 => Ok(Exponential::Exact),
            1 => Ok(Exponential::Taylor),
            other => Err(LIFError::InvalidToggle(other.to_string())),
        }
    }

    /// Evaluate `e^x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Exponential::Exact => x.exp(),
            Exponential::Taylor => taylor_exp(x),
        }
    }
}

/// Returns the alpha-synapse current
/// `w * g_bar * (v_rev - v_m) * ((t - t0) / tau_syn) * e^(-(t - t0) / tau_syn)`,
/// where `t0` is the onset of the driving input spike.
/// The kernel is causal: the current vanishes for `t <= t0`.
#[allow(clippy::too_many_arguments)]
pub fn alpha_synapse_current(
    w: f64,
    g_bar: f64,
    v_rev: f64,
    v_m: f64,
    t: f64,
    t0: f64,
    tau_syn: f64,
    exponential: Exponential,
) -> f64 {
    let elapsed = t - t0;
    if elapsed <= 0.0 {
        return 0.0;
    }
    let x = elapsed / tau_syn;
    w * g_bar * (v_rev - v_m) * x * exponential.eval(-x)
}

/// A constant injected current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCurrent {
    amperes: f64,
}

impl ConstantCurrent {
    /// Create a constant current from a value in amperes.
    pub fn new(amperes: f64) -> Self {
        ConstantCurrent { amperes }
    }

    /// Create a constant current from a value in nanoamperes.
    pub fn from_nanoamps(nanoamps: f64) -> Self {
        ConstantCurrent::new(nanoamps * NANOAMPERE)
    }

    /// Returns the current in amperes.
    pub fn amperes(&self) -> f64 {
        self.amperes
    }
}

impl CurrentModel for ConstantCurrent {
    fn current(&self, _state: &NeuronState) -> f64 {
        self.amperes
    }
}

/// A conductance-based synapse with an alpha kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaSynapse {
    /// Synaptic weight.
    pub weight: f64,
    /// Peak conductance (S).
    pub g_bar: f64,
    /// Reversal potential (V).
    pub v_rev: f64,
    /// Synaptic time constant (s).
    pub tau_syn: f64,
}

impl AlphaSynapse {
    /// Create the synapse described by the parameter set.
    pub fn from_params(params: &Parameters) -> Self {
        AlphaSynapse {
            weight: params.w,
            g_bar: params.g_bar,
            v_rev: params.v_rev,
            tau_syn: params.tau_syn,
        }
    }

    /// Returns the synaptic current for the given state, using the provided exponential evaluator.
    /// No current flows before the first input spike has arrived.
    pub fn current_with(&self, state: &NeuronState, exponential: Exponential) -> f64 {
        match state.last_input_time() {
            Some(t0) => alpha_synapse_current(
                self.weight,
                self.g_bar,
                self.v_rev,
                state.membrane_voltage(),
                state.time(),
                t0,
                self.tau_syn,
                exponential,
            ),
            None => 0.0,
        }
    }
}

/// The closed set of current models available to the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrentSource {
    /// A constant injected current.
    Constant(ConstantCurrent),
    /// An alpha synapse with the exact exponential.
    AlphaExact(AlphaSynapse),
    /// An alpha synapse with the Taylor approximation of the exponential.
    AlphaTaylor(AlphaSynapse),
}

impl CurrentSource {
    /// Create a constant current source from a value in nanoamperes.
    pub fn constant(nanoamps: f64) -> Self {
        CurrentSource::Constant(ConstantCurrent::from_nanoamps(nanoamps))
    }

    /// Create an alpha-synapse current source from the parameter set.
    pub fn alpha(params: &Parameters, exponential: Exponential) -> Self {
        let synapse = AlphaSynapse::from_params(params);
        match exponential {
            Exponential::Exact => CurrentSource::AlphaExact(synapse),
            Exponential::Taylor => CurrentSource::AlphaTaylor(synapse),
        }
    }
}

impl CurrentModel for CurrentSource {
    fn current(&self, state: &NeuronState) -> f64 {
        match self {
            CurrentSource::Constant(source) => source.current(state),
            CurrentSource::AlphaExact(synapse) => synapse.current_with(state, Exponential::Exact),
            CurrentSource::AlphaTaylor(synapse) => synapse.current_with(state, Exponential::Taylor),
        }
    }
}
