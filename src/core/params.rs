//! Module implementing the physical parameter set of a simulation run.
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::LIFError;

/// The physical constants of a simulation run, in SI units.
///
/// A parameter set is loaded once before a run and never mutated while stepping.
/// The default values describe a cortical-like neuron that fires under the default
/// 1 nA input current.
#[derive(Derivative, Debug, PartialEq, Clone, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    /// Resting potential (V).
    #[derivative(Default(value = "-0.070"))]
    pub v_r: f64,
    /// Spike threshold (V).
    #[derivative(Default(value = "-0.054"))]
    pub v_thr: f64,
    /// Amplitude recorded at a spike (V).
    #[derivative(Default(value = "0.020"))]
    pub v_spike: f64,
    /// Synaptic reversal potential (V).
    #[derivative(Default(value = "0.0"))]
    pub v_rev: f64,
    /// Membrane time constant (s).
    #[serde(alias = "tao_m")]
    #[derivative(Default(value = "0.020"))]
    pub tau_m: f64,
    /// Synaptic time constant (s).
    #[serde(alias = "tao_syn")]
    #[derivative(Default(value = "0.010"))]
    pub tau_syn: f64,
    /// Membrane capacitance (F).
    #[derivative(Default(value = "1e-9"))]
    pub c_m: f64,
    /// Peak synaptic conductance (S).
    #[derivative(Default(value = "1e-7"))]
    pub g_bar: f64,
    /// Refractory period (s).
    #[derivative(Default(value = "0.002"))]
    pub t_r: f64,
    /// Synaptic weight.
    #[derivative(Default(value = "1.0"))]
    pub w: f64,
    /// Integration time step (s).
    #[derivative(Default(value = "1e-4"))]
    pub dt: f64,
}

impl Parameters {
    /// Check the invariants the integrator relies on.
    /// The function returns an error for non-finite values, non-positive time constants,
    /// capacitance or time step, and negative refractory periods.
    pub fn validate(&self) -> Result<(), LIFError> {
        let fields = [
            ("v_r", self.v_r),
            ("v_thr", self.v_thr),
            ("v_spike", self.v_spike),
            ("v_rev", self.v_rev),
            ("tau_m", self.tau_m),
            ("tau_syn", self.tau_syn),
            ("c_m", self.c_m),
            ("g_bar", self.g_bar),
            ("t_r", self.t_r),
            ("w", self.w),
            ("dt", self.dt),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(LIFError::InvalidParameter(format!("{} must be finite", name)));
        }

        for (name, value) in [
            ("tau_m", self.tau_m),
            ("tau_syn", self.tau_syn),
            ("c_m", self.c_m),
            ("dt", self.dt),
        ] {
            if value <= 0.0 {
                return Err(LIFError::InvalidParameter(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.t_r < 0.0 {
            return Err(LIFError::InvalidParameter(format!(
                "t_r must be non-negative, got {}",
                self.t_r
            )));
        }

        Ok(())
    }

    /// Load a parameter set from a JSON file and check its invariants.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, LIFError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| LIFError::IOError(format!("{}: {}", path.display(), e)))?;
        let reader = BufReader::new(file);
        let params: Parameters = serde_json::from_reader(reader)?;
        params.validate()?;
        log::debug!("Parameters loaded from {}: {:?}", path.display(), params);
        Ok(params)
    }

    /// Save the parameter set to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), LIFError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
