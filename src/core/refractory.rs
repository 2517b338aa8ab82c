//! Refractory gate of the integrator.

/// Returns the refractory gate value at time `t`, given the time `t_s` of the last spike
/// and the refractory period `t_r`.
///
/// The gate is a Heaviside step: it is 0 (voltage update suppressed) when
/// `t - t_s - t_r <= 0` and 1 otherwise. The end of the refractory period is itself
/// refractory.
pub fn gate(t: f64, t_s: f64, t_r: f64) -> f64 {
    if t - t_s - t_r <= 0.0 {
        0.0
    } else {
        1.0
    }
}

/// Returns true if the neuron is still refractory at time `t`.
pub fn is_refractory(t: f64, t_s: f64, t_r: f64) -> bool {
    gate(t, t_s, t_r) == 0.0
}
