//! Module implementing the schedule of driving input spikes.

use serde::{Deserialize, Serialize};

use crate::error::LIFError;
use crate::TIME_RESOLUTION;

/// The maximum number of input spikes in a schedule.
pub const MAX_NUM_SPIKES: usize = 10_000_000;

/// A regular train of input spikes, firing at times `k / rate` within `[0, duration)`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SpikeSchedule {
    rate: f64,
    firing_times: Vec<f64>,
}

impl SpikeSchedule {
    /// Create a spike schedule with the specified rate (Hz) over the specified duration (s).
    /// The function returns an error for non-positive or non-finite rates and durations, and when
    /// the schedule would hold more than [`MAX_NUM_SPIKES`] spikes.
    pub fn build(rate: f64, duration: f64) -> Result<Self, LIFError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(LIFError::InvalidArgument(format!(
                "spike rate must be positive and finite, got {}",
                rate
            )));
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(LIFError::InvalidArgument(format!(
                "spike schedule duration must be positive and finite, got {}",
                duration
            )));
        }
        if rate * duration > MAX_NUM_SPIKES as f64 {
            return Err(LIFError::InvalidArgument(format!(
                "spike rate of {} Hz over {} s exceeds {} input spikes",
                rate, duration, MAX_NUM_SPIKES
            )));
        }

        let firing_times = (0_u64..)
            .map(|k| k as f64 / rate)
            .take_while(|&t| t < duration - TIME_RESOLUTION)
            .collect();

        Ok(SpikeSchedule { rate, firing_times })
    }

    /// Returns the rate of the schedule (Hz).
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the time between two consecutive input spikes (s).
    pub fn interval(&self) -> f64 {
        1.0 / self.rate
    }

    /// Returns the firing times of the schedule.
    pub fn firing_times(&self) -> &[f64] {
        &self.firing_times[..]
    }

    /// Returns the number of input spikes in the schedule.
    pub fn num_spikes(&self) -> usize {
        self.firing_times.len()
    }

    /// Returns the index of the latest spike due at time `t`, searching from index `from` on.
    /// Spikes are due once `t` reaches their firing time, up to the time resolution.
    pub fn due(&self, from: usize, t: f64) -> Option<usize> {
        let num_due = self.firing_times[from.min(self.firing_times.len())..]
            .iter()
            .take_while(|&&ft| ft <= t + TIME_RESOLUTION)
            .count();
        match num_due {
            0 => None,
            n => Some(from + n - 1),
        }
    }
}
