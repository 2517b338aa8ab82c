//! Module implementing the recorded membrane potential trace of a run.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::LIFError;
use crate::MILLISECONDS_PER_SECOND;

/// A recorded (time, membrane voltage) pair.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Sample {
    /// Time of the sample (s).
    pub time: f64,
    /// Recorded membrane voltage (V).
    pub voltage: f64,
}

/// The origin of a spike event.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum SpikeKind {
    /// The membrane voltage crossed the threshold.
    Output,
    /// A driving input spike forced an excursion.
    Input,
}

/// A reset of the neuron.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct SpikeEvent {
    pub time: f64,
    pub kind: SpikeKind,
}

/// The chronological record of a run: one sample per step plus the initial sample,
/// and the list of spike events.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    samples: Vec<Sample>,
    spikes: Vec<SpikeEvent>,
}

impl Trace {
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.samples.reserve(additional);
    }

    pub(crate) fn push(&mut self, time: f64, voltage: f64) {
        self.samples.push(Sample { time, voltage });
    }

    pub(crate) fn push_spike(&mut self, time: f64, kind: SpikeKind) {
        self.spikes.push(SpikeEvent { time, kind });
    }

    /// Returns the recorded samples, in chronological order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples[..]
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no sample has been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the sample times (s).
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.time).collect()
    }

    /// Returns the sample times (ms), the axis used for plotting.
    pub fn times_ms(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|sample| sample.time * MILLISECONDS_PER_SECOND)
            .collect()
    }

    /// Returns the recorded membrane voltages (V).
    pub fn voltages(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.voltage).collect()
    }

    /// Returns the spike events, in chronological order.
    pub fn spikes(&self) -> &[SpikeEvent] {
        &self.spikes[..]
    }

    /// Returns the number of spike events of the specified kind.
    pub fn num_spikes(&self, kind: SpikeKind) -> usize {
        self.spikes.iter().filter(|spike| spike.kind == kind).count()
    }

    /// Returns the times between consecutive spike events (s).
    pub fn inter_spike_intervals(&self) -> Vec<f64> {
        self.spikes
            .iter()
            .tuple_windows()
            .map(|(s1, s2)| s2.time - s1.time)
            .collect()
    }

    /// Returns the mean firing rate over the trace duration (Hz), counting all spike events.
    pub fn firing_rate(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) if last.time > first.time => {
                self.spikes.len() as f64 / (last.time - first.time)
            }
            _ => 0.0,
        }
    }

    /// Returns true if the sample times are strictly increasing.
    pub fn is_chronological(&self) -> bool {
        self.samples
            .iter()
            .tuple_windows()
            .all(|(s1, s2)| s1.time < s2.time)
    }

    /// Save the trace to a JSON file, for plotting by an external tool.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), LIFError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn toy_trace() -> Trace {
        let mut trace = Trace::default();
        trace.push(0.0, -0.07);
        trace.push(0.001, -0.06);
        trace.push(0.002, 0.02);
        trace.push_spike(0.002, SpikeKind::Output);
        trace.push(0.003, -0.07);
        trace.push(0.004, 0.02);
        trace.push_spike(0.004, SpikeKind::Input);
        trace
    }

    #[test]
    fn test_trace_accessors() {
        let trace = toy_trace();
        assert_eq!(trace.len(), 5);
        assert!(!trace.is_empty());
        assert_eq!(trace.voltages(), vec![-0.07, -0.06, 0.02, -0.07, 0.02]);
        assert_relative_eq!(trace.times_ms()[2], 2.0);
        assert_eq!(trace.num_spikes(SpikeKind::Output), 1);
        assert_eq!(trace.num_spikes(SpikeKind::Input), 1);
        assert!(trace.is_chronological());
    }

    #[test]
    fn test_trace_statistics() {
        let trace = toy_trace();
        let isis = trace.inter_spike_intervals();
        assert_eq!(isis.len(), 1);
        assert_relative_eq!(isis[0], 0.002);
        assert_relative_eq!(trace.firing_rate(), 500.0);

        assert_eq!(Trace::default().firing_rate(), 0.0);
        assert!(Trace::default().inter_spike_intervals().is_empty());
    }

    #[test]
    fn test_trace_not_chronological() {
        let mut trace = Trace::default();
        trace.push(0.0, 0.0);
        trace.push(0.0, 0.0);
        assert!(!trace.is_chronological());
    }

    #[test]
    fn test_trace_save_to() {
        let trace = toy_trace();
        let file = NamedTempFile::new().unwrap();
        trace.save_to(file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let loaded: Trace = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded, trace);
    }
}
