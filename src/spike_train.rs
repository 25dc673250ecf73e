//! Module implementing the concept of a spike train.
//!
//! A spike train is a sorted collection of firing times, expressed in a [`TimeUnit`], observed over a validity
//! window `[t_start, t_stop)`. Firing times falling outside of the window are kept in storage but are not part of the
//! logical spike train.
use serde::{Deserialize, Serialize};

use crate::error::PhaseError;
use crate::units::{Quantity, TimeUnit};

/// Represents a spike train recorded over a right half-open time window.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SpikeTrain {
    /// The (sorted) firing times, in `unit`.
    firing_times: Vec<f64>,
    /// The unit of all times of the spike train.
    unit: TimeUnit,
    /// The (inclusive) start of the window.
    t_start: f64,
    /// The (exclusive) end of the window.
    t_stop: f64,
}

impl SpikeTrain {
    /// Create a spike train with the specified parameters.
    /// If necessary, the firing times are sorted.
    /// The function returns an error for non-finite firing times, an invalid unit or an empty window.
    pub fn build(
        firing_times: &[f64],
        unit: TimeUnit,
        t_start: f64,
        t_stop: f64,
    ) -> Result<Self, PhaseError> {
        if !unit.is_valid() {
            return Err(PhaseError::InvalidParameter(format!(
                "The time unit {} must have a positive and finite duration.",
                unit
            )));
        }

        if !(t_start.is_finite() && t_stop.is_finite() && t_start < t_stop) {
            return Err(PhaseError::InvalidParameter(format!(
                "The spike train window [{}, {}) must be finite and non-empty.",
                t_start, t_stop
            )));
        }

        if let Some(t) = firing_times.iter().find(|t| !t.is_finite()) {
            return Err(PhaseError::InvalidParameter(format!(
                "The firing times must be finite, got {}.",
                t
            )));
        }

        let mut firing_times = firing_times.to_vec();
        firing_times.sort_by(|t1, t2| t1.total_cmp(t2));

        Ok(SpikeTrain {
            firing_times,
            unit,
            t_start,
            t_stop,
        })
    }

    /// Returns the firing times within the window `[t_start, t_stop)`, in the spike train unit.
    pub fn firing_times(&self) -> &[f64] {
        let start = self.firing_times.partition_point(|t| *t < self.t_start);
        let end = self.firing_times.partition_point(|t| *t < self.t_stop);
        &self.firing_times[start..end]
    }

    /// Returns all stored firing times, including the ones outside the window.
    pub fn raw_firing_times(&self) -> &[f64] {
        &self.firing_times[..]
    }

    /// Returns the number of spikes in the window.
    pub fn num_spikes(&self) -> usize {
        self.firing_times().len()
    }

    /// Returns the unit of the spike train.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns the start of the window.
    pub fn t_start(&self) -> Quantity {
        Quantity::new(self.t_start, self.unit)
    }

    /// Returns the end of the window.
    pub fn t_stop(&self) -> Quantity {
        Quantity::new(self.t_stop, self.unit)
    }

    /// Returns the duration of the window.
    pub fn duration(&self) -> Quantity {
        Quantity::new(self.t_stop - self.t_start, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spike_train_build() {
        // Test valid spike train with unsorted firing times
        let spike_train = SpikeTrain::build(&[0.0, 5.0, 2.0], TimeUnit::Millisecond, 0.0, 10.0).unwrap();
        assert_eq!(spike_train.firing_times(), &[0.0, 2.0, 5.0]);
        assert_eq!(spike_train.unit(), TimeUnit::Millisecond);

        // Test empty spike train
        let spike_train = SpikeTrain::build(&[], TimeUnit::Second, 0.0, 1.0).unwrap();
        assert_eq!(spike_train.firing_times(), &[] as &[f64]);
        assert_eq!(spike_train.num_spikes(), 0);

        // Test invalid spike train (NaN values)
        let spike_train = SpikeTrain::build(&[0.0, 5.0, f64::NAN], TimeUnit::Second, 0.0, 10.0);
        assert!(matches!(spike_train, Err(PhaseError::InvalidParameter(_))));

        // Test invalid window
        let spike_train = SpikeTrain::build(&[0.0], TimeUnit::Second, 1.0, 1.0);
        assert!(matches!(spike_train, Err(PhaseError::InvalidParameter(_))));
        let spike_train = SpikeTrain::build(&[0.0], TimeUnit::Second, 0.0, f64::INFINITY);
        assert!(matches!(spike_train, Err(PhaseError::InvalidParameter(_))));

        // Test invalid unit
        let spike_train = SpikeTrain::build(&[0.0], TimeUnit::Ticks { rate: 0.0 }, 0.0, 1.0);
        assert!(matches!(spike_train, Err(PhaseError::InvalidParameter(_))));
    }

    #[test]
    fn test_spike_train_window() {
        let spike_train =
            SpikeTrain::build(&[-1.0, 0.0, 3.0, 9.5, 10.0, 12.0], TimeUnit::Second, 0.0, 10.0).unwrap();

        // The window is closed on the left and open on the right
        assert_eq!(spike_train.firing_times(), &[0.0, 3.0, 9.5]);
        assert_eq!(spike_train.num_spikes(), 3);
        assert_eq!(spike_train.raw_firing_times().len(), 6);
        assert_eq!(spike_train.duration(), Quantity::new(10.0, TimeUnit::Second));
    }
}
