//! Module implementing uniformly sampled analytic signals.
//!
//! An analytic signal is a complex-valued time series whose argument and modulus are the instantaneous phase and
//! amplitude of an underlying real oscillation. Its construction (e.g., via a Hilbert transform) is left to the caller.
//!
//! # Examples
//!
//! ```rust
//! use num_complex::Complex64;
//! use spike_phase::signal::AnalyticSignal;
//! use spike_phase::units::{PotentialUnit, Quantity, TimeUnit};
//!
//! let samples: Vec<Complex64> = (0..100)
//!     .map(|i| Complex64::from_polar(1.0, 0.1 * i as f64))
//!     .collect();
//! let signal = AnalyticSignal::build(
//!     samples,
//!     PotentialUnit::Millivolt,
//!     Quantity::new(0.0, TimeUnit::Millisecond),
//!     Quantity::new(1.0, TimeUnit::Millisecond),
//! )
//! .unwrap();
//!
//! assert_eq!(signal.len(), 100);
//! assert_eq!(signal.t_stop(), Quantity::new(100.0, TimeUnit::Millisecond));
//! assert!((signal.phase_at(5) - 0.5).abs() < 1e-12);
//! ```
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::PhaseError;
use crate::units::{Quantity, TimeUnit, Unit};

/// Represents a complex-valued signal sampled on a uniform time grid.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AnalyticSignal {
    /// The complex samples, one per time step.
    samples: Vec<Complex64>,
    /// The unit of the signal amplitude.
    unit: Unit,
    /// The time of the first sample, in `time_unit`.
    t_start: f64,
    /// The time between two consecutive samples, in `time_unit`.
    sampling_period: f64,
    /// The unit of all times of the signal, inherited from `t_start`.
    time_unit: TimeUnit,
}

impl AnalyticSignal {
    /// Create an analytic signal from its samples, amplitude unit, start time and sampling period.
    /// The sampling period is expressed in the unit of the start time.
    /// The function returns an error if there is no sample, if the times are not expressed in time units, or if the
    /// sampling period is not positive and finite.
    pub fn build(
        samples: Vec<Complex64>,
        unit: impl Into<Unit>,
        t_start: Quantity,
        sampling_period: Quantity,
    ) -> Result<Self, PhaseError> {
        let time_unit = t_start.unit().time_unit().ok_or_else(|| {
            PhaseError::InvalidParameter(format!(
                "The start time must be a time, got {}.",
                t_start
            ))
        })?;

        if !time_unit.is_valid() {
            return Err(PhaseError::InvalidParameter(format!(
                "The time unit {} must have a positive and finite duration.",
                time_unit
            )));
        }

        if sampling_period.unit().time_unit().is_none() {
            return Err(PhaseError::InvalidParameter(format!(
                "The sampling period must be a time, got {}.",
                sampling_period
            )));
        }
        let sampling_period = sampling_period.magnitude_in(time_unit)?;

        if !(sampling_period.is_finite() && sampling_period > 0.0) {
            return Err(PhaseError::InvalidParameter(format!(
                "The sampling period must be positive and finite, got {} {}.",
                sampling_period, time_unit
            )));
        }

        if !t_start.magnitude().is_finite() {
            return Err(PhaseError::InvalidParameter(format!(
                "The start time must be finite, got {}.",
                t_start
            )));
        }

        if samples.is_empty() {
            return Err(PhaseError::InvalidParameter(
                "The signal must have at least one sample.".to_string(),
            ));
        }

        Ok(AnalyticSignal {
            samples,
            unit: unit.into(),
            t_start: t_start.magnitude(),
            sampling_period,
            time_unit,
        })
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the complex samples.
    pub fn samples(&self) -> &[Complex64] {
        &self.samples[..]
    }

    /// Returns the unit of the signal amplitude.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the unit of all times of the signal.
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    /// Returns the time of the first sample.
    pub fn t_start(&self) -> Quantity {
        Quantity::new(self.t_start, self.time_unit)
    }

    /// Returns the (exclusive) end of the signal, i.e., one sampling period after the last sample.
    pub fn t_stop(&self) -> Quantity {
        Quantity::new(self.stop(), self.time_unit)
    }

    /// Returns the sampling period.
    pub fn sampling_period(&self) -> Quantity {
        Quantity::new(self.sampling_period, self.time_unit)
    }

    /// Returns the time of the i-th sample, in the signal time unit.
    pub fn time_at(&self, i: usize) -> f64 {
        self.t_start + i as f64 * self.sampling_period
    }

    /// Returns the times of all samples, in the signal time unit.
    pub fn times(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.time_at(i)).collect()
    }

    /// Returns the instantaneous phase at the i-th sample, in radians in (-pi, pi].
    pub fn phase_at(&self, i: usize) -> f64 {
        self.samples[i].arg()
    }

    /// Returns the instantaneous amplitude at the i-th sample, in the signal unit.
    pub fn amplitude_at(&self, i: usize) -> f64 {
        self.samples[i].norm()
    }

    /// Locate a time (in the signal time unit) on the sampling grid.
    /// Returns the index of the sample at or immediately before the time, together with the relative offset z in
    /// [0, 1) from that sample, or None if the time lies outside [t_start, t_stop).
    pub fn locate(&self, time: f64) -> Option<(usize, f64)> {
        if !(time >= self.t_start && time < self.stop()) {
            return None;
        }

        // The offset is non-negative here, so the truncation is a floor.
        let index = ((time - self.t_start) / self.sampling_period) as usize;
        let index = index.min(self.len() - 1);
        let z = (time - self.time_at(index)) / self.sampling_period;
        Some((index, z))
    }

    fn stop(&self) -> f64 {
        self.t_start + self.len() as f64 * self.sampling_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::PotentialUnit;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn ramp(num_samples: usize, t_start: Quantity, sampling_period: Quantity) -> AnalyticSignal {
        let samples = (0..num_samples)
            .map(|i| Complex64::from_polar(1.0 + i as f64, 0.25 * i as f64))
            .collect();
        AnalyticSignal::build(samples, PotentialUnit::Microvolt, t_start, sampling_period).unwrap()
    }

    #[test]
    fn test_signal_build() {
        let signal = ramp(
            10,
            Quantity::new(2.0, TimeUnit::Second),
            Quantity::new(500.0, TimeUnit::Millisecond),
        );
        assert_eq!(signal.time_unit(), TimeUnit::Second);
        assert_eq!(signal.sampling_period(), Quantity::new(0.5, TimeUnit::Second));
        assert_eq!(signal.t_stop(), Quantity::new(7.0, TimeUnit::Second));
        assert_eq!(signal.times()[..3], [2.0, 2.5, 3.0]);
        assert_eq!(signal.unit(), Unit::Potential(PotentialUnit::Microvolt));
    }

    #[test]
    fn test_signal_build_invalid() {
        let samples = vec![Complex64::new(1.0, 0.0); 4];

        assert!(matches!(
            AnalyticSignal::build(
                samples.clone(),
                Unit::Dimensionless,
                Quantity::new(0.0, TimeUnit::Second),
                Quantity::new(0.0, TimeUnit::Second),
            ),
            Err(PhaseError::InvalidParameter(_))
        ));
        assert!(matches!(
            AnalyticSignal::build(
                samples.clone(),
                Unit::Dimensionless,
                Quantity::new(0.0, PotentialUnit::Volt),
                Quantity::new(1.0, TimeUnit::Second),
            ),
            Err(PhaseError::InvalidParameter(_))
        ));
        assert!(matches!(
            AnalyticSignal::build(
                samples.clone(),
                Unit::Dimensionless,
                Quantity::new(0.0, TimeUnit::Second),
                Quantity::new(1.0, Unit::Dimensionless),
            ),
            Err(PhaseError::InvalidParameter(_))
        ));
        assert!(matches!(
            AnalyticSignal::build(
                vec![],
                PotentialUnit::Millivolt,
                Quantity::new(0.0, TimeUnit::Millisecond),
                Quantity::new(1.0, TimeUnit::Millisecond),
            ),
            Err(PhaseError::InvalidParameter(_))
        ));
        assert!(matches!(
            AnalyticSignal::build(
                samples,
                Unit::Dimensionless,
                Quantity::new(f64::NAN, TimeUnit::Second),
                Quantity::new(1.0, TimeUnit::Second),
            ),
            Err(PhaseError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_phase_amplitude() {
        let signal = ramp(
            20,
            Quantity::new(0.0, TimeUnit::Millisecond),
            Quantity::new(1.0, TimeUnit::Millisecond),
        );
        assert_relative_eq!(signal.phase_at(4), 1.0, epsilon = 1e-12);
        assert_relative_eq!(signal.amplitude_at(4), 5.0, epsilon = 1e-12);

        // The phase is wrapped in (-pi, pi]
        assert_relative_eq!(signal.phase_at(16), 4.0 - 2.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_locate() {
        let signal = ramp(
            10,
            Quantity::new(-1.0, TimeUnit::Millisecond),
            Quantity::new(0.5, TimeUnit::Millisecond),
        );

        // The signal covers [-1.0, 4.0)
        assert_eq!(signal.locate(-1.0), Some((0, 0.0)));
        assert_eq!(signal.locate(-1.25), None);
        assert_eq!(signal.locate(4.0), None);
        assert_eq!(signal.locate(0.0), Some((2, 0.0)));

        let (index, z) = signal.locate(0.125).unwrap();
        assert_eq!(index, 2);
        assert_relative_eq!(z, 0.25, epsilon = 1e-12);

        let (index, z) = signal.locate(3.75).unwrap();
        assert_eq!(index, 9);
        assert_relative_eq!(z, 0.5, epsilon = 1e-12);
    }
}
