//! Module extracting the phase and amplitude of analytic signals at spike times.
//!
//! Signals and spike trains are paired according to their numbers (see [`Pairing`]); for every pair, each spike
//! falling within the signal `[t_start, t_stop)` yields one [`PhaseSample`].
//!
//! # Examples
//!
//! ```rust
//! use num_complex::Complex64;
//! use spike_phase::extraction::spike_triggered_phase;
//! use spike_phase::signal::AnalyticSignal;
//! use spike_phase::spike_train::SpikeTrain;
//! use spike_phase::units::{PotentialUnit, Quantity, TimeUnit};
//! use std::f64::consts::PI;
//!
//! // A 20 Hz oscillation sampled at 1 kHz during 1 s
//! let samples = (0..1000)
//!     .map(|i| Complex64::from_polar(1.0, 2.0 * PI * 20.0 * i as f64 * 1e-3 - PI / 2.0))
//!     .collect();
//! let signal = AnalyticSignal::build(
//!     samples,
//!     PotentialUnit::Millivolt,
//!     Quantity::new(0.0, TimeUnit::Millisecond),
//!     Quantity::new(1.0, TimeUnit::Millisecond),
//! )
//! .unwrap();
//!
//! // One spike at every trough of the oscillation
//! let times: Vec<f64> = (1..20).map(|k| 50.0 * k as f64).collect();
//! let spike_train = SpikeTrain::build(&times, TimeUnit::Millisecond, 0.0, 1000.0).unwrap();
//!
//! let results = spike_triggered_phase(&[signal], &[spike_train], true).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].len(), 19);
//! assert!(results[0].phases().iter().all(|phase| (phase + PI / 2.0).abs() < 1e-6));
//! ```
use itertools::izip;
use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::PhaseError;
use crate::signal::AnalyticSignal;
use crate::spike_train::SpikeTrain;
use crate::units::{TimeUnit, Unit};
use crate::MIN_PARALLEL_PAIRS;

/// The strategy used to pair signals with spike trains.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Pairing {
    /// Signals and spike trains are matched by position.
    OneToOne { num_pairs: usize },
    /// Every spike train is compared to the single signal.
    OneSignalManyTrains { num_spike_trains: usize },
    /// The single spike train is compared to every signal.
    ManySignalsOneTrain { num_signals: usize },
}

impl Pairing {
    /// Select the pairing strategy from the numbers of signals and spike trains.
    /// Returns an error if any of the two is zero, or if they differ while none of them is one.
    pub fn select(num_signals: usize, num_spike_trains: usize) -> Result<Pairing, PhaseError> {
        if num_signals == 0 || num_spike_trains == 0 {
            return Err(PhaseError::InvalidArgument(format!(
                "At least one signal and one spike train are required, got {} signal(s) and {} spike train(s).",
                num_signals, num_spike_trains
            )));
        }

        if num_signals == 1 {
            Ok(Pairing::OneSignalManyTrains { num_spike_trains })
        } else if num_spike_trains == 1 {
            Ok(Pairing::ManySignalsOneTrain { num_signals })
        } else if num_signals == num_spike_trains {
            Ok(Pairing::OneToOne {
                num_pairs: num_signals,
            })
        } else {
            Err(PhaseError::InvalidArgument(format!(
                "The number of signals ({}) and spike trains ({}) must match, or either of the two must be one.",
                num_signals, num_spike_trains
            )))
        }
    }

    /// Returns the number of compared pairs, i.e., the number of results.
    pub fn num_pairs(&self) -> usize {
        match self {
            Pairing::OneToOne { num_pairs } => *num_pairs,
            Pairing::OneSignalManyTrains { num_spike_trains } => *num_spike_trains,
            Pairing::ManySignalsOneTrain { num_signals } => *num_signals,
        }
    }

    /// Returns the (signal, spike train) index of the n-th pair.
    pub fn pair(&self, n: usize) -> (usize, usize) {
        match self {
            Pairing::OneToOne { .. } => (n, n),
            Pairing::OneSignalManyTrains { .. } => (0, n),
            Pairing::ManySignalsOneTrain { .. } => (n, 0),
        }
    }

    /// Returns an iterator over the (signal, spike train) indices of all pairs, in output order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_pairs()).map(move |n| self.pair(n))
    }
}

/// The phase and amplitude of a signal at a spike time.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseSample {
    /// The instantaneous phase, in radians in (-pi, pi].
    pub phase: f64,
    /// The instantaneous amplitude, in the signal unit.
    pub amplitude: f64,
    /// The spike time, in the spike train unit.
    pub time: f64,
}

/// The spike-triggered phases, amplitudes and times of one (signal, spike train) pair.
/// The three sequences are index-aligned.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SpikeTriggeredPhases {
    phases: Vec<f64>,
    amplitudes: Vec<f64>,
    amplitude_unit: Unit,
    times: Vec<f64>,
    time_unit: TimeUnit,
}

impl SpikeTriggeredPhases {
    fn with_capacity(capacity: usize, amplitude_unit: Unit, time_unit: TimeUnit) -> Self {
        SpikeTriggeredPhases {
            phases: Vec::with_capacity(capacity),
            amplitudes: Vec::with_capacity(capacity),
            amplitude_unit,
            times: Vec::with_capacity(capacity),
            time_unit,
        }
    }

    fn push(&mut self, sample: PhaseSample) {
        self.phases.push(sample.phase);
        self.amplitudes.push(sample.amplitude);
        self.times.push(sample.time);
    }

    /// Returns the number of retained spikes.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Returns true if no spike was retained.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Returns the spike-triggered phases, in radians.
    pub fn phases(&self) -> &[f64] {
        &self.phases[..]
    }

    /// Returns the spike-triggered amplitudes, in [`Self::amplitude_unit`].
    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes[..]
    }

    /// Returns the unit of the amplitudes, i.e., the unit of the signal.
    pub fn amplitude_unit(&self) -> Unit {
        self.amplitude_unit
    }

    /// Returns the spike times, in [`Self::time_unit`].
    pub fn times(&self) -> &[f64] {
        &self.times[..]
    }

    /// Returns the unit of the times, i.e., the unit of the spike train.
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    /// Returns the spike times expressed in another time unit.
    pub fn times_in(&self, unit: TimeUnit) -> Vec<f64> {
        self.times
            .iter()
            .map(|&t| self.time_unit.convert(t, unit))
            .collect()
    }

    /// Returns an iterator over the (phase, amplitude, time) samples.
    pub fn samples(&self) -> impl Iterator<Item = PhaseSample> + '_ {
        izip!(self.phases.iter(), self.amplitudes.iter(), self.times.iter()).map(
            |(&phase, &amplitude, &time)| PhaseSample {
                phase,
                amplitude,
                time,
            },
        )
    }
}

/// Calculate the spike-triggered phases and amplitudes of analytic signals.
///
/// The signals and spike trains are paired according to [`Pairing::select`], and one result is returned per pair,
/// in pairing order. Only spikes within `[t_start, t_stop)` of the compared signal are retained.
/// If `interpolate` is true, the phase (on the unit circle) and the amplitude of a spike falling between two samples
/// are interpolated; otherwise, the sample at or immediately before the spike is used.
///
/// Returns an error, before any computation, if the signals and spike trains cannot be paired.
pub fn spike_triggered_phase(
    signals: &[AnalyticSignal],
    spike_trains: &[SpikeTrain],
    interpolate: bool,
) -> Result<Vec<SpikeTriggeredPhases>, PhaseError> {
    let pairing = Pairing::select(signals.len(), spike_trains.len())?;
    log::debug!(
        "Extracting spike-triggered phases of {} pair(s) with {:?} (interpolate: {})",
        pairing.num_pairs(),
        pairing,
        interpolate
    );

    let extract = |(signal_id, spike_train_id): (usize, usize)| {
        extract_pair(&signals[signal_id], &spike_trains[spike_train_id], interpolate)
    };

    if pairing.num_pairs() >= MIN_PARALLEL_PAIRS {
        (0..pairing.num_pairs())
            .into_par_iter()
            .map(|n| extract(pairing.pair(n)))
            .collect()
    } else {
        pairing.pairs().map(extract).collect()
    }
}

/// Extract the spike-triggered phases of a single (signal, spike train) pair.
fn extract_pair(
    signal: &AnalyticSignal,
    spike_train: &SpikeTrain,
    interpolate: bool,
) -> Result<SpikeTriggeredPhases, PhaseError> {
    let (from, to) = (spike_train.unit(), signal.time_unit());
    let firing_times = spike_train.firing_times();

    let mut result = SpikeTriggeredPhases::with_capacity(
        firing_times.len(),
        signal.unit(),
        spike_train.unit(),
    );

    for &time in firing_times {
        if let Some((index, z)) = signal.locate(from.convert(time, to)) {
            let (phase, amplitude) = match interpolate && index + 1 < signal.len() {
                true => interpolate_at(signal, index, z),
                false => (signal.phase_at(index), signal.amplitude_at(index)),
            };
            result.push(PhaseSample {
                phase,
                amplitude,
                time,
            });
        }
    }

    log::trace!(
        "Retained {} out of {} spike(s) within [{}, {})",
        result.len(),
        firing_times.len(),
        signal.t_start(),
        signal.t_stop()
    );

    Ok(result)
}

/// Interpolate the phase on the unit circle and the amplitude linearly between the samples `index` and `index + 1`.
fn interpolate_at(signal: &AnalyticSignal, index: usize, z: f64) -> (f64, f64) {
    if z == 0.0 {
        return (signal.phase_at(index), signal.amplitude_at(index));
    }

    let (p1, p2) = (signal.phase_at(index), signal.phase_at(index + 1));
    let interpolation = Complex64::from_polar(1.0 - z, p1) + Complex64::from_polar(z, p2);
    let amplitude = (1.0 - z) * signal.amplitude_at(index) + z * signal.amplitude_at(index + 1);
    (interpolation.arg(), amplitude)
}
