//! This crate provides tools for spike-field phase analysis in Rust.
//!
//! # Extracting Spike-Triggered Phases
//!
//! Given analytic signals (e.g., the output of a Hilbert transform of a band-passed local field potential) and spike
//! trains, the instantaneous phase and amplitude of the signals are read out at every spike time.
//!
//! ```rust
//! use num_complex::Complex64;
//! use spike_phase::extraction::spike_triggered_phase;
//! use spike_phase::signal::AnalyticSignal;
//! use spike_phase::spike_train::SpikeTrain;
//! use spike_phase::units::{PotentialUnit, Quantity, TimeUnit};
//! use std::f64::consts::PI;
//!
//! // A 10 Hz oscillation sampled at 1 kHz during 2 s, starting at phase 0
//! let samples = (0..2000)
//!     .map(|i| Complex64::from_polar(2.0, 2.0 * PI * 10.0 * i as f64 * 1e-3))
//!     .collect();
//! let signal = AnalyticSignal::build(
//!     samples,
//!     PotentialUnit::Microvolt,
//!     Quantity::new(0.0, TimeUnit::Second),
//!     Quantity::new(1.0, TimeUnit::Millisecond),
//! )
//! .unwrap();
//!
//! // Two spike trains, in milliseconds, compared to the same signal
//! let spike_trains = vec![
//!     SpikeTrain::build(&[100.0, 200.0, 300.0], TimeUnit::Millisecond, 0.0, 2000.0).unwrap(),
//!     SpikeTrain::build(&[125.0, 1925.0], TimeUnit::Millisecond, 0.0, 2000.0).unwrap(),
//! ];
//!
//! let results = spike_triggered_phase(&[signal], &spike_trains, true).unwrap();
//! assert_eq!(results.len(), 2);
//! assert!(results[0].phases().iter().all(|phase| phase.abs() < 1e-6));
//! assert!((results[1].phases()[0] - PI / 2.0).abs() < 1e-6);
//! assert!(results[1].amplitudes().iter().all(|amplitude| (amplitude - 2.0).abs() < 1e-9));
//! ```
//!
//! # Measuring Phase Consistency
//!
//! The pairwise phase consistency quantifies how concentrated the spike-triggered phases are.
//!
//! ```rust
//! use spike_phase::ppc::{pairwise_phase_consistency, PpcMethod};
//!
//! let locked = vec![0.5, 0.52, 0.48, 0.5];
//! let scattered = vec![0.5, 2.0, -2.5, -1.0];
//!
//! let ppc_locked = pairwise_phase_consistency(&[locked], PpcMethod::Ppc0).unwrap();
//! let ppc_scattered = pairwise_phase_consistency(&[scattered], PpcMethod::Ppc0).unwrap();
//! assert!(ppc_locked > ppc_scattered);
//! ```

pub mod error;
pub mod extraction;
pub mod ppc;
pub mod signal;
pub mod spike_train;
pub mod units;

/// Minimum number of (signal, spike train) pairs to consider parallel extraction.
pub const MIN_PARALLEL_PAIRS: usize = 8;
/// Minimum number of pooled phases to consider parallel pairwise accumulation.
pub const MIN_PARALLEL_PHASES: usize = 512;
/// Maximum number of pooled phases accumulated pair by pair, in O(N²) time, when the accumulation is automatic.
/// Beyond, the pairwise sum is derived from the resultant vector in O(N) time.
pub const MAX_PAIRWISE_PHASES: usize = 4096;
