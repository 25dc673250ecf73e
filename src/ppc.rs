//! Pairwise Phase Consistency (PPC) module.
//!
//! The PPC is a bias-free measure of the concentration of phases on the unit circle. For the pooled phases
//! θ_1, ..., θ_N, the `ppc0` estimator averages the dot product of the unit vectors of all pairs of distinct phases:
//!
//! ```text
//! PPC = 1 / (N (N - 1)) * Σ_{j != k} (cos θ_j cos θ_k + sin θ_j sin θ_k)
//! ```
//!
//! It equals 1 for perfectly locked phases and is close to 0 for uniformly distributed ones. With less than two phases,
//! the estimator is undefined and NaN is returned.
//!
//! # Examples
//!
//! ```rust
//! use spike_phase::ppc::{pairwise_phase_consistency, PpcMethod};
//!
//! // A single trial of phases
//! let phases = vec![0.1, 0.2, 0.15, 0.05];
//! let ppc = pairwise_phase_consistency(&[phases], PpcMethod::Ppc0).unwrap();
//! assert!(ppc > 0.9 && ppc < 1.0);
//!
//! // Several trials are pooled together
//! let trials = vec![vec![1.0, 1.0], vec![1.0]];
//! let ppc = pairwise_phase_consistency(&trials, "ppc0".parse().unwrap()).unwrap();
//! assert!((ppc - 1.0).abs() < 1e-12);
//! ```
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::PhaseError;
use crate::{MAX_PAIRWISE_PHASES, MIN_PARALLEL_PHASES};

/// The PPC estimator.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum PpcMethod {
    /// Compare all pairs of phases, regardless of the trial they belong to.
    Ppc0,
    /// Compare only pairs of phases from different trials. Not available yet.
    Ppc1,
}

impl fmt::Display for PpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PpcMethod::Ppc0 => write!(f, "ppc0"),
            PpcMethod::Ppc1 => write!(f, "ppc1"),
        }
    }
}

impl FromStr for PpcMethod {
    type Err = PhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ppc0" => Ok(PpcMethod::Ppc0),
            "ppc1" => Ok(PpcMethod::Ppc1),
            other => Err(PhaseError::UnknownMethod(format!(
                "'{}', choose out of [\"ppc0\"]",
                other
            ))),
        }
    }
}

/// The way the sum over all pairs of phases is accumulated.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Accumulation {
    /// Sum the dot products of every pair explicitly, in O(N²) time.
    Pairwise,
    /// Derive the pairwise sum from the resultant vector of the phases, in O(N) time.
    Resultant,
    /// Use `Pairwise` up to [`MAX_PAIRWISE_PHASES`] phases, and `Resultant` beyond.
    #[default]
    Auto,
}

/// Calculate the pairwise phase consistency of the pooled phases of all trials.
///
/// A single sequence of phases is passed as a one-element slice. The phases are validated before any computation:
/// an error is returned if any of them is not finite, or if the method is not available.
pub fn pairwise_phase_consistency<T: AsRef<[f64]>>(
    trials: &[T],
    method: PpcMethod,
) -> Result<f64, PhaseError> {
    pairwise_phase_consistency_with(trials, method, Accumulation::Auto)
}

/// Calculate the pairwise phase consistency with an explicit accumulation strategy.
pub fn pairwise_phase_consistency_with<T: AsRef<[f64]>>(
    trials: &[T],
    method: PpcMethod,
    accumulation: Accumulation,
) -> Result<f64, PhaseError> {
    for (trial_id, trial) in trials.iter().enumerate() {
        if let Some((i, phase)) = trial
            .as_ref()
            .iter()
            .enumerate()
            .find(|(_, phase)| !phase.is_finite())
        {
            return Err(PhaseError::InvalidPhases(format!(
                "Phase {} of trial {} is not finite: {}",
                i, trial_id, phase
            )));
        }
    }

    match method {
        PpcMethod::Ppc0 => {
            let phases: Vec<f64> = trials
                .iter()
                .flat_map(|trial| trial.as_ref().iter().copied())
                .collect();
            Ok(ppc0(&phases, accumulation))
        }
        PpcMethod::Ppc1 => Err(PhaseError::NotImplemented(
            "The ppc1 estimator (pairs across trials only) is not available, use ppc0.".to_string(),
        )),
    }
}

/// Returns the ppc0 estimate of the pooled phases.
/// With less than two phases, the normalization N(N-1) vanishes and NaN is returned.
fn ppc0(phases: &[f64], accumulation: Accumulation) -> f64 {
    let num_phases = phases.len();
    if num_phases < 2 {
        log::warn!(
            "PPC is undefined for {} phase(s), at least two are required",
            num_phases
        );
        return f64::NAN;
    }

    let accumulation = match accumulation {
        Accumulation::Auto if num_phases <= MAX_PAIRWISE_PHASES => Accumulation::Pairwise,
        Accumulation::Auto => {
            log::debug!(
                "{} phases exceed {}, switching to resultant accumulation",
                num_phases,
                MAX_PAIRWISE_PHASES
            );
            Accumulation::Resultant
        }
        other => other,
    };

    let sum = match accumulation {
        Accumulation::Resultant => resultant_sum(phases),
        _ => pairwise_sum(phases),
    };

    // Each unordered pair is counted twice, both in the sum and in N(N-1).
    let num_pairs = num_phases as f64 * (num_phases as f64 - 1.0);
    sum / num_pairs
}

/// Returns the sum of the dot products of all ordered pairs of distinct phases, computed pair by pair.
fn pairwise_sum(phases: &[f64]) -> f64 {
    let unit_vectors: Vec<(f64, f64)> = phases.iter().map(|phase| (phase.cos(), phase.sin())).collect();

    let row_sum = |j: usize| -> f64 {
        let (cos_j, sin_j) = unit_vectors[j];
        unit_vectors
            .iter()
            .enumerate()
            .filter(|(k, _)| *k != j)
            .map(|(_, (cos_k, sin_k))| cos_j * cos_k + sin_j * sin_k)
            .sum()
    };

    // Rows may be computed in parallel, but are always added in index order.
    let row_sums: Vec<f64> = if unit_vectors.len() >= MIN_PARALLEL_PHASES {
        (0..unit_vectors.len()).into_par_iter().map(row_sum).collect()
    } else {
        (0..unit_vectors.len()).map(row_sum).collect()
    };
    row_sums.iter().sum()
}

/// Returns the sum of the dot products of all ordered pairs of distinct phases, computed from the resultant vector.
/// The squared norm of the resultant counts all ordered pairs plus the N self-pairs, each equal to one.
fn resultant_sum(phases: &[f64]) -> f64 {
    let (sum_cos, sum_sin) = phases
        .iter()
        .fold((0.0, 0.0), |(acc_cos, acc_sin), phase| {
            (acc_cos + phase.cos(), acc_sin + phase.sin())
        });
    sum_cos * sum_cos + sum_sin * sum_sin - phases.len() as f64
}
