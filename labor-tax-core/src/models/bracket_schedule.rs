//! Piecewise-linear tax schedules over labor cost.
//!
//! A schedule is a list of thresholds with one marginal rate per threshold.
//! Rate `i` applies from `boundaries[i]` up to `boundaries[i + 1]`; the last
//! rate applies to everything above the last threshold.
//!
//! # Example
//!
//! ```
//! use labor_tax_core::BracketSchedule;
//!
//! let schedule = BracketSchedule::new(vec![0.0, 100.0], vec![0.1, 0.2]).unwrap();
//!
//! let brackets: Vec<_> = schedule.brackets().collect();
//! assert_eq!(brackets.len(), 2);
//! assert_eq!(brackets[0].upper, Some(100.0));
//! assert_eq!(brackets[1].upper, None);
//! ```

use serde::Serialize;
use thiserror::Error;

/// Errors raised when a schedule violates its construction invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    /// A schedule needs at least one bracket.
    #[error("schedule has no brackets")]
    Empty,

    /// Every boundary needs exactly one rate.
    #[error("schedule has {boundaries} boundaries but {rates} rates")]
    LengthMismatch { boundaries: usize, rates: usize },

    #[error("boundary {index} is not finite: {value}")]
    NonFiniteBoundary { index: usize, value: f64 },

    #[error("boundary {index} is negative: {value}")]
    NegativeBoundary { index: usize, value: f64 },

    /// Boundaries must be strictly increasing.
    #[error("boundary {index} ({value}) does not exceed the previous boundary ({previous})")]
    NotStrictlyIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("rate {index} is not finite: {value}")]
    NonFiniteRate { index: usize, value: f64 },
}

/// A single bracket of a schedule.
///
/// `upper` is `None` for the open-ended final bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bracket {
    pub lower: f64,
    pub upper: Option<f64>,
    pub rate: f64,
}

/// An immutable, validated tax schedule.
///
/// Rates are marginal fractions, not cumulative. They are usually within
/// `[0, 1]` but nothing requires it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketSchedule {
    boundaries: Vec<f64>,
    rates: Vec<f64>,
}

impl BracketSchedule {
    /// Builds a schedule, checking that boundaries are finite, non-negative
    /// and strictly increasing, and that each boundary has a finite rate.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] describing the first violated invariant.
    ///
    /// ```
    /// use labor_tax_core::{BracketSchedule, ScheduleError};
    ///
    /// let result = BracketSchedule::new(vec![0.0, 100.0, 100.0], vec![0.1, 0.2, 0.3]);
    /// assert_eq!(
    ///     result,
    ///     Err(ScheduleError::NotStrictlyIncreasing { index: 2, previous: 100.0, value: 100.0 })
    /// );
    /// ```
    pub fn new(
        boundaries: Vec<f64>,
        rates: Vec<f64>,
    ) -> Result<Self, ScheduleError> {
        if boundaries.is_empty() && rates.is_empty() {
            return Err(ScheduleError::Empty);
        }
        if boundaries.len() != rates.len() {
            return Err(ScheduleError::LengthMismatch {
                boundaries: boundaries.len(),
                rates: rates.len(),
            });
        }

        for (index, &value) in boundaries.iter().enumerate() {
            if !value.is_finite() {
                return Err(ScheduleError::NonFiniteBoundary { index, value });
            }
            if value < 0.0 {
                return Err(ScheduleError::NegativeBoundary { index, value });
            }
            if index > 0 {
                let previous = boundaries[index - 1];
                if value <= previous {
                    return Err(ScheduleError::NotStrictlyIncreasing {
                        index,
                        previous,
                        value,
                    });
                }
            }
        }

        if let Some((index, &value)) = rates.iter().enumerate().find(|(_, r)| !r.is_finite()) {
            return Err(ScheduleError::NonFiniteRate { index, value });
        }

        Ok(Self { boundaries, rates })
    }

    /// Builds a schedule from `(boundary, rate)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, ScheduleError> {
        let (boundaries, rates) = pairs.iter().copied().unzip();
        Self::new(boundaries, rates)
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Number of brackets, including the open-ended final one.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Always `false`; construction rejects empty schedules.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterates the brackets in increasing order.
    pub fn brackets(&self) -> impl Iterator<Item = Bracket> + '_ {
        self.boundaries
            .iter()
            .zip(&self.rates)
            .enumerate()
            .map(|(i, (&lower, &rate))| Bracket {
                lower,
                upper: self.boundaries.get(i + 1).copied(),
                rate,
            })
    }

    /// Returns a copy of this schedule with every rate transformed by `f`.
    ///
    /// Boundaries are untouched, so the result only needs its rates checked.
    pub fn map_rates(
        &self,
        f: impl Fn(f64) -> f64,
    ) -> Result<Self, ScheduleError> {
        Self::new(
            self.boundaries.clone(),
            self.rates.iter().map(|&r| f(r)).collect(),
        )
    }
}
