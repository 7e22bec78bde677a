//! Aggregate revenue of a schedule over the wage distribution.
//!
//! Revenue is `population × ∫ tax(schedule, x) · density(x) dx` over
//! `[0, upper_bound]`. The integrand is piecewise linear with kinks at the
//! schedule's boundaries and jumps at the density's bin edges, so all of
//! those points are handed to the integrator as split points. Where the
//! density is undefined the integrand is zero.
//!
//! # Example
//!
//! ```
//! use labor_tax_core::{
//!     BracketSchedule, LaborCostTransform, RevenueEstimator, WageDensity, WageTable,
//! };
//!
//! let table = WageTable::new(1000.0, vec![0.0, 1000.0, 2000.0], vec![50.0, 50.0]).unwrap();
//! let transform = LaborCostTransform {
//!     average_gross_wage: 1000.0,
//!     cost_multiplier: 1.0,
//!     cap_multiple: 10.0,
//!     excess_multiplier: 1.0,
//! };
//! let density = WageDensity::new(&table, 1000.0, transform).unwrap();
//! let flat = BracketSchedule::new(vec![0.0], vec![0.1]).unwrap();
//!
//! let estimator = RevenueEstimator::new(&density, 100.0).unwrap();
//! let revenue = estimator.revenue(&flat).unwrap();
//!
//! // Half the people around 500, half around 1500: mean cost 1000, tax 100 each.
//! assert!((revenue - 10_000.0).abs() < 1e-6);
//! ```

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::BracketSchedule;
use crate::calculations::density::WageDensity;
use crate::calculations::evaluator::tax;
use crate::calculations::quadrature::{QuadratureConfig, QuadratureError, integrate};

/// Upper integration limit covering the modeled labor-cost domain.
pub const DEFAULT_UPPER_BOUND: f64 = 600_000.0;

/// Errors that can occur while estimating revenue.
#[derive(Debug, Error, PartialEq)]
pub enum RevenueError {
    #[error("population must be positive, got {0}")]
    InvalidPopulation(f64),

    #[error("upper bound must be positive, got {0}")]
    InvalidUpperBound(f64),

    #[error("revenue integration failed: {0}")]
    Quadrature(#[from] QuadratureError),
}

/// Revenue together with integration diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueEstimate {
    /// Total tax yield across the population.
    pub revenue: f64,

    /// Per-capita yield, the raw integral before population scaling.
    pub integral: f64,

    /// Estimated absolute error of `integral`.
    pub error: f64,

    /// Split points that fell inside the integration interval.
    pub split_points: usize,

    pub subdivisions: usize,
}

/// Estimates revenue of schedules over a fixed density and population.
#[derive(Debug, Clone)]
pub struct RevenueEstimator<'a> {
    density: &'a WageDensity,
    population: f64,
    upper_bound: f64,
    config: QuadratureConfig,
}

impl<'a> RevenueEstimator<'a> {
    /// Creates an estimator integrating up to [`DEFAULT_UPPER_BOUND`].
    pub fn new(
        density: &'a WageDensity,
        population: f64,
    ) -> Result<Self, RevenueError> {
        if !population.is_finite() || population <= 0.0 {
            return Err(RevenueError::InvalidPopulation(population));
        }
        Ok(Self {
            density,
            population,
            upper_bound: DEFAULT_UPPER_BOUND,
            config: QuadratureConfig::default(),
        })
    }

    pub fn with_upper_bound(
        mut self,
        upper_bound: f64,
    ) -> Result<Self, RevenueError> {
        if !upper_bound.is_finite() || upper_bound <= 0.0 {
            return Err(RevenueError::InvalidUpperBound(upper_bound));
        }
        self.upper_bound = upper_bound;
        Ok(self)
    }

    pub fn with_quadrature_config(
        mut self,
        config: QuadratureConfig,
    ) -> Result<Self, RevenueError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn population(&self) -> f64 {
        self.population
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Total revenue of `schedule`.
    ///
    /// # Errors
    ///
    /// Returns [`RevenueError::Quadrature`] if the integration does not
    /// converge within the configured budget.
    pub fn revenue(
        &self,
        schedule: &BracketSchedule,
    ) -> Result<f64, RevenueError> {
        self.estimate(schedule).map(|estimate| estimate.revenue)
    }

    /// Like [`revenue`](Self::revenue), with integration diagnostics.
    pub fn estimate(
        &self,
        schedule: &BracketSchedule,
    ) -> Result<RevenueEstimate, RevenueError> {
        let split_points = self.split_points(schedule);
        let integrand = |x: f64| {
            self.density
                .density(x)
                .map_or(0.0, |d| tax(schedule, x) * d)
        };

        let integral = integrate(integrand, 0.0, self.upper_bound, &split_points, &self.config)
            .inspect_err(|error| {
                warn!(%error, upper_bound = self.upper_bound, "revenue integration failed");
            })?;

        let estimate = RevenueEstimate {
            revenue: self.population * integral.value,
            integral: integral.value,
            error: integral.error,
            split_points: split_points.len(),
            subdivisions: integral.subdivisions,
        };
        debug!(
            revenue = estimate.revenue,
            split_points = estimate.split_points,
            subdivisions = estimate.subdivisions,
            "revenue estimated"
        );
        Ok(estimate)
    }

    /// Schedule boundaries, tabulated gross-wage edges and adjusted cost
    /// edges that lie strictly inside the integration interval.
    fn split_points(
        &self,
        schedule: &BracketSchedule,
    ) -> Vec<f64> {
        let mut points: Vec<f64> = schedule
            .boundaries()
            .iter()
            .chain(self.density.raw_edges())
            .chain(self.density.cost_edges())
            .copied()
            .filter(|&x| x > 0.0 && x < self.upper_bound)
            .collect();
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }
}
