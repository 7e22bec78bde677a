//! Piecewise-constant density of labor cost.
//!
//! The density is rebuilt from a sparse wage table in three steps:
//!
//! 1. every gross-wage edge is rescaled by the ratio of the current average
//!    gross wage to the table's reference average wage;
//! 2. each rescaled edge is mapped to labor cost through a
//!    [`LaborCostTransform`];
//! 3. within each bin the density is the bin's share divided by its width.
//!
//! The result is a density *proxy*: it integrates to the sum of the table's
//! shares (close to but not exactly one) and callers scale it by a
//! population count.
//!
//! # Example
//!
//! ```
//! use labor_tax_core::{LaborCostTransform, WageDensity, WageTable};
//!
//! let table = WageTable::new(1000.0, vec![0.0, 1000.0, 3000.0], vec![50.0, 50.0]).unwrap();
//! let transform = LaborCostTransform {
//!     average_gross_wage: 1000.0,
//!     cost_multiplier: 1.0,
//!     cap_multiple: 10.0,
//!     excess_multiplier: 1.0,
//! };
//! let density = WageDensity::new(&table, 1000.0, transform).unwrap();
//!
//! assert_eq!(density.density(500.0), Some(0.5 / 1000.0));
//! assert_eq!(density.density(2000.0), Some(0.5 / 2000.0));
//! assert_eq!(density.density(3000.0), None);
//! ```

use crate::{LaborCostTransform, WageTable, WageTableError};

/// Histogram density over labor cost derived from a [`WageTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct WageDensity {
    raw_edges: Vec<f64>,
    cost_edges: Vec<f64>,
    shares: Vec<f64>,
}

impl WageDensity {
    /// Builds the density for a table sampled at a different average wage.
    ///
    /// # Errors
    ///
    /// Returns [`WageTableError`] when `current_average_wage` is not positive
    /// or the transform would not be strictly increasing.
    pub fn new(
        table: &WageTable,
        current_average_wage: f64,
        transform: LaborCostTransform,
    ) -> Result<Self, WageTableError> {
        if !current_average_wage.is_finite() || current_average_wage <= 0.0 {
            return Err(WageTableError::InvalidAverageWage(current_average_wage));
        }
        transform.validate()?;

        let scale = current_average_wage / table.reference_average_wage();
        let cost_edges = table
            .edges()
            .iter()
            .map(|&edge| transform.labor_cost(edge * scale))
            .collect();
        let shares = table.frequencies().iter().map(|f| f / 100.0).collect();

        Ok(Self {
            raw_edges: table.edges().to_vec(),
            cost_edges,
            shares,
        })
    }

    /// Density at `cost`, or `None` outside `[first edge, last edge)`.
    pub fn density(
        &self,
        cost: f64,
    ) -> Option<f64> {
        let (lower, upper) = self.support();
        if !(lower <= cost && cost < upper) {
            return None;
        }
        // First edge strictly above `cost`; the bin starts one edge earlier.
        let bin = self.cost_edges.partition_point(|&edge| edge <= cost) - 1;
        let width = self.cost_edges[bin + 1] - self.cost_edges[bin];
        Some(self.shares[bin] / width)
    }

    /// Gross-wage edges exactly as tabulated, before any adjustment.
    pub fn raw_edges(&self) -> &[f64] {
        &self.raw_edges
    }

    /// Bin edges in labor cost, where the density is discontinuous.
    pub fn cost_edges(&self) -> &[f64] {
        &self.cost_edges
    }

    /// Half-open range `[lower, upper)` on which the density is defined.
    pub fn support(&self) -> (f64, f64) {
        (
            self.cost_edges[0],
            self.cost_edges[self.cost_edges.len() - 1],
        )
    }

    /// Sum of all bin shares; the integral of the density over its support.
    pub fn total_share(&self) -> f64 {
        self.shares.iter().sum()
    }
}
