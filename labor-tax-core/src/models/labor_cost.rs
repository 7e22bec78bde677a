//! Gross wage to labor cost conversion.
//!
//! Employers pay social and health levies on top of the gross wage. Social
//! levies stop at a cap expressed as a multiple of the average gross wage;
//! above the cap only the health levy remains, so each additional unit of
//! gross wage costs the employer less.
//!
//! | Gross wage            | Labor cost |
//! |-----------------------|------------|
//! | `g <= cap`            | `g × cost_multiplier` |
//! | `g > cap`             | `cap × cost_multiplier + (g − cap) × excess_multiplier` |
//!
//! where `cap = cap_multiple × average_gross_wage`.

use serde::Serialize;

use crate::WageTableError;

/// Parameters of the kinked gross-to-cost transform.
///
/// # Example
///
/// ```
/// use labor_tax_core::LaborCostTransform;
///
/// let transform = LaborCostTransform {
///     average_gross_wage: 1000.0,
///     cost_multiplier: 1.5,
///     cap_multiple: 2.0,
///     excess_multiplier: 1.0,
/// };
///
/// assert_eq!(transform.labor_cost(1000.0), 1500.0);
/// assert_eq!(transform.labor_cost(3000.0), 4000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaborCostTransform {
    /// Current average gross wage the cap is tied to.
    pub average_gross_wage: f64,

    /// Labor cost per unit of gross wage below the cap.
    pub cost_multiplier: f64,

    /// The cap in multiples of the average gross wage.
    pub cap_multiple: f64,

    /// Labor cost per unit of gross wage above the cap.
    pub excess_multiplier: f64,
}

impl LaborCostTransform {
    /// Gross wage at which social levies stop.
    pub fn cap(&self) -> f64 {
        self.cap_multiple * self.average_gross_wage
    }

    /// Converts a gross wage into total labor cost.
    pub fn labor_cost(
        &self,
        gross_wage: f64,
    ) -> f64 {
        let cap = self.cap();
        if gross_wage <= cap {
            gross_wage * self.cost_multiplier
        } else {
            cap * self.cost_multiplier + (gross_wage - cap) * self.excess_multiplier
        }
    }

    /// Checks that the transform is strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`WageTableError::InvalidTransform`] when any parameter is
    /// non-finite or not positive.
    pub fn validate(&self) -> Result<(), WageTableError> {
        let fields = [
            ("average_gross_wage", self.average_gross_wage),
            ("cost_multiplier", self.cost_multiplier),
            ("cap_multiple", self.cap_multiple),
            ("excess_multiplier", self.excess_multiplier),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(WageTableError::InvalidTransform { field, value });
            }
        }
        Ok(())
    }
}
