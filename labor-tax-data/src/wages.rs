//! The standard wage distribution over labor cost.

use labor_tax_core::{LaborCostTransform, WageDensity, WageTable, WageTableError};

use crate::constants::{
    AVERAGE_GROSS_WAGE, CAP_MULTIPLE, COST_MULTIPLIER, EXCESS_COST_MULTIPLIER,
    REFERENCE_AVERAGE_GROSS_WAGE, WAGE_TABLE_EDGES, WAGE_TABLE_FREQUENCIES,
};

/// Wage table as sampled in the reference year.
pub fn standard_wage_table() -> Result<WageTable, WageTableError> {
    WageTable::new(
        REFERENCE_AVERAGE_GROSS_WAGE,
        WAGE_TABLE_EDGES.to_vec(),
        WAGE_TABLE_FREQUENCIES.to_vec(),
    )
}

/// Gross-to-cost transform under current levies.
pub fn standard_transform() -> LaborCostTransform {
    LaborCostTransform {
        average_gross_wage: AVERAGE_GROSS_WAGE,
        cost_multiplier: COST_MULTIPLIER,
        cap_multiple: CAP_MULTIPLE,
        excess_multiplier: EXCESS_COST_MULTIPLIER,
    }
}

/// Density of labor cost at the current average wage.
pub fn standard_density() -> Result<WageDensity, WageTableError> {
    WageDensity::new(
        &standard_wage_table()?,
        AVERAGE_GROSS_WAGE,
        standard_transform(),
    )
}
