//! Static input data and reports for comparing labor tax proposals.
//!
//! The numeric engine lives in `labor_tax_core`; this crate supplies the
//! named proposals, the wage distribution constants, and the tabulations
//! printed by the `labor-tax-report` binary.

pub mod constants;
mod error;
pub mod proposals;
pub mod report;
pub mod wages;

pub use error::DataError;
pub use proposals::{Proposal, ProposalId, ProposalRegistry};
pub use report::{
    ComparisonRow, ComparisonTable, MAX_RANGE_POINTS, MarginalRow, RevenueRow, SavingsRow,
    comparison_table, gross_wage_range, marginal_series, revenue_summary, savings_series,
    write_csv,
};
pub use wages::{standard_density, standard_transform, standard_wage_table};
