use labor_tax_core::{RevenueError, ScheduleError, WageTableError};
use thiserror::Error;

/// Errors that can occur when building proposal data or reports.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid schedule for {proposal}: {source}")]
    Schedule {
        proposal: &'static str,
        source: ScheduleError,
    },

    #[error("invalid wage data: {0}")]
    WageTable(#[from] WageTableError),

    #[error("revenue estimate failed for {proposal}: {source}")]
    Revenue {
        proposal: &'static str,
        source: RevenueError,
    },

    #[error("unknown proposal '{0}' (expected one of: current, cssd, ods, pirates)")]
    UnknownProposal(String),

    #[error("proposal '{0}' is not in the registry")]
    MissingProposal(&'static str),

    #[error("invalid wage range: start {start}, end {end}, step {step}")]
    InvalidRange { start: f64, end: f64, step: f64 },

    /// An amount could not be represented as money.
    #[error("amount is not representable: {0}")]
    NonFiniteAmount(f64),

    #[error("CSV write error: {0}")]
    Csv(String),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}
