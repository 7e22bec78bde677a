use serde::Serialize;
use thiserror::Error;

/// Errors raised when a wage table or its conversion parameters are invalid.
#[derive(Debug, Error, PartialEq)]
pub enum WageTableError {
    /// A table needs at least one bin, i.e. two edges.
    #[error("wage table needs at least two edges, got {0}")]
    TooFewEdges(usize),

    /// There must be exactly one frequency per pair of consecutive edges.
    #[error("wage table has {edges} edges but {frequencies} frequencies")]
    LengthMismatch { edges: usize, frequencies: usize },

    #[error("wage table edge {index} ({value}) does not exceed the previous edge ({previous})")]
    NotStrictlyIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("wage table edge {index} is invalid: {value}")]
    InvalidEdge { index: usize, value: f64 },

    #[error("wage table frequency {index} is invalid: {value}")]
    InvalidFrequency { index: usize, value: f64 },

    /// Average wages are used as divisors and must be positive.
    #[error("average gross wage must be positive, got {0}")]
    InvalidAverageWage(f64),

    #[error("labor cost transform parameter {field} must be positive, got {value}")]
    InvalidTransform { field: &'static str, value: f64 },
}

/// One bucket of the wage table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WageBin {
    pub lower_edge: f64,
    pub upper_edge: f64,

    /// Share of the population in `[lower_edge, upper_edge)`, in percent.
    pub frequency: f64,
}

/// Sparse, unevenly spaced histogram of gross wages.
///
/// Frequencies are relative shares in percent, not percentiles, and are not
/// required to sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WageTable {
    reference_average_wage: f64,
    edges: Vec<f64>,
    frequencies: Vec<f64>,
}

impl WageTable {
    /// Builds a table from `M + 1` gross-wage edges and `M` frequencies.
    ///
    /// `reference_average_wage` is the average gross wage in the year the
    /// table was sampled.
    pub fn new(
        reference_average_wage: f64,
        edges: Vec<f64>,
        frequencies: Vec<f64>,
    ) -> Result<Self, WageTableError> {
        if !reference_average_wage.is_finite() || reference_average_wage <= 0.0 {
            return Err(WageTableError::InvalidAverageWage(reference_average_wage));
        }
        if edges.len() < 2 {
            return Err(WageTableError::TooFewEdges(edges.len()));
        }
        if frequencies.len() + 1 != edges.len() {
            return Err(WageTableError::LengthMismatch {
                edges: edges.len(),
                frequencies: frequencies.len(),
            });
        }

        for (index, &value) in edges.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(WageTableError::InvalidEdge { index, value });
            }
            if index > 0 && value <= edges[index - 1] {
                return Err(WageTableError::NotStrictlyIncreasing {
                    index,
                    previous: edges[index - 1],
                    value,
                });
            }
        }
        for (index, &value) in frequencies.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(WageTableError::InvalidFrequency { index, value });
            }
        }

        Ok(Self {
            reference_average_wage,
            edges,
            frequencies,
        })
    }

    pub fn reference_average_wage(&self) -> f64 {
        self.reference_average_wage
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn bins(&self) -> impl Iterator<Item = WageBin> + '_ {
        self.edges
            .windows(2)
            .zip(&self.frequencies)
            .map(|(pair, &frequency)| WageBin {
                lower_edge: pair[0],
                upper_edge: pair[1],
                frequency,
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_accepts_valid_table() {
        let table = WageTable::new(1000.0, vec![0.0, 10.0, 30.0], vec![40.0, 60.0]).unwrap();

        let bins: Vec<WageBin> = table.bins().collect();
        assert_eq!(
            bins,
            vec![
                WageBin {
                    lower_edge: 0.0,
                    upper_edge: 10.0,
                    frequency: 40.0
                },
                WageBin {
                    lower_edge: 10.0,
                    upper_edge: 30.0,
                    frequency: 60.0
                },
            ]
        );
    }

    #[test]
    fn new_rejects_single_edge() {
        let result = WageTable::new(1000.0, vec![0.0], vec![]);

        assert_eq!(result, Err(WageTableError::TooFewEdges(1)));
    }

    #[test]
    fn new_rejects_frequency_count_mismatch() {
        let result = WageTable::new(1000.0, vec![0.0, 10.0, 20.0], vec![50.0, 25.0, 25.0]);

        assert_eq!(
            result,
            Err(WageTableError::LengthMismatch {
                edges: 3,
                frequencies: 3
            })
        );
    }

    #[test]
    fn new_rejects_repeated_edge() {
        let result = WageTable::new(1000.0, vec![0.0, 10.0, 10.0], vec![50.0, 50.0]);

        assert_eq!(
            result,
            Err(WageTableError::NotStrictlyIncreasing {
                index: 2,
                previous: 10.0,
                value: 10.0
            })
        );
    }

    #[test]
    fn new_rejects_negative_frequency() {
        let result = WageTable::new(1000.0, vec![0.0, 10.0], vec![-1.0]);

        assert_eq!(
            result,
            Err(WageTableError::InvalidFrequency {
                index: 0,
                value: -1.0
            })
        );
    }

    #[test]
    fn new_rejects_zero_reference_wage() {
        let result = WageTable::new(0.0, vec![0.0, 10.0], vec![100.0]);

        assert_eq!(result, Err(WageTableError::InvalidAverageWage(0.0)));
    }
}
