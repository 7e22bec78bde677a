//! Tabulations used to compare proposals.
//!
//! All amounts leave this module as [`Decimal`] rounded to whole crowns;
//! rates are percentages with two decimal places.

use std::fmt;
use std::io::Write;

use labor_tax_core::calculations::common::{rate_as_percent, round_to_crowns};
use labor_tax_core::{RevenueEstimator, marginal_rate, tax};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{DataError, Proposal, ProposalId, ProposalRegistry};

/// Tax under every proposal at one gross wage.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub gross_wage: Decimal,

    /// One entry per proposal, in [`ComparisonTable::proposals`] order.
    pub taxes: Vec<Decimal>,
}

/// Tax owed under each proposal over a range of gross wages.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub proposals: Vec<ProposalId>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Writes the table as CSV with one column per proposal.
    pub fn write_csv<W: Write>(
        &self,
        writer: W,
    ) -> Result<(), DataError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["gross_wage".to_string()];
        header.extend(self.proposals.iter().map(|id| id.as_str().to_string()));
        csv_writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.gross_wage.to_string()];
            record.extend(row.taxes.iter().map(Decimal::to_string));
            csv_writer.write_record(&record)?;
        }

        csv_writer
            .flush()
            .map_err(|e| DataError::Csv(e.to_string()))
    }
}

impl fmt::Display for ComparisonTable {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:>8}", "wage")?;
        for id in &self.proposals {
            write!(f, " {:>8}", id.as_str())?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:>8}", row.gross_wage)?;
            for amount in &row.taxes {
                write!(f, " {:>8}", amount)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Tax saved at one gross wage when moving from a baseline to another proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsRow {
    pub gross_wage: Decimal,
    pub savings: Decimal,
}

/// Marginal rate of one proposal at one gross wage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginalRow {
    pub gross_wage: Decimal,
    pub labor_cost: Decimal,
    pub tax: Decimal,

    /// Marginal rate in percent; empty if the cost lies below the schedule.
    pub marginal_rate: Option<Decimal>,
}

/// Estimated revenue of one proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueRow {
    pub proposal: &'static str,
    pub name: &'static str,
    pub revenue: Decimal,

    /// Revenue divided by population.
    pub per_capita: Decimal,
}

/// Largest sampling grid [`gross_wage_range`] will build.
pub const MAX_RANGE_POINTS: usize = 1_000_000;

/// Gross wages from `start` (inclusive) to `end` (exclusive) in `step` increments.
///
/// # Errors
///
/// Returns [`DataError::InvalidRange`] when any bound is not finite,
/// `step` is not positive, or the grid would exceed [`MAX_RANGE_POINTS`].
pub fn gross_wage_range(
    start: f64,
    end: f64,
    step: f64,
) -> Result<Vec<f64>, DataError> {
    if !start.is_finite() || !end.is_finite() || !step.is_finite() || step <= 0.0 {
        return Err(DataError::InvalidRange { start, end, step });
    }
    let count = ((end - start) / step).ceil().max(0.0);
    if !count.is_finite() || count > MAX_RANGE_POINTS as f64 {
        return Err(DataError::InvalidRange { start, end, step });
    }
    let count = count as usize;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

/// Tax under every registered proposal, each at its own labor cost.
pub fn comparison_table(
    registry: &ProposalRegistry,
    gross_wages: &[f64],
) -> Result<ComparisonTable, DataError> {
    let proposals: Vec<&Proposal> = registry.iter().collect();

    let rows = gross_wages
        .iter()
        .map(|&gross| -> Result<ComparisonRow, DataError> {
            let taxes = proposals
                .iter()
                .map(|p| crowns(tax(&p.schedule, p.labor_cost(gross))))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ComparisonRow {
                gross_wage: crowns(gross)?,
                taxes,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ComparisonTable {
        proposals: proposals.iter().map(|p| p.id).collect(),
        rows,
    })
}

/// `tax(baseline) − tax(other)` at each gross wage.
///
/// Both schedules are evaluated at the baseline's labor cost, so the series
/// isolates the change in the schedule from any change in levies.
pub fn savings_series(
    baseline: &Proposal,
    other: &Proposal,
    gross_wages: &[f64],
) -> Result<Vec<SavingsRow>, DataError> {
    gross_wages
        .iter()
        .map(|&gross| -> Result<SavingsRow, DataError> {
            let cost = baseline.labor_cost(gross);
            let savings = tax(&baseline.schedule, cost) - tax(&other.schedule, cost);
            Ok(SavingsRow {
                gross_wage: crowns(gross)?,
                savings: crowns(savings)?,
            })
        })
        .collect()
}

/// Tax and marginal rate of one proposal along a range of gross wages.
pub fn marginal_series(
    proposal: &Proposal,
    gross_wages: &[f64],
) -> Result<Vec<MarginalRow>, DataError> {
    gross_wages
        .iter()
        .map(|&gross| -> Result<MarginalRow, DataError> {
            let cost = proposal.labor_cost(gross);
            let rate = marginal_rate(&proposal.schedule, cost)
                .map(|r| rate_as_percent(r).ok_or(DataError::NonFiniteAmount(r)))
                .transpose()?;
            Ok(MarginalRow {
                gross_wage: crowns(gross)?,
                labor_cost: crowns(cost)?,
                tax: crowns(tax(&proposal.schedule, cost))?,
                marginal_rate: rate,
            })
        })
        .collect()
}

/// Revenue of every registered proposal.
pub fn revenue_summary(
    registry: &ProposalRegistry,
    estimator: &RevenueEstimator<'_>,
) -> Result<Vec<RevenueRow>, DataError> {
    registry
        .iter()
        .map(|p| -> Result<RevenueRow, DataError> {
            let revenue = estimator
                .revenue(&p.schedule)
                .map_err(|source| DataError::Revenue {
                    proposal: p.id.as_str(),
                    source,
                })?;
            Ok(RevenueRow {
                proposal: p.id.as_str(),
                name: p.name,
                revenue: crowns(revenue)?,
                per_capita: crowns(revenue / estimator.population())?,
            })
        })
        .collect()
}

/// Writes serializable rows as CSV with a header line.
pub fn write_csv<W: Write, T: Serialize>(
    writer: W,
    rows: &[T],
) -> Result<(), DataError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer
        .flush()
        .map_err(|e| DataError::Csv(e.to_string()))
}

fn crowns(amount: f64) -> Result<Decimal, DataError> {
    round_to_crowns(amount).ok_or(DataError::NonFiniteAmount(amount))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // gross_wage_range tests
    // =========================================================================

    #[test]
    fn gross_wage_range_excludes_end() {
        let range = gross_wage_range(14_000.0, 20_000.0, 2_000.0).unwrap();

        assert_eq!(range, vec![14_000.0, 16_000.0, 18_000.0]);
    }

    #[test]
    fn gross_wage_range_handles_partial_step() {
        let range = gross_wage_range(0.0, 5.0, 2.0).unwrap();

        assert_eq!(range, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn gross_wage_range_is_empty_when_end_precedes_start() {
        let range = gross_wage_range(10.0, 5.0, 1.0).unwrap();

        assert!(range.is_empty());
    }

    #[test]
    fn gross_wage_range_rejects_zero_step() {
        let result = gross_wage_range(0.0, 10.0, 0.0);

        assert!(matches!(result, Err(DataError::InvalidRange { .. })));
    }

    #[test]
    fn gross_wage_range_rejects_too_many_steps() {
        let result = gross_wage_range(0.0, 1.0e6, 1.0e-300);

        assert!(matches!(result, Err(DataError::InvalidRange { .. })));
    }

    #[test]
    fn gross_wage_range_rejects_overflowing_span() {
        let result = gross_wage_range(-f64::MAX, f64::MAX, 1.0);

        assert!(matches!(result, Err(DataError::InvalidRange { .. })));
    }

    #[test]
    fn gross_wage_range_accepts_largest_grid() {
        let range = gross_wage_range(0.0, MAX_RANGE_POINTS as f64, 1.0).unwrap();

        assert_eq!(range.len(), MAX_RANGE_POINTS);
    }

    // =========================================================================
    // comparison_table tests
    // =========================================================================

    #[test]
    fn comparison_table_has_one_column_per_proposal() {
        let registry = ProposalRegistry::standard().unwrap();

        let table = comparison_table(&registry, &[20_000.0, 30_000.0]).unwrap();

        assert_eq!(
            table.proposals,
            vec![
                ProposalId::Current,
                ProposalId::Ods,
                ProposalId::Cssd,
                ProposalId::Pirates
            ]
        );
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows.iter().all(|r| r.taxes.len() == 4));
    }

    #[test]
    fn comparison_table_current_law_at_20000() {
        let registry = ProposalRegistry::standard().unwrap();

        let table = comparison_table(&registry, &[20_000.0]).unwrap();

        // Labor cost 26 800: levies on all of it, 15 % above 13 800.
        // 26 800 × 0.45 / 1.34 + 13 000 × 0.15 = 9 000 + 1 950.
        assert_eq!(table.rows[0].gross_wage, dec!(20000));
        assert_eq!(table.rows[0].taxes[0], dec!(10950));
    }

    #[test]
    fn comparison_table_display_has_header_and_rows() {
        let registry = ProposalRegistry::standard().unwrap();
        let table = comparison_table(&registry, &[20_000.0, 22_000.0]).unwrap();

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("current"));
        assert!(lines[0].contains("pirates"));
        assert!(lines[1].trim_start().starts_with("20000"));
    }

    #[test]
    fn comparison_table_writes_csv() {
        let registry = ProposalRegistry::standard().unwrap();
        let table = comparison_table(&registry, &[20_000.0]).unwrap();

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("gross_wage,current,ods,cssd,pirates"));
        assert!(lines.next().unwrap().starts_with("20000,10950,"));
    }

    // =========================================================================
    // savings_series tests
    // =========================================================================

    #[test]
    fn savings_against_itself_is_zero() {
        let registry = ProposalRegistry::standard().unwrap();
        let current = registry.require(ProposalId::Current).unwrap();

        let rows = savings_series(current, current, &[15_000.0, 50_000.0]).unwrap();

        assert!(rows.iter().all(|r| r.savings == dec!(0)));
    }

    #[test]
    fn savings_use_baseline_labor_cost() {
        let registry = ProposalRegistry::standard().unwrap();
        let current = registry.require(ProposalId::Current).unwrap();
        let pirates = registry.require(ProposalId::Pirates).unwrap();

        let rows = savings_series(current, pirates, &[20_000.0]).unwrap();

        // Pirates at 26 800: (26 800 − 2 070 / 0.47) × 0.47 = 12 596 − 2 070.
        let pirate_tax = 26_800.0 * 0.47 - 2_070.0;
        let expected = round_to_crowns(10_950.0 - pirate_tax).unwrap();
        assert_eq!(rows[0].savings, expected);
    }

    // =========================================================================
    // marginal_series tests
    // =========================================================================

    #[test]
    fn marginal_series_reports_percent_rates() {
        let registry = ProposalRegistry::standard().unwrap();
        let pirates = registry.require(ProposalId::Pirates).unwrap();

        let rows = marginal_series(pirates, &[1_000.0, 20_000.0]).unwrap();

        assert_eq!(rows[0].marginal_rate, Some(dec!(0)));
        assert_eq!(rows[1].marginal_rate, Some(dec!(47)));
        assert_eq!(rows[1].labor_cost, dec!(26800));
    }

    #[test]
    fn marginal_rows_serialize_to_csv() {
        let rows = vec![MarginalRow {
            gross_wage: dec!(100),
            labor_cost: dec!(134),
            tax: dec!(45),
            marginal_rate: None,
        }];

        let mut out = Vec::new();
        write_csv(&mut out, &rows).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "gross_wage,labor_cost,tax,marginal_rate\n100,134,45,\n"
        );
    }
}
