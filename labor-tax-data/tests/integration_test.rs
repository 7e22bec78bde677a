//! Revenue and tabulation over the standard proposals and wage density.

use labor_tax_core::{BracketSchedule, RevenueEstimator, marginal_rate, tax};
use labor_tax_data::constants::POPULATION;
use labor_tax_data::{
    ProposalId, ProposalRegistry, comparison_table, gross_wage_range, revenue_summary,
    standard_density,
};
use pretty_assertions::assert_eq;

fn registry() -> ProposalRegistry {
    ProposalRegistry::standard().expect("standard proposals are valid")
}

#[test]
fn test_every_proposal_has_positive_revenue() {
    let registry = registry();
    let density = standard_density().expect("standard density is valid");
    let estimator = RevenueEstimator::new(&density, POPULATION).unwrap();

    for proposal in registry.iter() {
        let estimate = estimator.estimate(&proposal.schedule).unwrap();

        assert!(estimate.revenue.is_finite());
        assert!(estimate.revenue > 0.0, "{} has no revenue", proposal.name);
        assert!(estimate.error <= 1e-6 * estimate.integral);
    }
}

#[test]
fn test_revenue_is_linear_in_rates() {
    let registry = registry();
    let density = standard_density().unwrap();
    let estimator = RevenueEstimator::new(&density, POPULATION).unwrap();
    let current = &registry.require(ProposalId::Current).unwrap().schedule;

    let raised = current.map_rates(|r| r + 0.01).unwrap();
    let flat = BracketSchedule::new(vec![0.0], vec![0.01]).unwrap();

    let base = estimator.revenue(current).unwrap();
    let higher = estimator.revenue(&raised).unwrap();
    let increment = estimator.revenue(&flat).unwrap();

    assert!(higher > base);
    assert!(((higher - base) - increment).abs() / increment < 1e-8);
}

#[test]
fn test_revenue_ignores_region_without_density() {
    let registry = registry();
    let density = standard_density().unwrap();
    let (_, top) = density.support();
    let schedule = &registry.require(ProposalId::Cssd).unwrap().schedule;

    let at_support = RevenueEstimator::new(&density, POPULATION)
        .unwrap()
        .with_upper_bound(top)
        .unwrap()
        .revenue(schedule)
        .unwrap();
    let far_beyond = RevenueEstimator::new(&density, POPULATION)
        .unwrap()
        .with_upper_bound(top * 3.0)
        .unwrap()
        .revenue(schedule)
        .unwrap();

    assert!((at_support - far_beyond).abs() / at_support < 1e-9);
}

#[test]
fn test_default_bound_truncates_top_bin() {
    let registry = registry();
    let density = standard_density().unwrap();
    let schedule = &registry.require(ProposalId::Current).unwrap().schedule;
    let (_, top) = density.support();

    let default_bound = RevenueEstimator::new(&density, POPULATION).unwrap();
    let full = RevenueEstimator::new(&density, POPULATION)
        .unwrap()
        .with_upper_bound(top)
        .unwrap();

    assert!(top > default_bound.upper_bound());
    assert!(full.revenue(schedule).unwrap() > default_bound.revenue(schedule).unwrap());
}

#[test]
fn test_revenue_summary_lists_every_proposal() {
    let registry = registry();
    let density = standard_density().unwrap();
    let estimator = RevenueEstimator::new(&density, POPULATION).unwrap();

    let rows = revenue_summary(&registry, &estimator).unwrap();

    let ids: Vec<&str> = rows.iter().map(|r| r.proposal).collect();
    assert_eq!(ids, vec!["current", "ods", "cssd", "pirates"]);
    assert!(rows.iter().all(|r| r.revenue > r.per_capita));
}

#[test]
fn test_default_comparison_grid() {
    let registry = registry();
    let wages = gross_wage_range(14_000.0, 80_000.0, 2_000.0).unwrap();

    let table = comparison_table(&registry, &wages).unwrap();

    assert_eq!(table.rows.len(), 33);
    assert_eq!(table.rows[0].gross_wage.to_string(), "14000");
    assert_eq!(table.rows[32].gross_wage.to_string(), "78000");
}

#[test]
fn test_current_law_marginal_rate_drops_above_cap() {
    let registry = registry();
    let current = registry.require(ProposalId::Current).unwrap();
    let cap = current.schedule.boundaries()[2];

    let below = marginal_rate(&current.schedule, cap - 1.0).unwrap();
    let at = marginal_rate(&current.schedule, cap).unwrap();
    let above = marginal_rate(&current.schedule, cap + 1.0).unwrap();

    assert_eq!(at, below);
    assert!(above < below);
    assert!(tax(&current.schedule, cap + 1.0) > tax(&current.schedule, cap));
}
