use std::io;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use labor_tax_core::RevenueEstimator;
use labor_tax_data::constants::POPULATION;
use labor_tax_data::{
    ProposalId, ProposalRegistry, comparison_table, gross_wage_range, marginal_series,
    revenue_summary, savings_series, standard_density, write_csv,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compare labor tax proposals by tax burden, marginal rate and revenue.
///
/// Amounts are monthly, in Czech crowns, tabulated by gross wage.
#[derive(Debug, Parser)]
#[command(name = "labor-tax-report")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Tax owed under every proposal.
    Table {
        #[command(flatten)]
        range: RangeArgs,

        /// Write CSV instead of an aligned table
        #[arg(long, default_value_t = false)]
        csv: bool,
    },

    /// Tax and marginal rate of a single proposal.
    Marginal {
        /// Proposal to tabulate (current, cssd, ods, pirates)
        #[arg(short, long, default_value = "current")]
        proposal: ProposalId,

        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, default_value_t = false)]
        csv: bool,
    },

    /// Tax saved when moving from a baseline to another proposal.
    Savings {
        /// Proposal compared against the baseline
        #[arg(short, long, default_value = "pirates")]
        against: ProposalId,

        #[arg(short, long, default_value = "current")]
        baseline: ProposalId,

        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, default_value_t = false)]
        csv: bool,
    },

    /// Estimated revenue of every proposal.
    Revenue {
        #[arg(long, default_value_t = false)]
        csv: bool,
    },
}

/// Gross wage sampling grid; `to` is exclusive.
#[derive(Debug, Args)]
struct RangeArgs {
    #[arg(long, default_value_t = 14_000.0)]
    from: f64,

    #[arg(long, default_value_t = 80_000.0)]
    to: f64,

    #[arg(long, default_value_t = 2_000.0)]
    step: f64,
}

impl RangeArgs {
    fn wages(&self) -> Result<Vec<f64>> {
        gross_wage_range(self.from, self.to, self.step).context("Invalid wage range")
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Logs to stderr so CSV on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let registry = ProposalRegistry::standard().context("Failed to build proposals")?;
    debug!(proposals = registry.len(), "registry ready");

    match cli.command {
        Command::Table { range, csv } => {
            let table = comparison_table(&registry, &range.wages()?)?;
            if csv {
                table.write_csv(io::stdout())?;
            } else {
                print!("{table}");
            }
        }
        Command::Marginal {
            proposal,
            range,
            csv,
        } => {
            let proposal = registry.require(proposal)?;
            let rows = marginal_series(proposal, &range.wages()?)?;
            if csv {
                write_csv(io::stdout(), &rows)?;
            } else {
                println!("{}", proposal.name);
                println!("{:>8} {:>8} {:>8} {:>8}", "wage", "cost", "tax", "rate %");
                for row in &rows {
                    let rate = row
                        .marginal_rate
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:>8} {:>8} {:>8} {:>8}",
                        row.gross_wage, row.labor_cost, row.tax, rate
                    );
                }
            }
        }
        Command::Savings {
            against,
            baseline,
            range,
            csv,
        } => {
            let baseline = registry.require(baseline)?;
            let other = registry.require(against)?;
            let rows = savings_series(baseline, other, &range.wages()?)?;
            if csv {
                write_csv(io::stdout(), &rows)?;
            } else {
                println!("{} vs {}", other.name, baseline.name);
                for row in &rows {
                    println!("{:>8} {:>8}", row.gross_wage, row.savings);
                }
            }
        }
        Command::Revenue { csv } => {
            let density = standard_density().context("Failed to build wage density")?;
            let estimator = RevenueEstimator::new(&density, POPULATION)?;
            info!(
                population = POPULATION,
                upper_bound = estimator.upper_bound(),
                "estimating revenue"
            );
            let rows = revenue_summary(&registry, &estimator)?;
            if csv {
                write_csv(io::stdout(), &rows)?;
            } else {
                for row in &rows {
                    println!("{:<12} {:>14} {:>8}", row.name, row.revenue, row.per_capita);
                }
            }
        }
    }

    Ok(())
}
