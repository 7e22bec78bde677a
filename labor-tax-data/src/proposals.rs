//! Named tax proposals expressed as schedules over labor cost.
//!
//! Each schedule folds personal income tax and the wage levies into one
//! marginal rate per bracket, so that a proposal can be compared on total
//! labor cost. Every proposal also carries the gross-to-cost multiplier its
//! levies imply, used when tabulating by gross wage.
//!
//! | Proposal | Brackets |
//! |----------|----------|
//! | Current  | levy-only band up to the taxpayer credit, flat 15 % above, reduced levies above the cap |
//! | ČSSD     | five progressive bands of 12 %–32 % plus levies, reduced levies above the cap |
//! | ODS      | reduced employer levy, flat 15 % above the levy cap |
//! | Piráti   | zero band up to the credit, then a single 47 % rate |

use std::fmt;
use std::str::FromStr;

use labor_tax_core::{BracketSchedule, ScheduleError};
use serde::Serialize;
use tracing::debug;

use crate::DataError;
use crate::constants::{
    AVERAGE_GROSS_WAGE, CAP_MULTIPLE, COST_MULTIPLIER, EXCESS_COST_MULTIPLIER, HEALTH_LEVY,
    REDUCED_COST_MULTIPLIER, REDUCED_SOCIAL_AND_HEALTH_LEVY, RESIDUAL_LEVY,
    SOCIAL_AND_HEALTH_LEVY, TAXPAYER_CREDIT,
};

/// Identifies one of the compared proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProposalId {
    Current,
    Cssd,
    Ods,
    Pirates,
}

impl ProposalId {
    pub const ALL: [ProposalId; 4] = [Self::Current, Self::Ods, Self::Cssd, Self::Pirates];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Cssd => "cssd",
            Self::Ods => "ods",
            Self::Pirates => "pirates",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Some(Self::Current),
            "cssd" => Some(Self::Cssd),
            "ods" => Some(Self::Ods),
            "pirates" => Some(Self::Pirates),
            _ => None,
        }
    }
}

impl fmt::Display for ProposalId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalId {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DataError::UnknownProposal(s.to_string()))
    }
}

/// A named schedule together with its gross-to-cost multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub id: ProposalId,
    pub name: &'static str,

    /// Labor cost per crown of gross wage under this proposal's levies.
    pub cost_multiplier: f64,

    pub schedule: BracketSchedule,
}

impl Proposal {
    /// Labor cost of a gross wage under this proposal.
    ///
    /// This is a flat `gross × cost_multiplier` with no cap. Above the levy
    /// cap it overstates cost compared with [`LaborCostTransform`], which
    /// switches to the excess multiplier and drives the wage density. Report
    /// tables use the flat figure; revenue uses the density.
    ///
    /// [`LaborCostTransform`]: labor_tax_core::LaborCostTransform
    pub fn labor_cost(
        &self,
        gross_wage: f64,
    ) -> f64 {
        gross_wage * self.cost_multiplier
    }
}

/// Read-only set of proposals, built once and passed to whoever needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalRegistry {
    proposals: Vec<Proposal>,
}

impl ProposalRegistry {
    pub fn new(proposals: Vec<Proposal>) -> Self {
        Self { proposals }
    }

    /// Builds the four standard proposals from [`crate::constants`].
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Schedule`] if a schedule fails validation.
    pub fn standard() -> Result<Self, DataError> {
        let proposals = vec![
            proposal(ProposalId::Current, "Current law", COST_MULTIPLIER, current)?,
            proposal(ProposalId::Ods, "ODS", REDUCED_COST_MULTIPLIER, ods)?,
            proposal(ProposalId::Cssd, "ČSSD", COST_MULTIPLIER, cssd)?,
            proposal(ProposalId::Pirates, "Piráti", COST_MULTIPLIER, pirates)?,
        ];
        debug!(count = proposals.len(), "built standard proposal registry");
        Ok(Self::new(proposals))
    }

    pub fn get(
        &self,
        id: ProposalId,
    ) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    /// Like [`get`](Self::get), failing with [`DataError::MissingProposal`].
    pub fn require(
        &self,
        id: ProposalId,
    ) -> Result<&Proposal, DataError> {
        self.get(id)
            .ok_or(DataError::MissingProposal(id.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

fn proposal(
    id: ProposalId,
    name: &'static str,
    cost_multiplier: f64,
    build: fn(f64) -> Result<BracketSchedule, ScheduleError>,
) -> Result<Proposal, DataError> {
    let schedule = build(cost_multiplier).map_err(|source| DataError::Schedule {
        proposal: id.as_str(),
        source,
    })?;
    Ok(Proposal {
        id,
        name,
        cost_multiplier,
        schedule,
    })
}

/// Labor cost at which social levies stop.
fn levy_cap(k: f64) -> f64 {
    CAP_MULTIPLE * AVERAGE_GROSS_WAGE * k
}

/// Marginal levy per crown of labor cost above the cap.
fn capped_levy_rate() -> f64 {
    HEALTH_LEVY / EXCESS_COST_MULTIPLIER + RESIDUAL_LEVY / EXCESS_COST_MULTIPLIER
}

fn current(k: f64) -> Result<BracketSchedule, ScheduleError> {
    let levy = SOCIAL_AND_HEALTH_LEVY / k;
    BracketSchedule::from_pairs(&[
        (0.0, levy),
        (TAXPAYER_CREDIT / 0.15, 0.15 + levy),
        (levy_cap(k), 0.15 + capped_levy_rate()),
    ])
}

fn cssd(k: f64) -> Result<BracketSchedule, ScheduleError> {
    let levy = SOCIAL_AND_HEALTH_LEVY / k;
    BracketSchedule::from_pairs(&[
        (0.0, levy),
        (17_250.0, 0.12 + levy),
        (40_200.0, 0.15 + levy),
        (53_600.0, 0.25 + levy),
        (67_000.0, 0.32 + levy),
        (levy_cap(k), 0.32 + capped_levy_rate()),
    ])
}

// The ODS calculator quotes a marginal rate of 43.9 % below the cap and a
// flat 15 % above it.
fn ods(k: f64) -> Result<BracketSchedule, ScheduleError> {
    BracketSchedule::from_pairs(&[
        (0.0, REDUCED_SOCIAL_AND_HEALTH_LEVY / k),
        (
            TAXPAYER_CREDIT / 0.15,
            (0.15 + REDUCED_SOCIAL_AND_HEALTH_LEVY) / k,
        ),
        (levy_cap(k), 0.15),
    ])
}

fn pirates(_k: f64) -> Result<BracketSchedule, ScheduleError> {
    BracketSchedule::from_pairs(&[(0.0, 0.0), (TAXPAYER_CREDIT / 0.47, 0.47)])
}
