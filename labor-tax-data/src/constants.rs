//! Economic constants the proposals and the wage density are built from.
//!
//! Amounts are monthly, in Czech crowns.

/// Current average gross monthly wage.
pub const AVERAGE_GROSS_WAGE: f64 = 28_232.0;

/// Average gross wage in the year the wage table was sampled.
pub const REFERENCE_AVERAGE_GROSS_WAGE: f64 = 27_002.0;

/// Monthly basic taxpayer credit.
pub const TAXPAYER_CREDIT: f64 = 2_070.0;

/// Number of employees the density is scaled to.
pub const POPULATION: f64 = 2_900_000.0;

/// Labor cost per crown of gross wage under current levies.
pub const COST_MULTIPLIER: f64 = 1.34;

/// Labor cost per crown of gross wage with a 2 pp lower employer levy.
pub const REDUCED_COST_MULTIPLIER: f64 = 1.32;

/// Labor cost per crown of gross wage above the social levy cap.
pub const EXCESS_COST_MULTIPLIER: f64 = 1.09;

/// Social levy cap in multiples of the average gross wage.
pub const CAP_MULTIPLE: f64 = 4.0;

/// Social and health levies on gross wage below the cap.
pub const SOCIAL_AND_HEALTH_LEVY: f64 = 0.45;

/// Social and health levies with the reduced employer levy.
pub const REDUCED_SOCIAL_AND_HEALTH_LEVY: f64 = 0.43;

/// Health levy on gross wage above the cap.
pub const HEALTH_LEVY: f64 = 0.135;

/// Remaining levies on gross wage above the cap.
pub const RESIDUAL_LEVY: f64 = 0.07;

/// Gross-wage edges of the wage table.
pub const WAGE_TABLE_EDGES: [f64; 19] = [
    0.0, 10_000.0, 12_000.0, 14_000.0, 16_000.0, 18_000.0, 20_000.0, 22_000.0, 24_000.0,
    26_000.0, 28_000.0, 30_000.0, 32_000.0, 36_000.0, 40_000.0, 50_000.0, 60_000.0, 80_000.0,
    600_000.0,
];

/// Share of employees in each wage table bin, in percent.
pub const WAGE_TABLE_FREQUENCIES: [f64; 18] = [
    3.7, 5.6, 6.1, 6.8, 7.5, 7.9, 7.9, 8.1, 7.7, 6.5, 5.5, 4.4, 6.3, 4.1, 5.6, 2.3, 2.0, 1.9,
];
