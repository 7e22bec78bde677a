//! Numeric evaluation of tax schedules.
//!
//! This module provides the pure functions used to compare tax proposals:
//! tax owed and marginal rate at a labor cost, and aggregate revenue over a
//! wage distribution.

pub mod common;
pub mod density;
pub mod evaluator;
pub mod quadrature;
pub mod revenue;

pub use density::WageDensity;
pub use evaluator::{marginal_rate, tax};
pub use quadrature::{Integral, QuadratureConfig, QuadratureError, integrate};
pub use revenue::{RevenueError, RevenueEstimate, RevenueEstimator};
