pub mod calculations;
pub mod models;

pub use calculations::{
    Integral, QuadratureConfig, QuadratureError, RevenueError, RevenueEstimate,
    RevenueEstimator, WageDensity, marginal_rate, tax,
};
pub use models::*;
