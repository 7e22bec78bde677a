//! Tax and marginal rate at a single labor cost.
//!
//! Both functions walk the brackets in order and compare the cost against a
//! closed interval `[lower, upper]`. A cost that sits exactly on a shared
//! boundary therefore belongs to the lower bracket: it pays that bracket's
//! full width and nothing in the next one.
//!
//! # Example
//!
//! ```
//! use labor_tax_core::{BracketSchedule, marginal_rate, tax};
//!
//! let schedule = BracketSchedule::new(vec![0.0, 100.0], vec![0.1, 0.2]).unwrap();
//!
//! assert!((tax(&schedule, 250.0) - 40.0).abs() < 1e-9);
//! assert_eq!(marginal_rate(&schedule, 250.0), Some(0.2));
//! assert_eq!(marginal_rate(&schedule, 100.0), Some(0.1));
//! ```

use crate::BracketSchedule;

/// Total tax owed at `cost`.
///
/// Brackets entirely below `cost` contribute their full width, the bracket
/// containing `cost` contributes the part up to `cost`, and summation stops
/// at the first bracket starting above `cost`. The final bracket has no upper
/// bound. Negative costs are outside the model and yield zero for schedules
/// starting at zero.
pub fn tax(
    schedule: &BracketSchedule,
    cost: f64,
) -> f64 {
    let mut total = 0.0;

    for bracket in schedule.brackets() {
        if cost < bracket.lower {
            break;
        }
        match bracket.upper {
            Some(upper) if cost > upper => total += (upper - bracket.lower) * bracket.rate,
            _ => total += (cost - bracket.lower) * bracket.rate,
        }
    }

    total
}

/// Marginal rate of the bracket containing `cost`.
///
/// At a shared boundary the lower bracket's rate is returned. Returns `None`
/// when `cost` lies below the first boundary or is NaN.
pub fn marginal_rate(
    schedule: &BracketSchedule,
    cost: f64,
) -> Option<f64> {
    schedule
        .brackets()
        .find(|b| b.lower <= cost && b.upper.is_none_or(|upper| cost <= upper))
        .map(|b| b.rate)
}
