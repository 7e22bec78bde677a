//! Adaptive Gauss–Kronrod integration with mandatory split points.
//!
//! The interval is first cut at every split point, so no discontinuity of the
//! integrand or its derivative falls inside a piece. Each piece is evaluated
//! with the 15-point Kronrod rule, and the difference to the embedded 7-point
//! Gauss rule serves as its error estimate. The piece with the largest error
//! is bisected until the total error is within tolerance or the subdivision
//! budget runs out.
//!
//! # Example
//!
//! ```
//! use labor_tax_core::calculations::quadrature::{QuadratureConfig, integrate};
//!
//! // |x - 1| has a kink at 1; passing it as a split point makes the rule exact.
//! let result = integrate(|x| (x - 1.0).abs(), 0.0, 3.0, &[1.0], &QuadratureConfig::default())
//!     .unwrap();
//!
//! assert!((result.value - 2.5).abs() < 1e-12);
//! ```

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Kronrod abscissae on `[-1, 1]`, positive half, descending.
/// Odd indices are the 7-point Gauss abscissae.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Gauss weights for `XGK[1]`, `XGK[3]`, `XGK[5]` and the centre.
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Errors that can occur during integration.
#[derive(Debug, Error, PartialEq)]
pub enum QuadratureError {
    #[error("invalid integration interval [{lower}, {upper}]")]
    InvalidInterval { lower: f64, upper: f64 },

    #[error("absolute tolerance must be positive, got {0}")]
    InvalidAbsTolerance(f64),

    #[error("relative tolerance must be positive, got {0}")]
    InvalidRelTolerance(f64),

    #[error("subdivision budget must be at least one")]
    InvalidSubdivisionBudget,

    /// The integrand returned NaN or an infinity.
    #[error("integrand is not finite at x = {0}")]
    NonFiniteIntegrand(f64),

    /// The tolerance was not reached within the subdivision budget.
    #[error(
        "no convergence after {subdivisions} subdivisions: estimate {estimate}, error {error}"
    )]
    SubdivisionLimit {
        subdivisions: usize,
        estimate: f64,
        error: f64,
    },

    /// A piece became too narrow to bisect in floating point.
    #[error("round-off limits accuracy on [{lower}, {upper}]")]
    RoundOff { lower: f64, upper: f64 },
}

/// Tolerances and budget for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadratureConfig {
    /// Absolute error target.
    pub abs_tolerance: f64,

    /// Error target relative to the magnitude of the result.
    pub rel_tolerance: f64,

    /// Maximum number of bisections across all pieces.
    pub max_subdivisions: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            abs_tolerance: 1e-10,
            rel_tolerance: 1e-9,
            max_subdivisions: 500,
        }
    }
}

impl QuadratureConfig {
    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), QuadratureError> {
        if self.abs_tolerance.is_nan() || self.abs_tolerance <= 0.0 {
            return Err(QuadratureError::InvalidAbsTolerance(self.abs_tolerance));
        }
        if self.rel_tolerance.is_nan() || self.rel_tolerance <= 0.0 {
            return Err(QuadratureError::InvalidRelTolerance(self.rel_tolerance));
        }
        if self.max_subdivisions == 0 {
            return Err(QuadratureError::InvalidSubdivisionBudget);
        }
        Ok(())
    }
}

/// Result of a converged integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Integral {
    pub value: f64,

    /// Estimated absolute error of `value`.
    pub error: f64,

    /// Number of pieces the interval was cut into by split points.
    pub initial_pieces: usize,

    /// Bisections performed after the initial cut.
    pub subdivisions: usize,
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
}

/// Integrates `f` over `[lower, upper]`, cutting at every split point.
///
/// Split points outside the open interval `(lower, upper)` are ignored, and
/// duplicates are merged.
///
/// # Errors
///
/// Returns [`QuadratureError`] if the interval or configuration is invalid,
/// the integrand is not finite, or the tolerance cannot be met.
pub fn integrate<F>(
    f: F,
    lower: f64,
    upper: f64,
    split_points: &[f64],
    config: &QuadratureConfig,
) -> Result<Integral, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;
    if !lower.is_finite() || !upper.is_finite() || lower > upper {
        return Err(QuadratureError::InvalidInterval { lower, upper });
    }
    if lower == upper {
        return Ok(Integral {
            value: 0.0,
            error: 0.0,
            initial_pieces: 0,
            subdivisions: 0,
        });
    }

    let cuts = cut_points(lower, upper, split_points);
    let mut pieces = cuts
        .windows(2)
        .map(|w| kronrod_piece(&f, w[0], w[1]))
        .collect::<Result<Vec<_>, _>>()?;
    let initial_pieces = pieces.len();

    let mut subdivisions = 0;
    loop {
        let value: f64 = pieces.iter().map(|p| p.value).sum();
        let error: f64 = pieces.iter().map(|p| p.error).sum();
        let target = config.abs_tolerance.max(config.rel_tolerance * value.abs());

        if error <= target {
            debug!(
                value,
                error,
                initial_pieces,
                subdivisions,
                "quadrature converged"
            );
            return Ok(Integral {
                value,
                error,
                initial_pieces,
                subdivisions,
            });
        }
        if subdivisions >= config.max_subdivisions {
            return Err(QuadratureError::SubdivisionLimit {
                subdivisions,
                estimate: value,
                error,
            });
        }

        let worst = pieces
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.error.total_cmp(&b.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let piece = pieces.swap_remove(worst);
        let mid = 0.5 * (piece.lower + piece.upper);
        if mid <= piece.lower || mid >= piece.upper {
            return Err(QuadratureError::RoundOff {
                lower: piece.lower,
                upper: piece.upper,
            });
        }

        pieces.push(kronrod_piece(&f, piece.lower, mid)?);
        pieces.push(kronrod_piece(&f, mid, piece.upper)?);
        subdivisions += 1;
    }
}

/// Sorted, deduplicated cut points including both interval ends.
fn cut_points(
    lower: f64,
    upper: f64,
    split_points: &[f64],
) -> Vec<f64> {
    let mut cuts: Vec<f64> = split_points
        .iter()
        .copied()
        .filter(|&x| x > lower && x < upper)
        .collect();
    cuts.push(lower);
    cuts.push(upper);
    cuts.sort_by(f64::total_cmp);
    cuts.dedup();
    cuts
}

/// Applies the 15-point Kronrod rule and the embedded 7-point Gauss rule.
fn kronrod_piece<F>(
    f: &F,
    lower: f64,
    upper: f64,
) -> Result<Piece, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let centre = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);

    let eval = |x: f64| {
        let y = f(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(QuadratureError::NonFiniteIntegrand(x))
        }
    };

    let f_centre = eval(centre)?;
    let mut kronrod = f_centre * WGK[7];
    let mut gauss = f_centre * WG[3];

    for (j, (&x, &w)) in XGK.iter().zip(&WGK).take(7).enumerate() {
        let offset = half * x;
        let pair = eval(centre - offset)? + eval(centre + offset)?;
        kronrod += w * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Ok(Piece {
        lower,
        upper,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    })
}
