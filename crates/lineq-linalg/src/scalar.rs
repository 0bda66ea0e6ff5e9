//! Numeric scalar trait.
//!
//! Every dense container and elimination routine in this crate is generic
//! over [`Scalar`], which pins down the floating-point operations the
//! solver needs together with the pivot tolerance used to detect
//! singular columns.

use std::fmt::{Debug, Display};
use std::iter::Sum;

use num_traits::Float;

/// Threshold below which a pivot magnitude is treated as zero.
pub const PIVOT_EPSILON: f64 = 1e-9;

/// A floating-point scalar usable as a matrix entry.
///
/// # Laws
///
/// - `PIVOT_EPSILON` is strictly positive
/// - `from_f64` is the identity on values exactly representable in `Self`
pub trait Scalar: Float + Sum + Default + Debug + Display + Send + Sync + 'static {
    /// Pivot magnitude below which a column is considered singular.
    const PIVOT_EPSILON: Self;

    /// Converts a parsed `f64` coefficient into this scalar type.
    fn from_f64(value: f64) -> Self;

    /// Widens this scalar to `f64` for reporting.
    fn as_f64(self) -> f64;

    /// Returns true if `|self|` is below the pivot tolerance.
    fn is_negligible(self) -> bool {
        self.abs() < Self::PIVOT_EPSILON
    }
}

impl Scalar for f64 {
    const PIVOT_EPSILON: Self = PIVOT_EPSILON;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

impl Scalar for f32 {
    #[allow(clippy::cast_possible_truncation)]
    const PIVOT_EPSILON: Self = PIVOT_EPSILON as f32;

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        f64::from(self)
    }
}
