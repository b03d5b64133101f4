//! # Unit Types
//!
//! Type-safe wrappers for the metric units the calculators work in, plus the
//! two rounding rules every material estimate shares: add a waste margin,
//! then round piece counts up.
//!
//! ## Metric Units
//!
//! - Length: metres (m) for rooms and walls, millimetres (mm) for materials
//! - Area: square metres (m²), square millimetres (mm²) for conductors
//! - Volume: cubic metres (m³), litres (l)
//! - Mass: kilograms (kg)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Meters, Millimeters, ceil_count};
//!
//! let tile: Meters = Millimeters(300.0).into();
//! assert_eq!(tile.0, 0.3);
//!
//! // 12.0000000001 pieces is still twelve pieces
//! assert_eq!(ceil_count(12.000_000_000_1), Some(12));
//! assert_eq!(ceil_count(12.01), Some(13));
//! assert_eq!(ceil_count(5e300), None);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Absolute slack applied before rounding counts, so float noise from
/// unit conversions does not buy an extra roll or bag.
pub const COUNT_EPSILON: f64 = 1e-9;

/// Largest piece count an estimate reports
pub const MAX_COUNT: u64 = 1_000_000_000;

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Area in square millimetres (conductor cross-sections)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

impl From<SquareMillimeters> for SquareMeters {
    fn from(mm2: SquareMillimeters) -> Self {
        SquareMeters(mm2.0 / 1_000_000.0)
    }
}

impl From<SquareMeters> for SquareMillimeters {
    fn from(m2: SquareMeters) -> Self {
        SquareMillimeters(m2.0 * 1_000_000.0)
    }
}

impl Mul<Meters> for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

/// Volume in litres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

impl From<CubicMeters> for Liters {
    fn from(m3: CubicMeters) -> Self {
        Liters(m3.0 * 1000.0)
    }
}

impl From<Liters> for CubicMeters {
    fn from(l: Liters) -> Self {
        CubicMeters(l.0 / 1000.0)
    }
}

impl Mul<Meters> for SquareMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// How many bags of `rhs` a mass fills (fractional)
impl Div<Kilograms> for Kilograms {
    type Output = f64;
    fn div(self, rhs: Kilograms) -> f64 {
        self.0 / rhs.0
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(SquareMillimeters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Liters);
impl_arithmetic!(Kilograms);

// ============================================================================
// Rounding Rules
// ============================================================================

/// Add a percentage margin: `quantity * (1 + percent / 100)`.
pub fn with_waste(quantity: f64, percent: f64) -> f64 {
    quantity * (1.0 + percent / 100.0)
}

/// Round a piece count up. Negative inputs clamp to zero.
///
/// Returns `None` when the count is not finite or exceeds [`MAX_COUNT`].
pub fn ceil_count(quantity: f64) -> Option<u64> {
    whole_count((quantity - COUNT_EPSILON).ceil())
}

/// Round a piece count down (whole pieces that fit). Negative inputs clamp to zero.
///
/// Returns `None` when the count is not finite or exceeds [`MAX_COUNT`].
pub fn floor_count(quantity: f64) -> Option<u64> {
    whole_count((quantity + COUNT_EPSILON).floor())
}

fn whole_count(rounded: f64) -> Option<u64> {
    if rounded.is_nan() || rounded > MAX_COUNT as f64 {
        None
    } else if rounded <= 0.0 {
        Some(0)
    } else {
        Some(rounded as u64)
    }
}
