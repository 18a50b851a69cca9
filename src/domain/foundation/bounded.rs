//! Bounded real-valued value objects used by the perception pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A value in the closed interval [0, 1].
///
/// Used for confidences and normalized power levels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitInterval(f64);

impl UnitInterval {
    /// Zero.
    pub const ZERO: Self = Self(0.0);

    /// One.
    pub const ONE: Self = Self(1.0);

    /// Creates a UnitInterval, returning an error if out of range or NaN.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("unit", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Creates a UnitInterval, clamping into range. NaN maps to zero.
    ///
    /// Use only where the input is a derived quantity (e.g. a weighted sum)
    /// rather than a caller-supplied field.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the smaller of two values.
    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Multiplies two unit values; the product stays in range.
    pub fn product(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }
}

impl Default for UnitInterval {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for UnitInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// A value in the closed interval [-1, 1].
///
/// Used for valuation shift estimates and normalized valence.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedUnit(f64);

impl SignedUnit {
    /// Zero.
    pub const ZERO: Self = Self(0.0);

    /// Creates a SignedUnit, returning an error if out of range or NaN.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("signed_unit", -1.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Creates a SignedUnit, clamping into range. NaN maps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(-1.0, 1.0))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for SignedUnit {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for SignedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}
