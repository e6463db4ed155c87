//! # Unit Types
//!
//! Type-safe wrappers for the display units derived from the model's SI
//! values. These are plain `f64` newtypes that serialize as bare numbers.
//!
//! The model itself works in base SI units throughout (m, N, N·m, Pa, m⁴).
//! Deflection is usually shown in millimetres and elastic modulus in
//! gigapascals.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::units::{Meters, Millimeters};
//!
//! let deflection = Meters(0.0026);
//! let shown: Millimeters = deflection.into();
//! assert!((shown.0 - 2.6).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

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

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1e3)
    }
}

// ============================================================================
// Modulus Units
// ============================================================================

/// Stress or elastic modulus in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress or elastic modulus in gigapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gigapascals(pub f64);

impl From<Pascals> for Gigapascals {
    fn from(pa: Pascals) -> Self {
        Gigapascals(pa.0 / 1e9)
    }
}
