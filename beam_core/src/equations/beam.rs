//! # Single Point Load Beam Formulas
//!
//! Closed-form equations for a single-span beam carrying one concentrated
//! load `P` at distance `a` from the left (or fixed) end. Two boundary
//! conditions are covered:
//!
//! - **Simply supported**: pin at x = 0, roller at x = L
//! - **Cantilever**: fixed at x = 0, free at x = L
//!
//! ## Notation
//!
//! - `L` = Span length (m)
//! - `x` = Position along beam from the left end (m)
//! - `a` = Load position from the left end (m)
//! - `b` = L - a
//! - `P` = Point load magnitude (N)
//! - `E` = Modulus of elasticity (Pa)
//! - `I` = Second moment of area (m⁴)
//!
//! ## Branch Conventions
//!
//! Shear and moment switch to their right-hand branch when `x >= a`, so the
//! exact load point takes the right-hand value. Deflection keeps the left-hand
//! branch up to and including `x == a`. The two conventions are deliberate and
//! each function keeps its own.
//!
//! ## Sign Conventions
//!
//! - Loads: positive downward
//! - Reactions: positive upward
//! - Deflection: same sign as the load

// =============================================================================
// SIMPLY SUPPORTED
// =============================================================================

/// Reactions for point load P at position a on a simply supported span L
///
/// ```text
///        P
///        ↓
///    ────┬────────────
///    △   a            ○
///   R1  ←───────L────→ R2
/// ```
///
/// # Formulas
/// - R1 = P(L-a)/L
/// - R2 = Pa/L
///
/// # Returns
/// (R1, R2) - Left and right reactions (positive upward)
#[inline]
pub fn simple_point_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    let r1 = p * (l - a) / l;
    let r2 = p * a / l;
    (r1, r2)
}

/// Shear at position x on a simply supported span
///
/// # Formulas
/// - V(x) = R1           for x < a
/// - V(x) = R1 - P       for x ≥ a
#[inline]
pub fn simple_point_shear(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = simple_point_reactions(p, a, l);
    if x < a {
        r1
    } else {
        r1 - p
    }
}

/// Bending moment at position x on a simply supported span
///
/// # Formulas
/// - M(x) = R1·x           for x < a
/// - M(x) = R1·x - P(x-a)  for x ≥ a
///
/// Both branches give R1·a at the load point, so the diagram is continuous.
#[inline]
pub fn simple_point_moment(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = simple_point_reactions(p, a, l);
    if x < a {
        r1 * x
    } else {
        r1 * x - p * (x - a)
    }
}

/// Deflection at position x on a simply supported span
///
/// For x ≤ a:
/// ```text
/// δ(x) = Pbx(L² - b² - x²) / (6EIL)
/// ```
///
/// For x > a:
/// ```text
/// δ(x) = Pb(L-x)(2Lx - x² - b²) / (6EIL)
/// ```
///
/// where b = L - a. The right-hand branch is written in terms of `b` on both
/// factors; it coincides with the textbook form only for a = L/2.
///
/// E, I and L must be strictly positive.
#[inline]
pub fn simple_point_deflection(p: f64, a: f64, l: f64, x: f64, e: f64, i: f64) -> f64 {
    let b = l - a;
    let eil = e * i * l;

    if x <= a {
        p * b * x * (l * l - b * b - x * x) / (6.0 * eil)
    } else {
        p * b * (l - x) * (2.0 * l * x - x * x - b * b) / (6.0 * eil)
    }
}

// =============================================================================
// CANTILEVER
// =============================================================================

/// Reactions for point load P at position a on a cantilever fixed at x = 0
///
/// ```text
///    ▣      P
///    ▣      ↓
///    ▣══════┬══════
///    ▣  a        free
///    R, M  ←──L──→
/// ```
///
/// # Formulas
/// - R = P
/// - M = P(L-a)
///
/// # Returns
/// (R, M) - Vertical reaction and fixing moment
#[inline]
pub fn cantilever_point_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    (p, p * (l - a))
}

/// Shear at position x on a cantilever
///
/// # Formulas
/// - V(x) = P   for x < a
/// - V(x) = 0   for x ≥ a
#[inline]
pub fn cantilever_point_shear(p: f64, a: f64, x: f64) -> f64 {
    if x < a {
        p
    } else {
        0.0
    }
}

/// Bending moment at position x on a cantilever
///
/// # Formulas
/// - M(x) = P(L-x)   for x < a
/// - M(x) = 0        for x ≥ a
///
/// The moment drops to zero at the load point, leaving a jump of P(L-a).
#[inline]
pub fn cantilever_point_moment(p: f64, a: f64, l: f64, x: f64) -> f64 {
    if x < a {
        p * (l - x)
    } else {
        0.0
    }
}

/// Deflection at position x on a cantilever
///
/// For x ≤ a:
/// ```text
/// δ(x) = P(L-a)x² / (2EI)
/// ```
///
/// For x > a:
/// ```text
/// δ(x) = P(L-a)(2x(L-x) - (L-a)²) / (2EI)
/// ```
///
/// E and I must be strictly positive.
#[inline]
pub fn cantilever_point_deflection(p: f64, a: f64, l: f64, x: f64, e: f64, i: f64) -> f64 {
    let ei = e * i;
    let arm = l - a;

    if x <= a {
        p * arm * x * x / (2.0 * ei)
    } else {
        p * arm * (2.0 * x * (l - x) - arm * arm) / (2.0 * ei)
    }
}
