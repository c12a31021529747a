//! Fixed-scale comparison of ledger amounts.
//!
//! Amounts travel as `f64`, but two amounts are compared at a fixed
//! 10^18 scale (the minimum decimal precision the ledger's databases
//! support). Any difference smaller than one precision unit is treated
//! as exactly zero, which defines an equivalence class of
//! "indistinguishable at this precision" rather than a naive equality
//! check. Balance and value comparisons throughout the client rely on
//! this class.
//!
//! Known edge case, accepted by design: [`compare`] is antisymmetric and
//! reflexive, but transitivity can fail for triples straddling a
//! precision boundary (`a ~ b` and `b ~ c` do not force `a ~ c`). The
//! ledger's historical records were produced under these exact rules, so
//! the behavior must not be tightened to arbitrary-precision arithmetic.

use std::cmp::Ordering;

/// Comparison scale: 10^18, the minimum supported database decimal
/// precision.
pub const PRECISION_SCALE: f64 = 1e18;

/// Collapse values below the precision unit to exactly zero.
///
/// Returns `0.0` when `|x * 10^18| < 1`, otherwise `x` unchanged.
pub fn normalize(x: f64) -> f64 {
    if (x * PRECISION_SCALE).abs() < 1.0 { 0.0 } else { x }
}

/// Compare two amounts at the fixed 10^18 scale.
///
/// Both operands are normalized first; the scaled difference is `Equal`
/// when its magnitude is below one precision unit.
pub fn compare(a: f64, b: f64) -> Ordering {
    let diff = (normalize(a) - normalize(b)) * PRECISION_SCALE;
    if diff.abs() < 1.0 {
        Ordering::Equal
    } else if diff > 0.0 {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Whether two amounts are indistinguishable at the precision scale.
pub fn equal(a: f64, b: f64) -> bool {
    compare(a, b) == Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_below_precision_is_zero() {
        assert_eq!(normalize(1e-19), 0.0);
        assert_eq!(normalize(-1e-19), 0.0);
        assert_eq!(normalize(0.0), 0.0);
    }

    #[test]
    fn normalize_above_precision_unchanged() {
        assert_eq!(normalize(1e-17), 1e-17);
        assert_eq!(normalize(42.5), 42.5);
        assert_eq!(normalize(-3.25), -3.25);
    }

    #[test]
    fn compare_reflexive() {
        for x in [0.0, 1.0, -1.0, 1e-19, 123456.789, f64::MIN_POSITIVE] {
            assert_eq!(compare(x, x), Ordering::Equal);
        }
    }

    #[test]
    fn compare_antisymmetric() {
        assert_eq!(compare(2.0, 1.0), Ordering::Greater);
        assert_eq!(compare(1.0, 2.0), Ordering::Less);
    }

    #[test]
    fn equal_below_scale_difference() {
        // Difference of 1e-19 is below the 10^-18 precision unit.
        assert!(equal(1.000_000_000_000_000_000_1, 1.0));
    }

    #[test]
    fn not_equal_above_scale_difference() {
        assert!(!equal(1.0, 1.000_000_001));
        assert_eq!(compare(1.000_000_001, 1.0), Ordering::Greater);
    }

    #[test]
    fn compare_treats_sub_precision_as_zero() {
        // Both operands collapse to zero, so they compare equal even
        // though the raw floats differ.
        assert!(equal(1e-19, -1e-19));
        assert_eq!(compare(1e-19, 0.0), Ordering::Equal);
    }

    #[test]
    fn negative_values() {
        assert_eq!(compare(-1.0, -2.0), Ordering::Greater);
        assert!(equal(-1.0, -1.0));
    }
}
