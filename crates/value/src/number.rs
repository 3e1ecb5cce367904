//! Exact comparison across numeric representations.
//!
//! Constraint bounds may be declared as `i64` or as arbitrary-precision
//! [`Decimal`]s, while validated values arrive as any numeric kind. Mixing
//! representations must never truncate the bound: an `i64` is promoted to
//! `Decimal` losslessly, and a finite `f64` is promoted to the closest
//! `Decimal` rather than the bound being collapsed to a float.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::value::Value;

/// A numeric view of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
    Decimal(Decimal),
}

impl NumberValue {
    /// Extracts the numeric view of a value, if it is numeric.
    #[must_use]
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(Self::Int(*i)),
            Value::Float(x) => Some(Self::Float(*x)),
            Value::Decimal(d) => Some(Self::Decimal(*d)),
            _ => None,
        }
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl From<i64> for NumberValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Decimal> for NumberValue {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

/// Compares two numbers exactly, promoting across representations.
///
/// Returns `None` only when a side is NaN — NaN is incomparable, and bound
/// validators treat an incomparable value as failing the bound. Infinities
/// order in the usual way: `+∞` is greater than every finite number of any
/// representation, `-∞` less than every one.
#[must_use]
pub fn compare_exact(left: NumberValue, right: NumberValue) -> Option<Ordering> {
    use NumberValue::{Decimal as Dec, Float, Int};

    match (left, right) {
        (Int(a), Int(b)) => Some(a.cmp(&b)),
        (Dec(a), Dec(b)) => Some(a.cmp(&b)),
        (Int(a), Dec(b)) => Some(Decimal::from(a).cmp(&b)),
        (Dec(a), Int(b)) => Some(a.cmp(&Decimal::from(b))),
        (Float(a), Float(b)) => a.partial_cmp(&b),
        (Float(a), Int(b)) => compare_float(a, Decimal::from(b)),
        (Float(a), Dec(b)) => compare_float(a, b),
        (Int(a), Float(b)) => compare_float(b, Decimal::from(a)).map(Ordering::reverse),
        (Dec(a), Float(b)) => compare_float(b, a).map(Ordering::reverse),
    }
}

/// Compares a float against an exact decimal.
fn compare_float(float: f64, exact: Decimal) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float.is_infinite() {
        return Some(if float > 0.0 { Ordering::Greater } else { Ordering::Less });
    }
    match Decimal::from_f64(float) {
        Some(promoted) => Some(promoted.cmp(&exact)),
        // Finite but outside Decimal's range: its magnitude exceeds any
        // representable exact number, so the sign decides.
        None => Some(if float > 0.0 { Ordering::Greater } else { Ordering::Less }),
    }
}
