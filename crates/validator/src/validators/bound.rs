//! The generic numeric bound validator.
//!
//! `Min`/`Max` carry an `i64` bound; `DecimalMin`/`DecimalMax` carry an
//! arbitrary-precision bound (given as a decimal or as a parsable string)
//! and an `inclusive` flag. All four are the same validator configured with
//! a direction, comparing through [`compare_exact`] so the bound is never
//! truncated to the value's representation.

use std::cmp::Ordering;
use std::sync::Arc;

use verdict_value::{NumberValue, Value, compare_exact};

use crate::foundation::{ConstraintContext, ConstraintValidator, EngineError};
use crate::metadata::ConstraintDescriptor;

/// Which side of the bound is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Lower,
    Upper,
}

/// A configured numeric bound check.
#[derive(Debug)]
pub struct BoundValidator {
    bound: NumberValue,
    direction: Direction,
    inclusive: bool,
}

impl BoundValidator {
    fn initialize(
        descriptor: &ConstraintDescriptor,
        direction: Direction,
        decimal: bool,
    ) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
        let name = descriptor.kind().name();
        let bound = match descriptor.params().get("value") {
            Some(Value::Int(i)) => NumberValue::Int(*i),
            Some(Value::Decimal(d)) if decimal => NumberValue::Decimal(*d),
            Some(Value::Text(s)) if decimal => NumberValue::Decimal(s.parse().map_err(|_| {
                EngineError::declaration(name, format!("`{s}` is not a valid decimal bound"))
            })?),
            Some(other) => {
                return Err(EngineError::declaration(
                    name,
                    format!("bound parameter `value` has unsupported type `{}`", other.kind()),
                ));
            }
            None => {
                return Err(EngineError::declaration(name, "missing bound parameter `value`"));
            }
        };
        let inclusive = if decimal {
            descriptor.params().get_bool("inclusive").unwrap_or(true)
        } else {
            true
        };
        Ok(Arc::new(Self {
            bound,
            direction,
            inclusive,
        }))
    }
}

impl ConstraintValidator for BoundValidator {
    fn is_valid(&self, value: &Value, _ctx: &ConstraintContext<'_>) -> bool {
        let Some(number) = NumberValue::of(value) else {
            // Null, or a non-numeric value resolution would not have routed
            // here: nothing to check.
            return true;
        };
        match compare_exact(number, self.bound) {
            // NaN is incomparable and satisfies no bound.
            None => false,
            Some(Ordering::Equal) => self.inclusive,
            Some(Ordering::Greater) => self.direction == Direction::Lower,
            Some(Ordering::Less) => self.direction == Direction::Upper,
        }
    }
}

pub(crate) fn min(
    descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    BoundValidator::initialize(descriptor, Direction::Lower, false)
}

pub(crate) fn max(
    descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    BoundValidator::initialize(descriptor, Direction::Upper, false)
}

pub(crate) fn decimal_min(
    descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    BoundValidator::initialize(descriptor, Direction::Lower, true)
}

pub(crate) fn decimal_max(
    descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    BoundValidator::initialize(descriptor, Direction::Upper, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SystemClock;
    use rust_decimal::Decimal;

    fn ctx_clock() -> SystemClock {
        SystemClock
    }

    fn check(
        factory: fn(&ConstraintDescriptor) -> Result<Arc<dyn ConstraintValidator>, EngineError>,
        descriptor: &ConstraintDescriptor,
        value: impl Into<Value>,
    ) -> bool {
        let clock = ctx_clock();
        let ctx = ConstraintContext { clock: &clock };
        factory(descriptor).unwrap().is_valid(&value.into(), &ctx)
    }

    #[test]
    fn min_is_inclusive() {
        let descriptor = ConstraintDescriptor::min(0);
        assert!(check(min, &descriptor, 0_i64));
        assert!(check(min, &descriptor, 1_i64));
        assert!(!check(min, &descriptor, -1_i64));
    }

    #[test]
    fn max_is_inclusive() {
        let descriptor = ConstraintDescriptor::max(10);
        assert!(check(max, &descriptor, 10_i64));
        assert!(!check(max, &descriptor, 11_i64));
    }

    #[test]
    fn max_int_value_meets_equal_decimal_bound() {
        let descriptor = ConstraintDescriptor::decimal_max(Decimal::from(i64::MAX));
        assert!(check(decimal_max, &descriptor, i64::MAX));
        let descriptor = ConstraintDescriptor::decimal_min(Decimal::from(i64::MAX));
        assert!(check(decimal_min, &descriptor, i64::MAX));
    }

    #[test]
    fn exclusive_decimal_bound_rejects_equality() {
        let descriptor = ConstraintDescriptor::decimal_min(Decimal::ONE).exclusive();
        assert!(!check(decimal_min, &descriptor, Decimal::ONE));
        assert!(check(decimal_min, &descriptor, Decimal::TWO));
    }

    #[test]
    fn decimal_bound_parses_from_text() {
        let descriptor =
            ConstraintDescriptor::new(crate::metadata::ConstraintKind::DecimalMin)
                .param("value", "10.50");
        assert!(check(decimal_min, &descriptor, Decimal::new(1050, 2)));
        assert!(!check(decimal_min, &descriptor, Decimal::new(1049, 2)));
    }

    #[test]
    fn unparsable_decimal_bound_is_a_declaration_error() {
        let descriptor =
            ConstraintDescriptor::new(crate::metadata::ConstraintKind::DecimalMin)
                .param("value", "ten and a half");
        assert!(matches!(
            decimal_min(&descriptor),
            Err(EngineError::ConstraintDeclaration { .. })
        ));
    }

    #[test]
    fn missing_bound_is_a_declaration_error() {
        let descriptor = ConstraintDescriptor::new(crate::metadata::ConstraintKind::Min);
        assert!(matches!(
            min(&descriptor),
            Err(EngineError::ConstraintDeclaration { .. })
        ));
    }

    #[test]
    fn nan_satisfies_no_bound() {
        assert!(!check(min, &ConstraintDescriptor::min(0), f64::NAN));
        assert!(!check(max, &ConstraintDescriptor::max(0), f64::NAN));
    }

    #[test]
    fn infinities_compare_by_sign() {
        assert!(check(min, &ConstraintDescriptor::min(0), f64::INFINITY));
        assert!(!check(max, &ConstraintDescriptor::max(0), f64::INFINITY));
        assert!(check(max, &ConstraintDescriptor::max(0), f64::NEG_INFINITY));
    }

    #[test]
    fn null_is_valid() {
        assert!(check(min, &ConstraintDescriptor::min(0), Value::Null));
    }
}
