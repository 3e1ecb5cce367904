//! Clock-relative temporal constraints.
//!
//! One validator covers `Past`, `PastOrPresent`, `Future`, and
//! `FutureOrPresent`, for both dates and datetimes. "Now" comes from the
//! engine's [`Clock`](crate::foundation::Clock); dates are compared against
//! the clock's current UTC calendar date.

use std::cmp::Ordering;
use std::sync::Arc;

use verdict_value::Value;

use crate::foundation::{ConstraintContext, ConstraintValidator, EngineError};
use crate::metadata::ConstraintDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tense {
    Past,
    Future,
}

/// A configured temporal check.
#[derive(Debug, Clone, Copy)]
pub struct TemporalValidator {
    tense: Tense,
    or_present: bool,
}

impl ConstraintValidator for TemporalValidator {
    fn is_valid(&self, value: &Value, ctx: &ConstraintContext<'_>) -> bool {
        let now = ctx.clock.now();
        let ordering = match value {
            Value::Date(date) => date.cmp(&now.date_naive()),
            Value::DateTime(datetime) => datetime.cmp(&now),
            _ => return true,
        };
        match ordering {
            Ordering::Less => self.tense == Tense::Past,
            Ordering::Greater => self.tense == Tense::Future,
            Ordering::Equal => self.or_present,
        }
    }
}

pub(crate) fn past(
    _descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    Ok(Arc::new(TemporalValidator {
        tense: Tense::Past,
        or_present: false,
    }))
}

pub(crate) fn past_or_present(
    _descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    Ok(Arc::new(TemporalValidator {
        tense: Tense::Past,
        or_present: true,
    }))
}

pub(crate) fn future(
    _descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    Ok(Arc::new(TemporalValidator {
        tense: Tense::Future,
        or_present: false,
    }))
}

pub(crate) fn future_or_present(
    _descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    Ok(Arc::new(TemporalValidator {
        tense: Tense::Future,
        or_present: true,
    }))
}
