//! Size constraints over text, lists, and maps.

use std::sync::Arc;

use verdict_value::Value;

use crate::foundation::{ConstraintContext, ConstraintValidator, EngineError};
use crate::metadata::ConstraintDescriptor;

/// Requires an element count (or character count for text) within bounds.
#[derive(Debug, Clone, Copy)]
pub struct SizeValidator {
    min: usize,
    max: Option<usize>,
}

impl SizeValidator {
    fn measure(value: &Value) -> Option<usize> {
        match value {
            Value::Text(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }
}

impl ConstraintValidator for SizeValidator {
    fn is_valid(&self, value: &Value, _ctx: &ConstraintContext<'_>) -> bool {
        let Some(size) = Self::measure(value) else {
            return true;
        };
        size >= self.min && self.max.is_none_or(|max| size <= max)
    }
}

pub(crate) fn size(
    descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    let name = descriptor.kind().name();
    let min = match descriptor.params().get_int("min") {
        Some(min) if min < 0 => {
            return Err(EngineError::declaration(name, "`min` must not be negative"));
        }
        Some(min) => usize::try_from(min).unwrap_or(0),
        None => 0,
    };
    let max = match descriptor.params().get_int("max") {
        Some(max) if max < 0 => {
            return Err(EngineError::declaration(name, "`max` must not be negative"));
        }
        Some(max) => Some(usize::try_from(max).unwrap_or(0)),
        None => None,
    };
    if max.is_some_and(|max| min > max) {
        return Err(EngineError::declaration(
            name,
            format!("`min` ({min}) exceeds `max` ({})", max.unwrap_or(0)),
        ));
    }
    Ok(Arc::new(SizeValidator { min, max }))
}
