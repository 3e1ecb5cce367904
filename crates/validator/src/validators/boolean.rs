//! Boolean constraints.

use std::sync::Arc;

use verdict_value::Value;

use crate::foundation::{ConstraintContext, ConstraintValidator, EngineError};
use crate::metadata::ConstraintDescriptor;

/// Requires a boolean value to equal the expected flag.
#[derive(Debug, Clone, Copy)]
pub struct AssertValidator {
    expected: bool,
}

impl ConstraintValidator for AssertValidator {
    fn is_valid(&self, value: &Value, _ctx: &ConstraintContext<'_>) -> bool {
        value.as_bool().is_none_or(|b| b == self.expected)
    }
}

pub(crate) fn assert_true(
    _descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    Ok(Arc::new(AssertValidator { expected: true }))
}

pub(crate) fn assert_false(
    _descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    Ok(Arc::new(AssertValidator { expected: false }))
}
