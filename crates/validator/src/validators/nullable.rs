//! Presence constraints.
//!
//! The only constraints for which `Null` is not automatically valid.

use std::sync::Arc;

use verdict_value::Value;

use crate::foundation::{ConstraintContext, ConstraintValidator, EngineError};
use crate::metadata::ConstraintDescriptor;

/// Fails on `Null`.
#[derive(Debug, Clone, Copy)]
pub struct NotNullValidator;

impl ConstraintValidator for NotNullValidator {
    fn is_valid(&self, value: &Value, _ctx: &ConstraintContext<'_>) -> bool {
        !value.is_null()
    }
}

/// Fails on anything but `Null`.
#[derive(Debug, Clone, Copy)]
pub struct IsNullValidator;

impl ConstraintValidator for IsNullValidator {
    fn is_valid(&self, value: &Value, _ctx: &ConstraintContext<'_>) -> bool {
        value.is_null()
    }
}

pub(crate) fn not_null(
    _descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    Ok(Arc::new(NotNullValidator))
}

pub(crate) fn is_null(
    _descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    Ok(Arc::new(IsNullValidator))
}
