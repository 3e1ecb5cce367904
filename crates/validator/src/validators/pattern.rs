//! Regular expression constraint over text.

use std::sync::Arc;

use regex::Regex;
use verdict_value::Value;

use crate::foundation::{ConstraintContext, ConstraintValidator, EngineError};
use crate::metadata::ConstraintDescriptor;

/// Requires the whole string to match the configured expression.
#[derive(Debug)]
pub struct PatternValidator {
    regex: Regex,
}

impl ConstraintValidator for PatternValidator {
    fn is_valid(&self, value: &Value, _ctx: &ConstraintContext<'_>) -> bool {
        value.as_text().is_none_or(|s| self.regex.is_match(s))
    }
}

pub(crate) fn pattern(
    descriptor: &ConstraintDescriptor,
) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
    let name = descriptor.kind().name();
    let source = descriptor
        .params()
        .get_str("regexp")
        .ok_or_else(|| EngineError::declaration(name, "missing parameter `regexp`"))?;
    // Whole-string semantics: the declared expression must cover the input,
    // not merely occur somewhere inside it.
    let regex = Regex::new(&format!("^(?:{source})$"))
        .map_err(|e| EngineError::declaration(name, e.to_string()))?;
    Ok(Arc::new(PatternValidator { regex }))
}
