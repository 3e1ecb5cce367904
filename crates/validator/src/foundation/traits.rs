//! The leaf validator contract.
//!
//! Construction and evaluation are strictly separated phases: a
//! [`ValidatorFactory`] consumes a constraint descriptor's parameters once
//! (and may reject them), and the produced [`ConstraintValidator`] is
//! immutable, shared across calls and threads, and evaluated any number of
//! times concurrently.

use std::fmt;
use std::sync::Arc;

use verdict_value::Value;

use crate::foundation::clock::Clock;
use crate::foundation::error::EngineError;
use crate::metadata::ConstraintDescriptor;

/// What a leaf validator gets to see while evaluating one value.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintContext<'a> {
    /// The engine's time source.
    pub clock: &'a dyn Clock,
}

/// An initialized leaf validator.
///
/// `is_valid` returns a plain boolean: a failed business rule is `false`,
/// never an error. By convention `Null` values are valid for every
/// constraint except the presence constraints — absence is expressed via a
/// dedicated `NotNull` constraint, not as a side effect of the others.
pub trait ConstraintValidator: Send + Sync + fmt::Debug {
    /// Checks one value. Must be free of side effects and interior
    /// mutation; the same instance is invoked concurrently from many
    /// validation calls.
    fn is_valid(&self, value: &Value, ctx: &ConstraintContext<'_>) -> bool;
}

/// The fallible initialization step: descriptor parameters in, shared
/// validator instance out.
///
/// Factories run at most once per (descriptor, runtime kind) cache slot and
/// fail with [`EngineError::ConstraintDeclaration`] on malformed parameters.
pub type ValidatorFactory =
    Arc<dyn Fn(&ConstraintDescriptor) -> Result<Arc<dyn ConstraintValidator>, EngineError> + Send + Sync>;
