//! The built-in constraint catalog.
//!
//! The catalog is a registration table, not a class per (constraint, type)
//! pair: each entry maps a [`ConstraintKind`] and an accepted
//! [`TypeMatch`](verdict_value::TypeMatch) to a factory over the shared
//! [`ConstraintValidator`](crate::foundation::ConstraintValidator) contract.
//! All numeric bounds funnel through one generic bound validator over the
//! exact comparison helper; all temporal constraints through one
//! clock-relative validator.

pub mod boolean;
pub mod bound;
pub mod nullable;
pub mod pattern;
pub mod size;
pub mod temporal;

pub use boolean::AssertValidator;
pub use bound::BoundValidator;
pub use nullable::{IsNullValidator, NotNullValidator};
pub use pattern::PatternValidator;
pub use size::SizeValidator;
pub use temporal::TemporalValidator;

use verdict_value::{TypeMatch, ValueKind};

use crate::metadata::ConstraintKind;
use crate::resolve::ValidatorRegistry;

/// Registers the built-in catalog into a registry.
pub fn register_builtins(registry: &mut ValidatorRegistry) {
    // Presence
    registry.register_fn(ConstraintKind::NotNull, TypeMatch::Any, nullable::not_null);
    registry.register_fn(ConstraintKind::IsNull, TypeMatch::Any, nullable::is_null);

    // Boolean
    registry.register_fn(
        ConstraintKind::AssertTrue,
        TypeMatch::Kind(ValueKind::Bool),
        boolean::assert_true,
    );
    registry.register_fn(
        ConstraintKind::AssertFalse,
        TypeMatch::Kind(ValueKind::Bool),
        boolean::assert_false,
    );

    // Numeric bounds: one generic validator per direction, registered at
    // the Number family so every numeric kind funnels through it.
    registry.register_fn(ConstraintKind::Min, TypeMatch::Number, bound::min);
    registry.register_fn(ConstraintKind::Max, TypeMatch::Number, bound::max);
    registry.register_fn(ConstraintKind::DecimalMin, TypeMatch::Number, bound::decimal_min);
    registry.register_fn(ConstraintKind::DecimalMax, TypeMatch::Number, bound::decimal_max);

    // Size: the same validator measures text, lists, and maps.
    for kind in [ValueKind::Text, ValueKind::List, ValueKind::Map] {
        registry.register_fn(ConstraintKind::Size, TypeMatch::Kind(kind), size::size);
    }

    // Pattern
    registry.register_fn(
        ConstraintKind::Pattern,
        TypeMatch::Kind(ValueKind::Text),
        pattern::pattern,
    );

    // Temporal: clock-relative, for dates and datetimes alike.
    registry.register_fn(ConstraintKind::Past, TypeMatch::Temporal, temporal::past);
    registry.register_fn(
        ConstraintKind::PastOrPresent,
        TypeMatch::Temporal,
        temporal::past_or_present,
    );
    registry.register_fn(ConstraintKind::Future, TypeMatch::Temporal, temporal::future);
    registry.register_fn(
        ConstraintKind::FutureOrPresent,
        TypeMatch::Temporal,
        temporal::future_or_present,
    );
}
