//! The fatal error taxonomy of the engine.
//!
//! Every variant is a configuration error: it aborts the whole validation
//! call and no partial violation set is returned. A failed constraint check
//! is never an error — it becomes a [`Violation`](crate::Violation).

use verdict_value::ValueKind;

/// Fatal configuration errors surfaced by a validation call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// No registered validator for the constraint accepts the value's
    /// runtime type.
    #[error("no validator for constraint `{constraint}` accepts values of type `{kind}`")]
    UnsupportedType { constraint: String, kind: ValueKind },

    /// More than one registered validator matches at the same, maximal
    /// specificity.
    #[error(
        "constraint `{constraint}` has multiple equally specific validators \
         for type `{kind}`: accepted types {candidates:?}"
    )]
    AmbiguousResolution {
        constraint: String,
        kind: ValueKind,
        candidates: Vec<&'static str>,
    },

    /// Cyclic or conflicting group sequence declarations, detected at the
    /// first use of the offending root type.
    #[error("invalid group sequence involving `{group}`: {reason}")]
    InvalidGroupSequence { group: String, reason: String },

    /// Malformed constraint parameters, detected when the leaf validator is
    /// initialized.
    #[error("invalid declaration of constraint `{constraint}`: {reason}")]
    ConstraintDeclaration { constraint: String, reason: String },

    /// A property path passed to `validate_property` / `validate_value`
    /// names a property the target type does not declare.
    #[error("type `{type_name}` has no property `{property}`")]
    UnknownProperty { type_name: String, property: String },
}

impl EngineError {
    /// Shorthand for a declaration error on the named constraint.
    pub(crate) fn declaration(constraint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConstraintDeclaration {
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an invalid-sequence error on the named group.
    pub(crate) fn sequence(group: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGroupSequence {
            group: group.into(),
            reason: reason.into(),
        }
    }
}
