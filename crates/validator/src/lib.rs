//! # verdict-validator
//!
//! A constraint validation engine for dynamic object graphs.
//!
//! Constraints are declared as metadata ([`metadata::ConstraintDescriptor`])
//! attached to the properties of a type; the engine evaluates them against
//! [`verdict_value::Value`] graphs at runtime and reports structured
//! [`violation::Violation`]s.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verdict_validator::prelude::*;
//!
//! let metadata = MetadataRegistry::builder()
//!     .register_type(
//!         TypeDescriptor::builder("User")
//!             .property("name", |p| p.constraint(ConstraintDescriptor::not_null()))
//!             .property("age", |p| p.constraint(ConstraintDescriptor::min(0)))
//!             .build(),
//!     )
//!     .build();
//!
//! let engine = Validator::builder(metadata).build();
//! let user = Object::builder("User").null_field("name").field("age", -3_i64).build();
//!
//! let violations = engine.validate(&Value::Object(user), &[])?;
//! assert_eq!(violations.len(), 2);
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] — the explicit descriptor model supplied by the caller
//!   (the engine performs no reflection or dynamic lookup of its own)
//! - [`groups`] — validation profiles, group inheritance, and sequence
//!   expansion into ordered sheets
//! - [`resolve`] — most-specific validator resolution with a concurrent
//!   initialize-once cache
//! - [`validators`] — the built-in constraint catalog, collapsed onto a
//!   shared exact-comparison contract
//! - [`engine`] — cascading graph traversal with identity-based cycle
//!   detection and configurable fail-fast
//! - [`violation`] — the aggregated, path-addressed result set

// EngineError carries owned diagnostic strings; boxing it would add
// indirection to every fallible resolution call for no practical benefit.
#![allow(clippy::result_large_err)]

pub mod engine;
pub mod foundation;
pub mod groups;
pub mod metadata;
pub mod path;
pub mod prelude;
pub mod resolve;
pub mod validators;
pub mod violation;

pub use engine::{FailFast, Validator, ValidatorBuilder};
pub use foundation::{Clock, ConstraintContext, ConstraintValidator, EngineError};
pub use groups::{Group, ValidationOrder};
pub use metadata::{ConstraintDescriptor, MetadataRegistry, TypeDescriptor};
pub use path::{Path, PathSegment};
pub use violation::{Violation, Violations};
