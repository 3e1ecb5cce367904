//! Prelude module for convenient imports.
//!
//! Provides a single `use verdict_validator::prelude::*;` import that brings
//! in the engine, the metadata builders, and the value model.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict_validator::prelude::*;
//!
//! let metadata = MetadataRegistry::builder()
//!     .register_type(
//!         TypeDescriptor::builder("User")
//!             .property("age", |p| p.constraint(ConstraintDescriptor::min(0)))
//!             .build(),
//!     )
//!     .build();
//! let engine = Validator::builder(metadata).build();
//! ```

pub use crate::engine::{FailFast, Validator, ValidatorBuilder};
pub use crate::foundation::{
    Clock, ConstraintContext, ConstraintValidator, EngineError, FixedClock, SystemClock,
};
pub use crate::groups::{Group, GroupSequence, Sheet, ValidationOrder};
pub use crate::metadata::{
    Accessor, AccessorKind, Cascade, ConstraintDescriptor, ConstraintKind, ConstraintParams,
    DefaultPropertySelection, MetadataRegistry, PropertySelection, TypeDescriptor,
};
pub use crate::path::{Path, PathSegment};
pub use crate::resolve::ValidatorRegistry;
pub use crate::violation::{Violation, Violations};

pub use verdict_value::{NumberValue, Object, TypeMatch, Value, ValueKind};
