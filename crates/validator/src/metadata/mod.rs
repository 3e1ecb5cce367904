//! The explicit constraint metadata consumed by the engine.
//!
//! Metadata is built once by the caller (the bootstrap side of the system)
//! and frozen; the engine performs no reflection or dynamic lookup of its
//! own. A [`MetadataRegistry`] holds one [`TypeDescriptor`] per validatable
//! type, plus the group sequence and group inheritance declarations.

pub mod constraint;
pub mod properties;
pub mod types;

pub use constraint::{ConstraintDescriptor, ConstraintKind, ConstraintParams};
pub use properties::{Accessor, AccessorKind, DefaultPropertySelection, PropertySelection};
pub use types::{
    Cascade, MetadataBuilder, MetadataRegistry, PropertyBuilder, PropertyDescriptor,
    TypeDescriptor, TypeDescriptorBuilder,
};
