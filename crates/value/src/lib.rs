//! # verdict-value
//!
//! The dynamic value and object model consumed by the Verdict validation
//! engine.
//!
//! A [`Value`] is a runtime-typed datum: a scalar (`Null`, `Bool`, `Int`,
//! `Float`, `Decimal`, `Text`), a temporal (`Date`, `DateTime`), a container
//! (`List`, `Map`), or a reference-counted [`Object`] — a bean-like instance
//! with a type name and named fields. Objects are held behind `Arc` and may
//! form cyclic graphs; identity of the allocation is what distinguishes two
//! equal-valued instances.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verdict_value::{Object, Value};
//!
//! let address = Object::builder("Address")
//!     .field("street", "Main St 1")
//!     .build();
//! let user = Object::builder("User")
//!     .field("age", 42_i64)
//!     .field("address", address)
//!     .build();
//!
//! assert_eq!(user.get("age"), Some(Value::Int(42)));
//! ```
//!
//! Numeric comparison across representations is exact: see [`number`] for
//! the promotion rules used when an `i64` or `f64` is compared against an
//! arbitrary-precision [`rust_decimal::Decimal`] bound.

pub mod json;
pub mod kind;
pub mod number;
pub mod object;
pub mod value;

pub use kind::{TypeMatch, ValueKind};
pub use number::{NumberValue, compare_exact};
pub use object::{Object, ObjectBuilder};
pub use value::Value;
