//! Core contracts of the validation engine.
//!
//! - **Traits**: [`ConstraintValidator`], the capability every leaf
//!   validator implements, and [`ConstraintContext`], what it gets to see
//!   during evaluation
//! - **Errors**: [`EngineError`], the fatal configuration-error taxonomy
//! - **Clock**: the pluggable time source consulted by temporal validators

pub mod clock;
pub mod error;
pub mod traits;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::EngineError;
pub use traits::{ConstraintContext, ConstraintValidator, ValidatorFactory};
