//! Validator resolution: from (constraint, runtime type) to an initialized
//! leaf validator.
//!
//! Validators are registered in a table keyed by constraint kind, each entry
//! declaring the [`TypeMatch`] it accepts. Resolution collects the entries
//! assignable from the value's runtime kind and keeps the most specific one
//! (minimal hierarchy distance). Zero candidates is
//! [`EngineError::UnsupportedType`]; more than one at the same minimal
//! distance is [`EngineError::AmbiguousResolution`].
//!
//! Resolution is a pure function of (descriptor, kind), so results are
//! cached for the engine's lifetime in a concurrent map. Initialization runs
//! at most once per slot under normal operation; a lost first-population
//! race harmlessly initializes twice and keeps one instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use verdict_value::{TypeMatch, ValueKind};

use crate::foundation::{ConstraintValidator, EngineError, ValidatorFactory};
use crate::metadata::{ConstraintDescriptor, ConstraintKind};
use crate::validators;

struct Registration {
    accepts: TypeMatch,
    factory: ValidatorFactory,
}

/// The registration table plus the per-engine resolution cache.
pub struct ValidatorRegistry {
    table: HashMap<ConstraintKind, Vec<Registration>>,
    cache: DashMap<(u32, ValueKind), Arc<dyn ConstraintValidator>>,
}

impl ValidatorRegistry {
    /// An empty table. Nothing resolves until registrations are added.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
            cache: DashMap::new(),
        }
    }

    /// The built-in constraint catalog.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        validators::register_builtins(&mut registry);
        registry
    }

    /// Registers a validator factory for a constraint kind at an accepted
    /// type.
    pub fn register(&mut self, kind: ConstraintKind, accepts: TypeMatch, factory: ValidatorFactory) {
        self.table
            .entry(kind)
            .or_default()
            .push(Registration { accepts, factory });
    }

    /// Registers a plain closure as a factory.
    pub fn register_fn<F>(&mut self, kind: ConstraintKind, accepts: TypeMatch, factory: F)
    where
        F: Fn(&ConstraintDescriptor) -> Result<Arc<dyn ConstraintValidator>, EngineError>
            + Send
            + Sync
            + 'static,
    {
        self.register(kind, accepts, Arc::new(factory));
    }

    /// Resolves and initializes the validator for this descriptor and
    /// runtime kind, consulting the cache first.
    pub fn resolve(
        &self,
        descriptor: &ConstraintDescriptor,
        kind: ValueKind,
    ) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
        let key = (descriptor.id(), kind);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Arc::clone(&*hit));
        }

        debug!(constraint = %descriptor.kind(), %kind, "resolving validator");
        let validator = self.resolve_uncached(descriptor, kind)?;
        // Insert-if-absent: under a race the first inserted instance wins
        // and every caller sees the same one from then on.
        let entry = self.cache.entry(key).or_insert(validator);
        Ok(Arc::clone(&*entry))
    }

    fn resolve_uncached(
        &self,
        descriptor: &ConstraintDescriptor,
        kind: ValueKind,
    ) -> Result<Arc<dyn ConstraintValidator>, EngineError> {
        let unsupported = || EngineError::UnsupportedType {
            constraint: descriptor.kind().name().to_owned(),
            kind,
        };
        let registrations = self.table.get(descriptor.kind()).ok_or_else(unsupported)?;

        let mut best: Option<(u8, Vec<&Registration>)> = None;
        for registration in registrations {
            let Some(distance) = registration.accepts.distance(kind) else {
                continue;
            };
            match &mut best {
                Some((min, candidates)) if distance == *min => candidates.push(registration),
                Some((min, candidates)) if distance < *min => {
                    *min = distance;
                    candidates.clear();
                    candidates.push(registration);
                }
                Some(_) => {}
                None => best = Some((distance, vec![registration])),
            }
        }

        match best {
            None => Err(unsupported()),
            Some((_, candidates)) if candidates.len() > 1 => {
                Err(EngineError::AmbiguousResolution {
                    constraint: descriptor.kind().name().to_owned(),
                    kind,
                    candidates: candidates.iter().map(|r| r.accepts.name()).collect(),
                })
            }
            Some((_, candidates)) => (candidates[0].factory)(descriptor),
        }
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("constraints", &self.table.keys().collect::<Vec<_>>())
            .field("cached", &self.cache.len())
            .finish()
    }
}
