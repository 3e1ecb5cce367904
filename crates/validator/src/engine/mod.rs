//! The validation engine and its caller-facing API.
//!
//! A [`Validator`] is built once from a [`MetadataRegistry`] and is then
//! immutable: safe to share and call from any number of threads for the
//! application's lifetime. Each call is fully synchronous; all mutable
//! state (path, visited set, collector) is call-local.

pub(crate) mod context;
mod traversal;

use std::sync::Arc;

use verdict_value::{Object, TypeMatch, Value};

use crate::engine::context::ValidationContext;
use crate::foundation::{Clock, ConstraintValidator, EngineError, SystemClock};
use crate::groups::{Group, ValidationOrder};
use crate::metadata::{
    ConstraintKind, DefaultPropertySelection, MetadataRegistry, PropertyDescriptor,
    PropertySelection,
};
use crate::path::{Path, PathSegment};
use crate::resolve::ValidatorRegistry;
use crate::violation::Violations;

/// When a validation run stops collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailFast {
    /// Collect everything. Sheets of a failed sequence are still skipped —
    /// that is sequence semantics, not fail-fast.
    #[default]
    Off,
    /// A sheet that records a violation ends the run; later sheets are
    /// skipped.
    PerSheet,
    /// The first violation ends the run immediately.
    Global,
}

/// The constraint validation engine.
#[derive(Debug)]
pub struct Validator {
    metadata: MetadataRegistry,
    registry: ValidatorRegistry,
    selection: Arc<dyn PropertySelection>,
    clock: Arc<dyn Clock>,
    fail_fast: FailFast,
}

impl Validator {
    /// Starts a builder over the given metadata.
    #[must_use]
    pub fn builder(metadata: MetadataRegistry) -> ValidatorBuilder {
        ValidatorBuilder {
            metadata,
            registry: ValidatorRegistry::with_builtins(),
            selection: Arc::new(DefaultPropertySelection),
            clock: Arc::new(SystemClock),
            fail_fast: FailFast::default(),
        }
    }

    /// Validates an object graph from `root`, under the requested groups
    /// (empty means `Default`).
    pub fn validate(&self, root: &Value, groups: &[Group]) -> Result<Violations, EngineError> {
        let root_type = root
            .as_object()
            .and_then(|o| self.metadata.type_descriptor(o.type_name()))
            .cloned();
        let order = ValidationOrder::compute(&self.metadata, root_type.as_deref(), groups)?;
        let ctx = ValidationContext::new(root.clone());
        self.run_sheets(&order, ctx, |engine, sheet, ctx| {
            engine.traverse_root(root, sheet, ctx)
        })
    }

    /// Validates only the constraints declared at `property_path` of the
    /// root object (no cascading from there).
    pub fn validate_property(
        &self,
        root: &Value,
        property_path: &str,
        groups: &[Group],
    ) -> Result<Violations, EngineError> {
        let Some(root_object) = root.as_object() else {
            return Ok(Violations::default());
        };
        let path = Path::parse(property_path).ok_or_else(|| EngineError::UnknownProperty {
            type_name: root_object.type_name().to_owned(),
            property: property_path.to_owned(),
        })?;
        let Some((property, value)) = self.locate(root_object, &path)? else {
            return Ok(Violations::default());
        };

        let root_type = self.metadata.type_descriptor(root_object.type_name()).cloned();
        let order = ValidationOrder::compute(&self.metadata, root_type.as_deref(), groups)?;
        let ctx = ValidationContext::new(root.clone()).with_base_path(path);
        self.run_sheets(&order, ctx, |engine, sheet, ctx| {
            for constraint in property.constraints() {
                engine.apply_constraint(constraint, &value, property.declared_kind(), sheet, ctx)?;
                if ctx.halted() {
                    break;
                }
            }
            Ok(())
        })
    }

    /// Validates a prospective value against the constraints declared on
    /// `property` of `type_name`, without an instance.
    pub fn validate_value(
        &self,
        type_name: &str,
        property: &str,
        value: &Value,
        groups: &[Group],
    ) -> Result<Violations, EngineError> {
        let unknown = || EngineError::UnknownProperty {
            type_name: type_name.to_owned(),
            property: property.to_owned(),
        };
        let descriptor = self
            .metadata
            .type_descriptor(type_name)
            .cloned()
            .ok_or_else(unknown)?;
        let target = descriptor
            .properties()
            .find(|p| {
                self.selection.property(p.accessor()).as_deref() == Some(property)
            })
            .cloned()
            .ok_or_else(unknown)?;

        let order = ValidationOrder::compute(&self.metadata, Some(&descriptor), groups)?;
        let mut base = Path::root();
        base.push(PathSegment::Property(property.to_owned()));
        let ctx = ValidationContext::new(Value::Null).with_base_path(base);
        self.run_sheets(&order, ctx, |engine, sheet, ctx| {
            for constraint in target.constraints() {
                engine.apply_constraint(constraint, value, target.declared_kind(), sheet, ctx)?;
                if ctx.halted() {
                    break;
                }
            }
            Ok(())
        })
    }

    /// Walks a parsed property path down from the root object to the
    /// addressed property. `Ok(None)` means a null or absent value on the
    /// way — nothing to validate.
    fn locate(
        &self,
        root: &Arc<Object>,
        path: &Path,
    ) -> Result<Option<(PropertyDescriptor, Value)>, EngineError> {
        let mut current = Value::Object(Arc::clone(root));
        let segments = path.segments();
        for (i, segment) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            match segment {
                PathSegment::Property(name) => {
                    let Some(object) = current.as_object().map(Arc::clone) else {
                        return Ok(None);
                    };
                    let type_name = object.type_name().to_owned();
                    let unknown = || EngineError::UnknownProperty {
                        type_name: type_name.clone(),
                        property: name.clone(),
                    };
                    let descriptor = self
                        .metadata
                        .type_descriptor(&type_name)
                        .ok_or_else(unknown)?;
                    let property = descriptor
                        .properties()
                        .find(|p| {
                            self.selection.property(p.accessor()).as_deref()
                                == Some(name.as_str())
                        })
                        .ok_or_else(unknown)?;
                    let value = object.get(name).unwrap_or(Value::Null);
                    if last {
                        return Ok(Some((property.clone(), value)));
                    }
                    current = value;
                }
                PathSegment::Index(index) => {
                    let Some(item) = current.as_list().and_then(|items| items.get(*index)).cloned()
                    else {
                        return Ok(None);
                    };
                    if last {
                        return Err(not_a_property(root, path));
                    }
                    current = item;
                }
                PathSegment::Key(key) => {
                    let Some(entry) = current.map_value(key).cloned() else {
                        return Ok(None);
                    };
                    if last {
                        return Err(not_a_property(root, path));
                    }
                    current = entry;
                }
                PathSegment::KeyOf(_) => {
                    return Err(not_a_property(root, path));
                }
            }
        }
        Ok(None)
    }

    // ── Accessors used by the traversal ──────────────────────────────────

    pub(crate) fn metadata(&self) -> &MetadataRegistry {
        &self.metadata
    }

    pub(crate) fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub(crate) fn selection(&self) -> &dyn PropertySelection {
        self.selection.as_ref()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn fail_fast(&self) -> FailFast {
        self.fail_fast
    }
}

/// A path that does not end at a declared property.
fn not_a_property(root: &Arc<Object>, path: &Path) -> EngineError {
    EngineError::UnknownProperty {
        type_name: root.type_name().to_owned(),
        property: path.to_string(),
    }
}

/// Fluent configuration of a [`Validator`].
#[derive(Debug)]
pub struct ValidatorBuilder {
    metadata: MetadataRegistry,
    registry: ValidatorRegistry,
    selection: Arc<dyn PropertySelection>,
    clock: Arc<dyn Clock>,
    fail_fast: FailFast,
}

impl ValidatorBuilder {
    /// Sets the fail-fast mode.
    #[must_use = "builder methods must be chained or built"]
    pub fn fail_fast(mut self, mode: FailFast) -> Self {
        self.fail_fast = mode;
        self
    }

    /// Replaces the property-selection strategy.
    #[must_use = "builder methods must be chained or built"]
    pub fn property_selection(mut self, strategy: impl PropertySelection + 'static) -> Self {
        self.selection = Arc::new(strategy);
        self
    }

    /// Replaces the clock consulted by temporal constraints.
    #[must_use = "builder methods must be chained or built"]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Registers a custom constraint validator factory.
    #[must_use = "builder methods must be chained or built"]
    pub fn constraint<F>(mut self, kind: ConstraintKind, accepts: TypeMatch, factory: F) -> Self
    where
        F: Fn(
                &crate::metadata::ConstraintDescriptor,
            ) -> Result<Arc<dyn ConstraintValidator>, EngineError>
            + Send
            + Sync
            + 'static,
    {
        self.registry.register_fn(kind, accepts, factory);
        self
    }

    /// Finishes the engine.
    #[must_use]
    pub fn build(self) -> Validator {
        Validator {
            metadata: self.metadata,
            registry: self.registry,
            selection: self.selection,
            clock: self.clock,
            fail_fast: self.fail_fast,
        }
    }
}
