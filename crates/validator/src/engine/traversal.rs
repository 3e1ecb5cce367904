//! The sheet loop and the cascading graph walk.
//!
//! One validation call runs the sheets of its [`ValidationOrder`] in order.
//! Within a sheet the reachable graph is walked from the root: constraints
//! whose groups intersect the sheet are resolved and invoked, cascading
//! associations are entered (per element for lists, per key/value for
//! maps), and every association target is checked against the visited set
//! before recursion. Sheet completion decides what runs next:
//!
//! - a sheet expanded from a sequence that recorded a violation skips the
//!   remaining sheets of the same sequence (unconditional);
//! - [`FailFast::PerSheet`] extends that skip to all remaining sheets;
//! - [`FailFast::Global`] ends the run at the first violation.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};
use verdict_value::{Object, Value, ValueKind};

use crate::engine::context::ValidationContext;
use crate::engine::{FailFast, Validator};
use crate::foundation::{ConstraintContext, EngineError};
use crate::groups::{Sheet, ValidationOrder};
use crate::metadata::{ConstraintDescriptor, PropertyDescriptor};
use crate::path::PathSegment;
use crate::violation::Violations;

impl Validator {
    /// Runs the sheet loop, delegating the per-sheet work to `visit`.
    pub(crate) fn run_sheets(
        &self,
        order: &ValidationOrder,
        mut ctx: ValidationContext,
        mut visit: impl FnMut(&Self, &Sheet, &mut ValidationContext) -> Result<(), EngineError>,
    ) -> Result<Violations, EngineError> {
        let mut exhausted_sequences: HashSet<u32> = HashSet::new();

        for (index, sheet) in order.sheets().iter().enumerate() {
            if sheet
                .sequence()
                .is_some_and(|id| exhausted_sequences.contains(&id))
            {
                debug!(sheet = %sheet.primary(), "skipping sheet of failed sequence");
                continue;
            }
            debug!(sheet = %sheet.primary(), "validating sheet");
            ctx.begin_sheet(index);
            let before = ctx.violation_count();
            visit(self, sheet, &mut ctx)?;
            if ctx.halted() {
                break;
            }
            if ctx.violation_count() > before {
                if let Some(id) = sheet.sequence() {
                    exhausted_sequences.insert(id);
                }
                if matches!(self.fail_fast(), FailFast::PerSheet) {
                    break;
                }
            }
        }
        Ok(ctx.into_violations())
    }

    /// One sheet's walk over the whole reachable graph.
    pub(crate) fn traverse_root(
        &self,
        root: &Value,
        sheet: &Sheet,
        ctx: &mut ValidationContext,
    ) -> Result<(), EngineError> {
        match root {
            Value::Object(object) => self.traverse_object(object, sheet, ctx),
            _ => Ok(()),
        }
    }

    fn traverse_object(
        &self,
        object: &Arc<Object>,
        sheet: &Sheet,
        ctx: &mut ValidationContext,
    ) -> Result<(), EngineError> {
        if !ctx.enter(object) {
            trace!(type_name = object.type_name(), "already visited, skipping");
            return Ok(());
        }
        let Some(descriptor) = self.metadata().type_descriptor(object.type_name()) else {
            trace!(type_name = object.type_name(), "no metadata, nothing to validate");
            return Ok(());
        };
        let descriptor = Arc::clone(descriptor);

        let as_value = Value::Object(Arc::clone(object));
        for constraint in descriptor.constraints() {
            self.apply_constraint(constraint, &as_value, Some(ValueKind::Object), sheet, ctx)?;
            if ctx.halted() {
                return Ok(());
            }
        }

        for property in descriptor.properties() {
            // The property-selection strategy decides whether this accessor
            // is a property at all; an empty result means do not traverse.
            let Some(name) = self.selection().property(property.accessor()) else {
                continue;
            };
            let value = object.get(&name).unwrap_or(Value::Null);
            ctx.push_segment(PathSegment::Property(name));
            self.validate_node(&value, property, sheet, ctx)?;
            ctx.pop_segment();
            if ctx.halted() {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Constraints declared on the property, then cascading.
    fn validate_node(
        &self,
        value: &Value,
        property: &PropertyDescriptor,
        sheet: &Sheet,
        ctx: &mut ValidationContext,
    ) -> Result<(), EngineError> {
        for constraint in property.constraints() {
            self.apply_constraint(constraint, value, property.declared_kind(), sheet, ctx)?;
            if ctx.halted() {
                return Ok(());
            }
        }
        if let Some(cascade) = property.cascade() {
            self.cascade_into(value, cascade.include_keys, sheet, ctx)?;
        }
        Ok(())
    }

    /// Recurses into an association target: objects directly, lists per
    /// element, maps per value (and per key when configured).
    fn cascade_into(
        &self,
        value: &Value,
        include_keys: bool,
        sheet: &Sheet,
        ctx: &mut ValidationContext,
    ) -> Result<(), EngineError> {
        match value {
            Value::Object(object) => self.traverse_object(object, sheet, ctx),
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    ctx.push_segment(PathSegment::Index(index));
                    self.cascade_into(item, include_keys, sheet, ctx)?;
                    ctx.pop_segment();
                    if ctx.halted() {
                        break;
                    }
                }
                Ok(())
            }
            Value::Map(entries) => {
                for (key, entry) in entries {
                    if include_keys {
                        ctx.push_segment(PathSegment::KeyOf(key.to_string()));
                        self.cascade_into(key, include_keys, sheet, ctx)?;
                        ctx.pop_segment();
                        if ctx.halted() {
                            break;
                        }
                    }
                    ctx.push_segment(PathSegment::Key(key.to_string()));
                    self.cascade_into(entry, include_keys, sheet, ctx)?;
                    ctx.pop_segment();
                    if ctx.halted() {
                        break;
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Resolves and invokes one constraint against one value, recording a
    /// violation on failure.
    pub(crate) fn apply_constraint(
        &self,
        constraint: &Arc<ConstraintDescriptor>,
        value: &Value,
        declared: Option<ValueKind>,
        sheet: &Sheet,
        ctx: &mut ValidationContext,
    ) -> Result<(), EngineError> {
        let Some(group) = constraint.matching_group(sheet) else {
            return Ok(());
        };
        // Null is valid by convention for everything but the presence
        // constraints; skipping here also means resolution never sees a
        // null where only the declared kind could answer for it.
        if value.is_null() && !constraint.kind().applies_to_null() {
            return Ok(());
        }
        let kind = if value.is_null() {
            declared.unwrap_or(ValueKind::Null)
        } else {
            value.kind()
        };
        let validator = self.registry().resolve(constraint, kind)?;
        let eval = ConstraintContext {
            clock: self.clock(),
        };
        if !validator.is_valid(value, &eval) {
            trace!(
                constraint = %constraint.kind(),
                path = %ctx.path(),
                %group,
                "constraint violated"
            );
            ctx.record(
                Arc::clone(constraint),
                value.clone(),
                group,
                matches!(self.fail_fast(), FailFast::Global),
            );
        }
        Ok(())
    }
}
