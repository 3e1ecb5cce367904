//! Type and property descriptors, and the registry that holds them.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use verdict_value::ValueKind;

use crate::groups::{Group, GroupSequence};
use crate::metadata::constraint::ConstraintDescriptor;
use crate::metadata::properties::Accessor;

/// Cascading configuration on an association.
///
/// A cascading association recurses into associated objects: a single
/// object directly, a list per element, a map per value — and per key when
/// `include_keys` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cascade {
    /// Also validate map keys, not only map values.
    pub include_keys: bool,
}

impl Cascade {
    /// Cascade into values only (the common case).
    #[must_use]
    pub fn values() -> Self {
        Self::default()
    }

    /// Cascade into map keys as well.
    #[must_use]
    pub fn with_keys() -> Self {
        Self { include_keys: true }
    }
}

/// One constrained property of a type.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    accessor: Accessor,
    declared: Option<ValueKind>,
    constraints: Vec<Arc<ConstraintDescriptor>>,
    cascade: Option<Cascade>,
}

impl PropertyDescriptor {
    #[must_use]
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    /// The declared kind of the property, used for validator resolution
    /// when the runtime value is null.
    #[must_use]
    pub fn declared_kind(&self) -> Option<ValueKind> {
        self.declared
    }

    #[must_use]
    pub fn constraints(&self) -> &[Arc<ConstraintDescriptor>] {
        &self.constraints
    }

    #[must_use]
    pub fn cascade(&self) -> Option<Cascade> {
        self.cascade
    }
}

/// Builds one [`PropertyDescriptor`] inside a type builder closure.
#[derive(Debug)]
pub struct PropertyBuilder {
    accessor: Accessor,
    declared: Option<ValueKind>,
    constraints: Vec<Arc<ConstraintDescriptor>>,
    cascade: Option<Cascade>,
}

impl PropertyBuilder {
    fn new(accessor: Accessor) -> Self {
        Self {
            accessor,
            declared: None,
            constraints: Vec::new(),
            cascade: None,
        }
    }

    /// Attaches a constraint to the property.
    #[must_use = "builder methods must be chained or built"]
    pub fn constraint(mut self, descriptor: ConstraintDescriptor) -> Self {
        self.constraints.push(Arc::new(descriptor));
        self
    }

    /// Declares the property's static kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn declared(mut self, kind: ValueKind) -> Self {
        self.declared = Some(kind);
        self
    }

    /// Marks the association cascading (values only).
    #[must_use = "builder methods must be chained or built"]
    pub fn cascade(mut self) -> Self {
        self.cascade = Some(Cascade::values());
        self
    }

    /// Marks the association cascading with explicit configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn cascade_with(mut self, cascade: Cascade) -> Self {
        self.cascade = Some(cascade);
        self
    }

    fn build(self) -> PropertyDescriptor {
        PropertyDescriptor {
            accessor: self.accessor,
            declared: self.declared,
            constraints: self.constraints,
            cascade: self.cascade,
        }
    }
}

/// Everything the engine knows about one validatable type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    constraints: Vec<Arc<ConstraintDescriptor>>,
    properties: IndexMap<String, PropertyDescriptor>,
    default_sequence: Option<Vec<Group>>,
}

impl TypeDescriptor {
    /// Starts a builder for the named type.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            name: name.into(),
            constraints: Vec::new(),
            properties: IndexMap::new(),
            default_sequence: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class-level constraints, evaluated against the object itself.
    #[must_use]
    pub fn constraints(&self) -> &[Arc<ConstraintDescriptor>] {
        &self.constraints
    }

    /// Properties in declaration order, keyed by raw accessor name.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.values()
    }

    /// The redeclared `Default` sequence, if the type declares one.
    #[must_use]
    pub fn default_sequence(&self) -> Option<&[Group]> {
        self.default_sequence.as_deref()
    }
}

/// Fluent construction of a [`TypeDescriptor`].
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    constraints: Vec<Arc<ConstraintDescriptor>>,
    properties: IndexMap<String, PropertyDescriptor>,
    default_sequence: Option<Vec<Group>>,
}

impl TypeDescriptorBuilder {
    /// Adds a class-level constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn constraint(mut self, descriptor: ConstraintDescriptor) -> Self {
        self.constraints.push(Arc::new(descriptor));
        self
    }

    /// Adds a field-backed property.
    #[must_use = "builder methods must be chained or built"]
    pub fn property(
        self,
        name: impl Into<String>,
        configure: impl FnOnce(PropertyBuilder) -> PropertyBuilder,
    ) -> Self {
        self.accessor(Accessor::field(name), configure)
    }

    /// Adds a getter-backed property.
    #[must_use = "builder methods must be chained or built"]
    pub fn getter(
        self,
        name: impl Into<String>,
        configure: impl FnOnce(PropertyBuilder) -> PropertyBuilder,
    ) -> Self {
        self.accessor(Accessor::getter(name), configure)
    }

    /// Adds a property with an explicit accessor.
    #[must_use = "builder methods must be chained or built"]
    pub fn accessor(
        mut self,
        accessor: Accessor,
        configure: impl FnOnce(PropertyBuilder) -> PropertyBuilder,
    ) -> Self {
        let built = configure(PropertyBuilder::new(accessor)).build();
        self.properties
            .insert(built.accessor().name().to_owned(), built);
        self
    }

    /// Redeclares the `Default` group of this type as a sequence. The
    /// sequence must include the type's own group.
    #[must_use = "builder methods must be chained or built"]
    pub fn default_sequence(mut self, groups: impl IntoIterator<Item = Group>) -> Self {
        self.default_sequence = Some(groups.into_iter().collect());
        self
    }

    #[must_use]
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            name: self.name,
            constraints: self.constraints,
            properties: self.properties,
            default_sequence: self.default_sequence,
        }
    }
}

/// All metadata for one engine: type descriptors, group sequences, and
/// group inheritance. Built once, then read-only.
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    types: HashMap<String, Arc<TypeDescriptor>>,
    sequences: HashMap<Group, Vec<Group>>,
    group_parents: HashMap<Group, Vec<Group>>,
}

impl MetadataRegistry {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder {
            registry: Self::default(),
        }
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn type_descriptor(&self, name: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(name)
    }

    /// The members of a group redeclared as a sequence.
    #[must_use]
    pub fn sequence(&self, group: &Group) -> Option<&[Group]> {
        self.sequences.get(group).map(Vec::as_slice)
    }

    /// Direct parents of a group under inheritance.
    #[must_use]
    pub fn group_parents(&self, group: &Group) -> &[Group] {
        self.group_parents.get(group).map_or(&[], Vec::as_slice)
    }
}

/// Fluent construction of a [`MetadataRegistry`].
#[derive(Debug, Default)]
pub struct MetadataBuilder {
    registry: MetadataRegistry,
}

impl MetadataBuilder {
    /// Registers a type descriptor.
    #[must_use = "builder methods must be chained or built"]
    pub fn register_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.registry
            .types
            .insert(descriptor.name().to_owned(), Arc::new(descriptor));
        self
    }

    /// Registers a group-as-sequence declaration.
    #[must_use = "builder methods must be chained or built"]
    pub fn register_sequence(mut self, sequence: GroupSequence) -> Self {
        self.registry
            .sequences
            .insert(sequence.name().clone(), sequence.members().to_vec());
        self
    }

    /// Registers group inheritance: `group` extends each of `parents`.
    #[must_use = "builder methods must be chained or built"]
    pub fn register_group_parents(
        mut self,
        group: Group,
        parents: impl IntoIterator<Item = Group>,
    ) -> Self {
        self.registry
            .group_parents
            .entry(group)
            .or_default()
            .extend(parents);
        self
    }

    #[must_use]
    pub fn build(self) -> MetadataRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_value::ValueKind;

    #[test]
    fn builder_wires_properties_and_constraints() {
        let descriptor = TypeDescriptor::builder("User")
            .property("age", |p| {
                p.constraint(ConstraintDescriptor::min(0))
                    .declared(ValueKind::Int)
            })
            .getter("getName", |p| p.constraint(ConstraintDescriptor::not_null()))
            .build();

        assert_eq!(descriptor.name(), "User");
        assert_eq!(descriptor.properties().count(), 2);
        let age = descriptor.properties().next().unwrap();
        assert_eq!(age.declared_kind(), Some(ValueKind::Int));
        assert_eq!(age.constraints().len(), 1);
    }

    #[test]
    fn registry_lookups() {
        let metadata = MetadataRegistry::builder()
            .register_type(TypeDescriptor::builder("User").build())
            .register_sequence(GroupSequence::new("Seq", [Group::new("A")]))
            .register_group_parents(Group::new("Child"), [Group::new("Parent")])
            .build();

        assert!(metadata.type_descriptor("User").is_some());
        assert!(metadata.type_descriptor("Nope").is_none());
        assert_eq!(metadata.sequence(&Group::new("Seq")).unwrap().len(), 1);
        assert_eq!(metadata.group_parents(&Group::new("Child")).len(), 1);
        assert!(metadata.group_parents(&Group::new("Parent")).is_empty());
    }
}
