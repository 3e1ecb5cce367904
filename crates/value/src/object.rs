//! Bean-like dynamic object instances.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::value::Value;

/// A dynamic object instance: a type name plus named fields.
///
/// Objects are always handled through `Arc<Object>`. Fields live behind an
/// `RwLock` so that a graph can be wired up after construction — including
/// cycles, where an object's field refers back to the object itself:
///
/// ```rust,ignore
/// let node = Object::builder("Node").field("label", "a").build();
/// node.set("next", node.clone());
/// ```
///
/// The lock also keeps `Object` `Send + Sync`, so fully built graphs can be
/// validated from any thread.
pub struct Object {
    type_name: String,
    fields: RwLock<IndexMap<String, Value>>,
}

impl Object {
    /// Creates an empty instance of the named type.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            type_name: type_name.into(),
            fields: RwLock::new(IndexMap::new()),
        })
    }

    /// Starts a builder for the named type.
    #[must_use]
    pub fn builder(type_name: impl Into<String>) -> ObjectBuilder {
        ObjectBuilder {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// The declared type name of this instance.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Reads a field. Returns `None` for fields that were never set;
    /// explicitly null fields return `Some(Value::Null)`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<Value> {
        self.fields.read().get(field).cloned()
    }

    /// Sets or replaces a field.
    pub fn set(&self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.write().insert(field.into(), value.into());
    }

    /// Snapshot of all fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, Value)> {
        self.fields
            .read()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

// Hand-written: deriving Debug would recurse through `Value::Object` fields
// and never terminate on cyclic graphs.
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields.read();
        write!(f, "Object({}", self.type_name)?;
        if !fields.is_empty() {
            write!(f, " {{")?;
            for (i, name) in fields.keys().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, " {name}")?;
            }
            write!(f, " }}")?;
        }
        write!(f, ")")
    }
}

/// Fluent construction of an [`Object`].
#[derive(Debug)]
pub struct ObjectBuilder {
    type_name: String,
    fields: IndexMap<String, Value>,
}

impl ObjectBuilder {
    /// Adds a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Adds an explicitly null field.
    #[must_use = "builder methods must be chained or built"]
    pub fn null_field(self, name: impl Into<String>) -> Self {
        self.field(name, Value::Null)
    }

    /// Finishes the instance.
    #[must_use]
    pub fn build(self) -> Arc<Object> {
        Arc::new(Object {
            type_name: self.type_name,
            fields: RwLock::new(self.fields),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_sets_fields_in_order() {
        let obj = Object::builder("User")
            .field("name", "alice")
            .field("age", 30_i64)
            .build();
        let names: Vec<String> = obj.fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name".to_owned(), "age".to_owned()]);
    }

    #[test]
    fn set_after_build_supports_cycles() {
        let node = Object::builder("Node").field("label", "a").build();
        node.set("next", node.clone());
        let next = node.get("next").and_then(|v| v.as_object().cloned());
        assert!(next.is_some_and(|n| Arc::ptr_eq(&n, &node)));
    }

    #[test]
    fn debug_terminates_on_cycles() {
        let node = Object::builder("Node").build();
        node.set("next", node.clone());
        let rendered = format!("{node:?}");
        assert!(rendered.contains("Node"));
    }

    #[test]
    fn missing_and_null_fields_differ() {
        let obj = Object::builder("T").null_field("present").build();
        assert_eq!(obj.get("present"), Some(Value::Null));
        assert_eq!(obj.get("absent"), None);
    }
}
