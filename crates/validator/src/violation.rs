//! Violations: reported constraint failures, and their aggregation.

use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};
use verdict_value::Value;

use crate::groups::Group;
use crate::metadata::ConstraintDescriptor;
use crate::path::Path;

/// One constraint failure at one graph location.
///
/// Immutable; the path is a detached snapshot taken when the failure was
/// recorded.
#[derive(Debug, Clone)]
pub struct Violation {
    message: String,
    root: Value,
    invalid_value: Value,
    path: Path,
    constraint: Arc<ConstraintDescriptor>,
    group: Group,
}

impl Violation {
    pub(crate) fn new(
        root: Value,
        invalid_value: Value,
        path: Path,
        constraint: Arc<ConstraintDescriptor>,
        group: Group,
    ) -> Self {
        let message = render_message(&constraint);
        Self {
            message,
            root,
            invalid_value,
            path,
            constraint,
            group,
        }
    }

    /// The rendered failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The root value the validation call started from.
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The value that failed the constraint.
    #[must_use]
    pub fn invalid_value(&self) -> &Value {
        &self.invalid_value
    }

    /// Where in the graph the failure occurred.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The violated constraint's descriptor.
    #[must_use]
    pub fn constraint(&self) -> &ConstraintDescriptor {
        &self.constraint
    }

    /// The group under which the constraint was evaluated.
    #[must_use]
    pub fn group(&self) -> &Group {
        &self.group
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Violation", 4)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("constraint", self.constraint.kind().name())?;
        state.serialize_field("group", self.group.name())?;
        state.end()
    }
}

/// Renders the violation message: the descriptor's template when present,
/// the constraint kind's built-in text otherwise, with `{param}`
/// placeholders filled from the parameter map.
fn render_message(constraint: &ConstraintDescriptor) -> String {
    let template = constraint
        .message_template()
        .unwrap_or_else(|| constraint.kind().default_message(constraint.params()));
    let mut message = template.to_owned();
    for (key, value) in constraint.params().iter() {
        message = message.replace(&format!("{{{key}}}"), &value.to_string());
    }
    message
}

/// The immutable result collection of one validation call.
#[derive(Debug, Clone, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub(crate) fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// All violations at the given path.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.iter().filter(move |v| v.path().to_string() == path)
    }

    /// All violations reported under the given group.
    pub fn in_group<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a Violation> {
        self.iter().filter(move |v| v.group() == group)
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} violation(s):", self.violations.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            writeln!(f, "  {}. {violation}", i + 1)?;
        }
        Ok(())
    }
}

impl Serialize for Violations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.violations.len()))?;
        for violation in &self.violations {
            seq.serialize_element(violation)?;
        }
        seq.end()
    }
}
