//! Constraint descriptors: one declared constraint instance on a node.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use indexmap::IndexMap;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use verdict_value::Value;

use crate::groups::{Group, Sheet};

/// The built-in constraint vocabulary, plus an open escape hatch for
/// caller-registered predicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    NotNull,
    IsNull,
    AssertTrue,
    AssertFalse,
    Min,
    Max,
    DecimalMin,
    DecimalMax,
    Size,
    Pattern,
    Past,
    PastOrPresent,
    Future,
    FutureOrPresent,
    Custom(Arc<str>),
}

impl ConstraintKind {
    /// The constraint's name, as used in diagnostics and reports.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::NotNull => "NotNull",
            Self::IsNull => "IsNull",
            Self::AssertTrue => "AssertTrue",
            Self::AssertFalse => "AssertFalse",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::DecimalMin => "DecimalMin",
            Self::DecimalMax => "DecimalMax",
            Self::Size => "Size",
            Self::Pattern => "Pattern",
            Self::Past => "Past",
            Self::PastOrPresent => "PastOrPresent",
            Self::Future => "Future",
            Self::FutureOrPresent => "FutureOrPresent",
            Self::Custom(name) => name,
        }
    }

    /// Whether this constraint is evaluated against `Null` values.
    ///
    /// Everything else treats `Null` as valid and is skipped outright;
    /// custom constraints see nulls and decide for themselves.
    #[must_use]
    pub fn applies_to_null(&self) -> bool {
        matches!(self, Self::NotNull | Self::IsNull | Self::Custom(_))
    }

    /// The built-in message template used when a descriptor declares none.
    #[must_use]
    pub fn default_message(&self, params: &ConstraintParams) -> &'static str {
        match self {
            Self::NotNull => "must not be null",
            Self::IsNull => "must be null",
            Self::AssertTrue => "must be true",
            Self::AssertFalse => "must be false",
            Self::Min => "must be greater than or equal to {value}",
            Self::Max => "must be less than or equal to {value}",
            Self::DecimalMin => {
                if params.get_bool("inclusive").unwrap_or(true) {
                    "must be greater than or equal to {value}"
                } else {
                    "must be greater than {value}"
                }
            }
            Self::DecimalMax => {
                if params.get_bool("inclusive").unwrap_or(true) {
                    "must be less than or equal to {value}"
                } else {
                    "must be less than {value}"
                }
            }
            Self::Size => "size must be between {min} and {max}",
            Self::Pattern => "must match \"{regexp}\"",
            Self::Past => "must be a past date",
            Self::PastOrPresent => "must be a date in the past or in the present",
            Self::Future => "must be a future date",
            Self::FutureOrPresent => "must be a date in the present or in the future",
            Self::Custom(_) => "invalid value",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named constraint parameters (bounds, flags, patterns), stored as values.
#[derive(Debug, Clone, Default)]
pub struct ConstraintParams(IndexMap<String, Value>);

impl ConstraintParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Unique id per descriptor, assigned at construction. Resolution results
/// are cached per (descriptor id, runtime kind).
fn next_descriptor_id() -> u32 {
    static NEXT: AtomicU32 = AtomicU32::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// One declared constraint: kind, configured parameters, the groups it
/// belongs to, and an optional message template plus payload labels.
///
/// Immutable once built; the engine consumes descriptors read-only.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    id: u32,
    kind: ConstraintKind,
    params: ConstraintParams,
    groups: SmallVec<[Group; 2]>,
    message: Option<String>,
    payloads: SmallVec<[String; 1]>,
}

impl ConstraintDescriptor {
    /// Creates a descriptor of the given kind with no parameters.
    #[must_use]
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            id: next_descriptor_id(),
            kind,
            params: ConstraintParams::new(),
            groups: SmallVec::new(),
            message: None,
            payloads: SmallVec::new(),
        }
    }

    // ── Convenience constructors for the built-in vocabulary ─────────────

    #[must_use]
    pub fn not_null() -> Self {
        Self::new(ConstraintKind::NotNull)
    }

    #[must_use]
    pub fn is_null() -> Self {
        Self::new(ConstraintKind::IsNull)
    }

    #[must_use]
    pub fn assert_true() -> Self {
        Self::new(ConstraintKind::AssertTrue)
    }

    #[must_use]
    pub fn assert_false() -> Self {
        Self::new(ConstraintKind::AssertFalse)
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub fn min(value: i64) -> Self {
        Self::new(ConstraintKind::Min).param("value", value)
    }

    /// Upper bound, inclusive.
    #[must_use]
    pub fn max(value: i64) -> Self {
        Self::new(ConstraintKind::Max).param("value", value)
    }

    /// Arbitrary-precision lower bound, inclusive unless
    /// [`exclusive`](Self::exclusive) is chained.
    #[must_use]
    pub fn decimal_min(value: Decimal) -> Self {
        Self::new(ConstraintKind::DecimalMin).param("value", value)
    }

    /// Arbitrary-precision upper bound, inclusive unless
    /// [`exclusive`](Self::exclusive) is chained.
    #[must_use]
    pub fn decimal_max(value: Decimal) -> Self {
        Self::new(ConstraintKind::DecimalMax).param("value", value)
    }

    /// Size bounds for text, lists, and maps.
    #[must_use]
    pub fn size(min: usize, max: impl Into<Option<usize>>) -> Self {
        let as_bound = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        let descriptor = Self::new(ConstraintKind::Size).param("min", as_bound(min));
        match max.into() {
            Some(max) => descriptor.param("max", as_bound(max)),
            None => descriptor,
        }
    }

    /// Full-string regular expression match.
    #[must_use]
    pub fn pattern(regexp: impl Into<String>) -> Self {
        Self::new(ConstraintKind::Pattern).param("regexp", regexp.into())
    }

    #[must_use]
    pub fn past() -> Self {
        Self::new(ConstraintKind::Past)
    }

    #[must_use]
    pub fn past_or_present() -> Self {
        Self::new(ConstraintKind::PastOrPresent)
    }

    #[must_use]
    pub fn future() -> Self {
        Self::new(ConstraintKind::Future)
    }

    #[must_use]
    pub fn future_or_present() -> Self {
        Self::new(ConstraintKind::FutureOrPresent)
    }

    /// A caller-registered constraint kind.
    #[must_use]
    pub fn custom(name: impl Into<Arc<str>>) -> Self {
        Self::new(ConstraintKind::Custom(name.into()))
    }

    // ── Builder methods ──────────────────────────────────────────────────

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Assigns the constraint to a group.
    #[must_use = "builder methods must be chained or built"]
    pub fn group(mut self, group: impl Into<Group>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Assigns the constraint to several groups.
    #[must_use = "builder methods must be chained or built"]
    pub fn groups(mut self, groups: impl IntoIterator<Item = Group>) -> Self {
        self.groups.extend(groups);
        self
    }

    /// Overrides the message template. `{param}` placeholders are filled
    /// from the parameter map.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.message = Some(template.into());
        self
    }

    /// Attaches a payload label.
    #[must_use = "builder methods must be chained or built"]
    pub fn payload(mut self, label: impl Into<String>) -> Self {
        self.payloads.push(label.into());
        self
    }

    /// Makes a decimal bound exclusive.
    #[must_use = "builder methods must be chained or built"]
    pub fn exclusive(self) -> Self {
        self.param("inclusive", false)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    #[must_use]
    pub fn params(&self) -> &ConstraintParams {
        &self.params
    }

    /// The declared groups; empty means the implicit `Default` group.
    #[must_use]
    pub fn declared_groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn message_template(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn payloads(&self) -> &[String] {
        &self.payloads
    }

    /// The group under which this constraint participates in the given
    /// sheet, if any.
    #[must_use]
    pub fn matching_group(&self, sheet: &Sheet) -> Option<Group> {
        if self.groups.is_empty() {
            return sheet
                .groups()
                .contains(&Group::DEFAULT)
                .then_some(Group::DEFAULT);
        }
        self.groups.iter().find(|g| sheet.groups().contains(g)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_ids_are_unique() {
        let a = ConstraintDescriptor::not_null();
        let b = ConstraintDescriptor::not_null();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn min_carries_its_bound() {
        let descriptor = ConstraintDescriptor::min(10);
        assert_eq!(descriptor.params().get_int("value"), Some(10));
        assert_eq!(descriptor.kind().name(), "Min");
    }

    #[test]
    fn groupless_constraints_belong_to_default() {
        let descriptor = ConstraintDescriptor::not_null();
        assert!(descriptor.declared_groups().is_empty());
        assert_eq!(
            descriptor.matching_group(&sheet_of(Group::DEFAULT)),
            Some(Group::DEFAULT)
        );
    }

    #[test]
    fn grouped_constraints_do_not_match_default() {
        let descriptor = ConstraintDescriptor::not_null().group("Max");
        assert_eq!(descriptor.matching_group(&sheet_of(Group::DEFAULT)), None);
        assert_eq!(
            descriptor.matching_group(&sheet_of(Group::new("Max"))),
            Some(Group::new("Max"))
        );
    }

    fn sheet_of(group: Group) -> Sheet {
        crate::groups::ValidationOrder::compute(
            &crate::metadata::MetadataRegistry::builder().build(),
            None,
            &[group],
        )
        .unwrap()
        .sheets()[0]
            .clone()
    }
}
