//! Runtime kinds and the accepted-type lattice used by validator resolution.

use std::fmt;

/// The runtime kind of a [`Value`](crate::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Decimal,
    Text,
    Date,
    DateTime,
    List,
    Map,
    Object,
}

impl ValueKind {
    /// Human-readable kind name, as used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Text => "text",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::List => "list",
            Self::Map => "map",
            Self::Object => "object",
        }
    }

    /// The abstract family this kind belongs to, if any.
    fn family(self) -> Option<TypeMatch> {
        match self {
            Self::Int | Self::Float | Self::Decimal => Some(TypeMatch::Number),
            Self::Date | Self::DateTime => Some(TypeMatch::Temporal),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The accepted type of a registered validator: either one concrete
/// [`ValueKind`] or an abstract family of kinds.
///
/// `Number` covers `Int`/`Float`/`Decimal`, `Temporal` covers
/// `Date`/`DateTime`, and `Any` covers every kind including `Null`.
/// Assignability forms a small lattice; [`TypeMatch::distance`] measures how
/// many steps up the lattice a concrete kind has to travel to reach the
/// accepted type, which is what "most specific match" means during
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeMatch {
    Any,
    Number,
    Temporal,
    Kind(ValueKind),
}

impl TypeMatch {
    /// Whether a value of the given runtime kind is acceptable here.
    #[must_use]
    pub fn accepts(self, kind: ValueKind) -> bool {
        self.distance(kind).is_some()
    }

    /// Steps up the hierarchy from `kind` to this accepted type.
    ///
    /// `Some(0)` is an exact concrete match, `Some(1)` a family match (or
    /// `Any` for kinds with no family), `Some(2)` is `Any` for kinds that do
    /// have a family in between. `None` means not assignable.
    #[must_use]
    pub fn distance(self, kind: ValueKind) -> Option<u8> {
        match self {
            Self::Kind(k) if k == kind => Some(0),
            Self::Kind(_) => None,
            Self::Number | Self::Temporal => {
                (kind.family() == Some(self)).then_some(1)
            }
            Self::Any => Some(if kind.family().is_some() { 2 } else { 1 }),
        }
    }

    /// Name used in resolution diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Number => "number",
            Self::Temporal => "temporal",
            Self::Kind(k) => k.name(),
        }
    }
}

impl fmt::Display for TypeMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ValueKind> for TypeMatch {
    fn from(kind: ValueKind) -> Self {
        Self::Kind(kind)
    }
}
