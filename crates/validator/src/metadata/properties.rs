//! The pluggable property-selection boundary.
//!
//! Metadata declares *accessors* — raw member names as the host type exposes
//! them. Which accessors count as properties, and under what name, is a
//! policy decision the engine delegates to a [`PropertySelection`] strategy.
//! An accessor the strategy maps to `None` is not a property and is never
//! traversed.

use std::fmt;

/// How a property is exposed by its host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    /// A plain named field.
    Field,
    /// A getter-style method.
    Getter,
}

/// A raw member of a host type, as declared in metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    name: String,
    kind: AccessorKind,
}

impl Accessor {
    /// A field accessor.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AccessorKind::Field,
        }
    }

    /// A getter-method accessor.
    #[must_use]
    pub fn getter(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AccessorKind::Getter,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> AccessorKind {
        self.kind
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Decides which accessors are properties.
pub trait PropertySelection: Send + Sync + fmt::Debug {
    /// The property name for this accessor, or `None` if the accessor is
    /// not a property (and must not be traversed).
    fn property(&self, accessor: &Accessor) -> Option<String>;

    /// Possible accessor names for a property name — the reverse mapping,
    /// used when locating a property from a caller-supplied path.
    fn accessor_candidates(&self, property: &str) -> Vec<String>;
}

/// The conventional strategy: fields are properties under their own name;
/// getters are properties when prefixed `get`/`is`/`has` followed by an
/// uppercase letter, under the decapitalized remainder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPropertySelection;

impl DefaultPropertySelection {
    fn strip_prefix(name: &str) -> Option<&str> {
        for prefix in ["get", "is", "has"] {
            if let Some(rest) = name.strip_prefix(prefix)
                && rest.starts_with(char::is_uppercase)
            {
                return Some(rest);
            }
        }
        None
    }

    fn decapitalize(name: &str) -> String {
        let mut chars = name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_lowercase().chain(chars).collect()
        })
    }

    fn capitalize(name: &str) -> String {
        let mut chars = name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl PropertySelection for DefaultPropertySelection {
    fn property(&self, accessor: &Accessor) -> Option<String> {
        match accessor.kind() {
            AccessorKind::Field => Some(accessor.name().to_owned()),
            AccessorKind::Getter => {
                Self::strip_prefix(accessor.name()).map(Self::decapitalize)
            }
        }
    }

    fn accessor_candidates(&self, property: &str) -> Vec<String> {
        let capitalized = Self::capitalize(property);
        vec![
            property.to_owned(),
            format!("get{capitalized}"),
            format!("is{capitalized}"),
            format!("has{capitalized}"),
        ]
    }
}
