//! Property paths: where in the object graph a node lives.
//!
//! A path is built incrementally during traversal (pushed and popped in
//! place) and deep-copied whenever it is attached to a violation, so a
//! captured path never aliases the traversal's working state.

use std::fmt;

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A named property: `name`.
    Property(String),
    /// A list element: `[3]`.
    Index(usize),
    /// A map value under a key: `[key]`.
    Key(String),
    /// A map key itself: `[key]<key>`.
    KeyOf(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => f.write_str(name),
            Self::Index(i) => write!(f, "[{i}]"),
            Self::Key(key) => write!(f, "[{key}]"),
            Self::KeyOf(key) => write!(f, "[{key}]<key>"),
        }
    }
}

/// An ordered sequence of segments, rooted at the validation root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path: the root itself.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dotted property path with optional indexes and keys, e.g.
    /// `address.street`, `items[2].name`, `scores[math]`.
    ///
    /// Returns `None` on malformed input (empty segments, unbalanced
    /// brackets).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut path = Self::root();
        for part in input.split('.') {
            let (name, brackets) = match part.find('[') {
                Some(at) => part.split_at(at),
                None => (part, ""),
            };
            if name.is_empty() {
                return None;
            }
            path.push(PathSegment::Property(name.to_owned()));
            let mut rest = brackets;
            while !rest.is_empty() {
                let inner = rest.strip_prefix('[')?;
                let (key, tail) = inner.split_once(']')?;
                if key.is_empty() {
                    return None;
                }
                path.push(match key.parse::<usize>() {
                    Ok(index) => PathSegment::Index(index),
                    Err(_) => PathSegment::Key(key.to_owned()),
                });
                rest = tail;
            }
        }
        Some(path)
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// A detached copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Property(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl serde::Serialize for Path {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
