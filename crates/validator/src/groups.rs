//! Validation groups, group inheritance, and sequence expansion.
//!
//! A [`Group`] names a validation profile. Groups relate in two ways:
//!
//! - **inheritance** — a group may extend other groups; requesting it also
//!   evaluates the constraints of its transitive parents, in the same sheet;
//! - **sequences** — a group may be redeclared as an ordered list of groups.
//!   Sequence positions evaluate in order, and a position that produces a
//!   violation skips the remaining positions of that sequence. A type may
//!   redeclare the `Default` group as a sequence over itself.
//!
//! [`ValidationOrder::compute`] flattens the requested groups into ordered
//! [`Sheet`]s, deduplicated on first occurrence. Cyclic declarations are
//! rejected with [`EngineError::InvalidGroupSequence`] the first time the
//! offending declarations are used.

use std::borrow::Cow;
use std::fmt;

use smallvec::{SmallVec, smallvec};

use crate::foundation::EngineError;
use crate::metadata::{MetadataRegistry, TypeDescriptor};

/// A named validation profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group(Cow<'static, str>);

impl Group {
    /// The implicit default profile. Constraints that declare no groups
    /// belong here.
    pub const DEFAULT: Self = Self(Cow::Borrowed("Default"));

    /// Creates a group with the given name.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The group's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether this is the default group.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Group {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

/// A group redeclared as an ordered list of member groups.
#[derive(Debug, Clone)]
pub struct GroupSequence {
    name: Group,
    members: Vec<Group>,
}

impl GroupSequence {
    /// Declares `name` as a sequence over `members`.
    #[must_use]
    pub fn new(name: impl Into<Group>, members: impl IntoIterator<Item = Group>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &Group {
        &self.name
    }

    #[must_use]
    pub fn members(&self) -> &[Group] {
        &self.members
    }
}

/// One evaluation position: a primary group plus its inherited ancestors,
/// tagged with the sequence it was expanded from, if any.
#[derive(Debug, Clone)]
pub struct Sheet {
    groups: SmallVec<[Group; 2]>,
    sequence: Option<u32>,
}

impl Sheet {
    /// The primary group plus transitive parents.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The group this sheet was created for.
    #[must_use]
    pub fn primary(&self) -> &Group {
        &self.groups[0]
    }

    /// Identifier of the originating sequence, shared by all sheets
    /// expanded from the same requested sequence.
    #[must_use]
    pub fn sequence(&self) -> Option<u32> {
        self.sequence
    }

    /// Whether any of the given groups intersects this sheet.
    #[must_use]
    pub fn intersects(&self, groups: &[Group]) -> bool {
        groups.iter().any(|g| self.groups.contains(g))
    }
}

/// The flattened, deduplicated, ordered list of sheets for one validation
/// call.
#[derive(Debug, Clone, Default)]
pub struct ValidationOrder {
    sheets: Vec<Sheet>,
}

impl ValidationOrder {
    /// Expands the requested groups against the declared sequences and
    /// inheritance of `metadata`, substituting the root type's redeclared
    /// `Default` sequence when present.
    ///
    /// An empty request means `[Default]`.
    pub fn compute(
        metadata: &MetadataRegistry,
        root: Option<&TypeDescriptor>,
        requested: &[Group],
    ) -> Result<Self, EngineError> {
        let mut expansion = Expansion {
            metadata,
            root,
            order: Self::default(),
            visiting: Vec::new(),
            next_sequence: 0,
        };
        if requested.is_empty() {
            expansion.expand(&Group::DEFAULT, None)?;
        } else {
            for group in requested {
                expansion.expand(group, None)?;
            }
        }
        Ok(expansion.order)
    }

    #[must_use]
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    fn push(&mut self, sheet: Sheet) {
        // First occurrence wins: a group already ordered keeps its position.
        if self.sheets.iter().any(|s| s.primary() == sheet.primary()) {
            return;
        }
        self.sheets.push(sheet);
    }
}

/// Depth-first expansion state. `visiting` holds the groups pending
/// expansion on the current path; re-entering one of them is a cycle.
struct Expansion<'a> {
    metadata: &'a MetadataRegistry,
    root: Option<&'a TypeDescriptor>,
    order: ValidationOrder,
    visiting: Vec<Group>,
    next_sequence: u32,
}

impl Expansion<'_> {
    fn expand(&mut self, group: &Group, sequence: Option<u32>) -> Result<(), EngineError> {
        if self.visiting.contains(group) {
            let path: Vec<&str> = self.visiting.iter().map(Group::name).collect();
            return Err(EngineError::sequence(
                group.name(),
                format!("cyclic sequence declaration via [{}]", path.join(" -> ")),
            ));
        }

        if let Some(members) = self.sequence_members(group)? {
            let id = sequence.unwrap_or_else(|| {
                let id = self.next_sequence;
                self.next_sequence += 1;
                id
            });
            self.visiting.push(group.clone());
            for member in &members {
                self.expand(member, Some(id))?;
            }
            self.visiting.pop();
            return Ok(());
        }

        let groups = self.inheritance_closure(group)?;
        self.order.push(Sheet { groups, sequence });
        Ok(())
    }

    /// The sequence this group stands for, if it is declared as one. The
    /// `Default` group is substituted by the root type's redeclared
    /// sequence.
    fn sequence_members(&self, group: &Group) -> Result<Option<Vec<Group>>, EngineError> {
        if group.is_default() {
            if let Some(root) = self.root
                && let Some(members) = root.default_sequence()
            {
                let own_group = Group::new(root.name().to_owned());
                if !members.contains(&own_group) {
                    return Err(EngineError::sequence(
                        root.name(),
                        "a redeclared Default sequence must include the type's own group",
                    ));
                }
                return Ok(Some(members.to_vec()));
            }
            return Ok(None);
        }
        Ok(self.metadata.sequence(group).map(<[Group]>::to_vec))
    }

    /// The group plus its transitive parents, depth-first, primary first.
    fn inheritance_closure(&self, group: &Group) -> Result<SmallVec<[Group; 2]>, EngineError> {
        let mut closure: SmallVec<[Group; 2]> = smallvec![group.clone()];
        let mut stack: Vec<Group> = self.metadata.group_parents(group).to_vec();
        while let Some(parent) = stack.pop() {
            if parent == *group {
                return Err(EngineError::sequence(
                    group.name(),
                    "cyclic group inheritance",
                ));
            }
            if closure.contains(&parent) {
                continue;
            }
            stack.extend(self.metadata.group_parents(&parent).iter().cloned());
            closure.push(parent);
        }
        // A group reached through the root's Default sequence under the
        // type's own name stands for the type's Default constraints.
        if self.root.is_some_and(|r| r.name() == group.name()) && !group.is_default() {
            closure.push(Group::DEFAULT);
        }
        Ok(closure)
    }
}
